//! Plain-text rendering of server replies.

use std::fmt::Write;

use crate::protocol::{ServerMessage, SessionView};
use crate::session::{Mark, ScoreSummary};

/// Render a server message for the terminal.
pub fn format_message(msg: &ServerMessage) -> String {
    match msg {
        ServerMessage::ConnectionAck {
            total_questions,
            fallback,
        } => {
            let mut out = format!(
                "Connected. {} questions available. Type 'start' to begin, 'help' for commands.",
                total_questions
            );
            if let Some(reason) = fallback {
                let _ = write!(out, "\nQuiz data unavailable ({}); playing the demo set.", reason);
            }
            out
        }
        ServerMessage::Idle => "No quiz running. Type 'start' to begin.".to_string(),
        ServerMessage::Snapshot { view } => format_view(view),
        ServerMessage::Results { summary } => format_results(summary),
        ServerMessage::Rejected { message, .. } => format!("Error: {}", message),
        ServerMessage::Busy => "Another player is already using this quiz.".to_string(),
    }
}

pub fn format_view(view: &SessionView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Question {} of {}  [{}]  answered {}/{}",
        view.index + 1,
        view.total,
        navigator(&view.marks, view.index),
        view.answered_count(),
        view.total
    );
    let _ = writeln!(out, "{}", view.text);

    for option in &view.options {
        let marker = if view.answer == Some(option.label) { ">" } else { " " };
        let _ = writeln!(out, " {} {}. {}", marker, option.label, option.text);
    }

    if let Some(feedback) = &view.feedback {
        let _ = writeln!(out, "{}", feedback.message);
    }

    out.trim_end().to_string()
}

pub fn format_results(summary: &ScoreSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "RESULTS  {} / {}  ({:.1}%)  {}",
        summary.correct_count,
        summary.total,
        summary.percentage,
        summary.verdict().message()
    );

    for outcome in &summary.per_question {
        let symbol = if outcome.is_correct { "+" } else { "-" };
        let yours = outcome
            .user_choice
            .map(|label| label.to_string())
            .unwrap_or_else(|| "not answered".to_string());
        let _ = writeln!(
            out,
            " {} {:2}. yours: {:<12} correct: {}",
            symbol,
            outcome.index + 1,
            yours,
            outcome.correct_choice
        );
    }

    out.trim_end().to_string()
}

/// One character per question: `+` right, `-` wrong, `.` open; the
/// current question is bracketed.
fn navigator(marks: &[Mark], current: usize) -> String {
    marks
        .iter()
        .enumerate()
        .map(|(index, mark)| {
            let symbol = match mark {
                Mark::Correct => '+',
                Mark::Incorrect => '-',
                Mark::Unanswered => '.',
            };
            if index == current {
                format!("({})", symbol)
            } else {
                symbol.to_string()
            }
        })
        .collect()
}
