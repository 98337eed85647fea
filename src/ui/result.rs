use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::models::QuizOption;
use crate::session::{QuestionOutcome, ScoreSummary, SessionState, Verdict};

const QUESTION_PREVIEW_LENGTH: usize = 50;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let (Some(summary), Some(state)) = (app.results(), app.session()) else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], &summary);
    render_question_breakdown(frame, chunks[2], &summary, state, app.result_scroll());
    render_controls(frame, chunks[3]);
}

fn verdict_color(verdict: Verdict) -> Color {
    match verdict {
        Verdict::Excellent => Color::Green,
        Verdict::Good => Color::Cyan,
        Verdict::KeepPracticing => Color::Yellow,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, summary: &ScoreSummary) {
    let verdict = summary.verdict();
    let color = verdict_color(verdict);
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({:.1}%)",
                summary.correct_count, summary.total, summary.percentage
            ),
            Style::default().fg(color).bold(),
        )),
        Line::from(verdict.message().fg(color)),
        Line::from(
            format!(
                "{} correct  ·  {} incorrect",
                summary.correct_count,
                summary.incorrect_count()
            )
            .fg(Color::DarkGray),
        ),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(
    frame: &mut Frame,
    area: Rect,
    summary: &ScoreSummary,
    state: &SessionState,
    scroll: usize,
) {
    let mut lines: Vec<Line> = Vec::new();
    // `scroll` counts questions; each takes a header line plus its options.
    let mut offset = 0;

    for (outcome, question) in summary.per_question.iter().zip(state.questions()) {
        if outcome.index < scroll {
            offset += 1 + question.options().len();
        }

        let (symbol, color) = if outcome.is_correct {
            ("+", Color::Green)
        } else {
            ("-", Color::Red)
        };
        let yours = match outcome.user_choice {
            Some(label) => format!("you: {}", label),
            None => "not answered".to_string(),
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
            Span::styled(
                format!("{:2}. ", outcome.index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!(
                    "{:<width$} ",
                    truncate_question(question.text()),
                    width = QUESTION_PREVIEW_LENGTH + 3
                ),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(format!("{:<13}", yours), Style::default().fg(color)),
            Span::styled(
                format!("answer: {}", outcome.correct_choice),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        for option in question.options() {
            lines.push(option_line(option, outcome));
        }
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((offset as u16, 0));
    frame.render_widget(widget, area);
}

/// An indented option under its question: the answer key in green, a wrong
/// pick in red.
fn option_line<'a>(option: &'a QuizOption, outcome: &QuestionOutcome) -> Line<'a> {
    let picked = outcome.user_choice == Some(option.label);
    let (marker, style) = if option.label == outcome.correct_choice {
        ("✓", Style::default().fg(Color::Green))
    } else if picked {
        ("✗", Style::default().fg(Color::Red))
    } else {
        (" ", Style::default().fg(Color::DarkGray))
    };
    let yours = if picked { "  (your answer)" } else { "" };

    Line::from(vec![
        Span::styled(format!("       {} {}. ", marker, option.label), style),
        Span::styled(option.text.as_str(), style),
        Span::styled(yours, style),
    ])
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r retry  ·  n new quiz  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
