use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::QuizOption;
use crate::session::{Feedback, Mark, SessionState};

const SIDEBAR_WIDTH: u16 = 14;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(state) = app.session() else {
        return;
    };

    let columns = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Fill(1)])
        .margin(1)
        .split(area);
    render_navigator(frame, columns[0], state);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .horizontal_margin(2)
    .split(columns[1]);

    render_progress(frame, chunks[0], state);
    render_position(frame, chunks[1], state);
    render_question_text(frame, chunks[2], state.current_question().text());
    render_options(
        frame,
        chunks[3],
        state.current_question().options(),
        app.selected_option(),
    );
    render_feedback(frame, chunks[4], state.feedback(), app.status());
    render_controls(frame, chunks[5], app.jump_input());
}

/// One row per question, colored by its mark.
fn render_navigator(frame: &mut Frame, area: Rect, state: &SessionState) {
    let lines: Vec<Line> = state
        .marks()
        .into_iter()
        .enumerate()
        .map(|(index, mark)| {
            let (symbol, color) = match mark {
                Mark::Correct => ("+", Color::Green),
                Mark::Incorrect => ("-", Color::Red),
                Mark::Unanswered => ("·", Color::DarkGray),
            };
            let marker = if index == state.current_index() { ">" } else { " " };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan).bold()),
                Span::styled(format!("{:3} ", index + 1), Style::default().fg(Color::Gray)),
                Span::styled(symbol, Style::default().fg(color)),
            ])
        })
        .collect();

    // Keep the current question visible on long banks.
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = (state.current_index() + 1).saturating_sub(visible);

    let widget = Paragraph::new(lines).scroll((scroll as u16, 0)).block(
        Block::default()
            .borders(Borders::RIGHT)
            .border_style(Color::DarkGray)
            .title("Questions".fg(Color::DarkGray)),
    );
    frame.render_widget(widget, area);
}

fn render_progress(frame: &mut Frame, area: Rect, state: &SessionState) {
    let progress = state.progress();
    let widget = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(progress.fraction().clamp(0.0, 1.0))
        .label(format!("{}/{} answered", progress.answered, progress.total));
    frame.render_widget(widget, area);
}

fn render_position(frame: &mut Frame, area: Rect, state: &SessionState) {
    let widget = Paragraph::new(format!(
        "Question {} of {}",
        state.current_index() + 1,
        state.len()
    ))
    .alignment(Alignment::Right)
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, options: &[QuizOption], selected: usize) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let is_selected = index == selected;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", option.label), style),
            Span::styled(option.text.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::vertical(1)));
    frame.render_widget(widget, area);
}

fn render_feedback(frame: &mut Frame, area: Rect, feedback: Option<&Feedback>, status: Option<&str>) {
    let line = match (status, feedback) {
        (Some(status), _) => Line::from(status.to_string().fg(Color::Yellow)),
        (None, Some(feedback)) => {
            let color = if feedback.correct { Color::Green } else { Color::Red };
            Line::from(Span::styled(
                feedback.message.as_str(),
                Style::default().fg(color).bold(),
            ))
        }
        (None, None) => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_controls(frame: &mut Frame, area: Rect, jump_input: Option<&str>) {
    let text = match jump_input {
        Some(input) => format!("jump to question: {}_  ·  enter go  ·  esc cancel", input),
        None => "j/k choose  ·  enter/a-d answer  ·  h/l move  ·  g jump  ·  f finish  ·  q quit"
            .to_string(),
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
