use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(12),
        Constraint::Fill(1),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ SESSION",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(format!("{} Questions · Shuffled each run", app.bank_size()).fg(Color::DarkGray)),
        Line::from(""),
    ];

    match app.notice() {
        Some(notice) => {
            content.push(Line::from(Span::styled(
                "Quiz data unavailable, playing the demo set",
                Style::default().fg(Color::Yellow),
            )));
            content.push(Line::from(notice.to_string().fg(Color::DarkGray)));
        }
        None => {
            content.push(Line::from(""));
            content.push(Line::from(""));
        }
    }

    content.extend([
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start  ·  q to quit".fg(Color::DarkGray)),
    ]);

    if let Some(status) = app.status() {
        content.push(Line::from(status.to_string().fg(Color::Red)));
    }

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );

    frame.render_widget(widget, chunks[1]);
}
