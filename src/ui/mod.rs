mod quiz;
mod result;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::session::Phase;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.phase() {
        Phase::NotStarted => welcome::render(frame, area, app),
        Phase::InProgress => quiz::render(frame, area, app),
        Phase::Completed => result::render(frame, area, app),
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::data::demo_bank;
    use crate::session::RandomShuffler;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_each_screen() {
        let mut app =
            App::with_shuffler(demo_bank(), RandomShuffler::seeded(3)).with_notice("file missing");
        let welcome = screen(&app);
        assert!(welcome.contains("QUIZ"));
        assert!(welcome.contains("Quiz data unavailable"));

        app.start_quiz();
        let quiz = screen(&app);
        assert!(quiz.contains("Question 1 of 3"));

        app.submit_selected();
        assert!(screen(&app).contains("orrect"));

        app.finish();
        let results = screen(&app);
        assert!(results.contains("RESULTS"));
        assert!(results.contains("not answered"));
        assert!(results.contains("Adds an element to the end of a list"));
    }
}
