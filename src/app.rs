use tracing::debug;

use crate::error::SessionError;
use crate::models::QuestionRecord;
use crate::session::{
    Direction, Feedback, Phase, RandomShuffler, ScoreSummary, SessionController, SessionState,
    Shuffler,
};

/// Terminal front end state: the session controller plus what only the
/// screen needs (option cursor, jump input, result scroll, notices).
pub struct App {
    bank: Vec<QuestionRecord>,
    controller: SessionController<Box<dyn Shuffler>>,
    notice: Option<String>,
    status: Option<String>,
    selected_option: usize,
    jump_input: Option<String>,
    result_scroll: usize,
}

impl App {
    pub fn new(bank: Vec<QuestionRecord>) -> Self {
        Self::with_shuffler(bank, RandomShuffler::new())
    }

    pub fn with_shuffler(bank: Vec<QuestionRecord>, shuffler: impl Shuffler + 'static) -> Self {
        Self {
            bank,
            controller: SessionController::with_shuffler(Box::new(shuffler)),
            notice: None,
            status: None,
            selected_option: 0,
            jump_input: None,
            result_scroll: 0,
        }
    }

    /// Show `notice` on the welcome screen, e.g. why demo data is in use.
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.controller.session()
    }

    pub fn bank_size(&self) -> usize {
        self.bank.len()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Last rejected action, cleared by the next successful one.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.controller.feedback()
    }

    pub fn results(&self) -> Option<ScoreSummary> {
        self.controller.results().ok()
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn jump_input(&self) -> Option<&str> {
        self.jump_input.as_deref()
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn start_quiz(&mut self) {
        let outcome = self.controller.start(self.bank.clone()).map(|_| ());
        self.result_scroll = 0;
        self.jump_input = None;
        self.track(outcome);
        self.sync_cursor();
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    /// Submit the option under the cursor.
    pub fn submit_selected(&mut self) {
        let label = self
            .controller
            .current_question()
            .ok()
            .and_then(|question| question.options().get(self.selected_option))
            .map(|option| option.label.as_char());
        if let Some(label) = label {
            self.submit_label(label);
        }
    }

    /// Submit a label typed directly.
    pub fn submit_label(&mut self, label: char) {
        let outcome = self.controller.submit_answer(label).map(|_| ());
        self.track(outcome);
        self.sync_cursor();
    }

    pub fn previous_question(&mut self) {
        self.navigate(Direction::Previous);
    }

    pub fn next_question(&mut self) {
        self.navigate(Direction::Next);
    }

    pub fn begin_jump(&mut self) {
        self.jump_input = Some(String::new());
    }

    pub fn jump_input_push(&mut self, c: char) {
        if let Some(input) = &mut self.jump_input {
            if c.is_ascii_digit() && input.len() < 4 {
                input.push(c);
            }
        }
    }

    pub fn jump_input_pop(&mut self) {
        if let Some(input) = &mut self.jump_input {
            input.pop();
        }
    }

    pub fn cancel_jump(&mut self) {
        self.jump_input = None;
    }

    /// Jump to the typed 1-based question number.
    pub fn confirm_jump(&mut self) {
        let Some(input) = self.jump_input.take() else {
            return;
        };
        match input.parse::<usize>() {
            Ok(number) if number >= 1 => match self.controller.jump(number - 1) {
                Err(SessionError::IndexOutOfRange { len, .. }) => {
                    self.status = Some(format!("No question {} (the quiz has {})", number, len));
                }
                outcome => {
                    self.track(outcome);
                    self.sync_cursor();
                }
            },
            _ if input.is_empty() => {}
            _ => self.status = Some(format!("No question {}", input)),
        }
    }

    pub fn finish(&mut self) {
        let outcome = self.controller.finish();
        self.result_scroll = 0;
        self.jump_input = None;
        self.track(outcome);
    }

    /// Same bank, fresh shuffle.
    pub fn retry(&mut self) {
        self.start_quiz();
    }

    /// Back to the welcome screen.
    pub fn new_quiz(&mut self) {
        self.controller.reset();
        self.status = None;
        self.jump_input = None;
        self.selected_option = 0;
        self.result_scroll = 0;
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.session().map_or(0, |s| s.len().saturating_sub(1));
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    fn navigate(&mut self, direction: Direction) {
        let outcome = self.controller.navigate(direction).map(|_| ());
        self.track(outcome);
        self.sync_cursor();
    }

    fn option_count(&self) -> usize {
        self.controller
            .current_question()
            .map_or(0, |question| question.options().len())
    }

    /// Put the cursor on the recorded answer, or the first option.
    fn sync_cursor(&mut self) {
        self.selected_option = self
            .session()
            .and_then(|state| {
                let answer = state.answer(state.current_index())?;
                state.current_question().option_position(answer)
            })
            .unwrap_or(0);
    }

    fn track(&mut self, outcome: Result<(), SessionError>) {
        match outcome {
            Ok(()) => self.status = None,
            Err(err) => {
                // Shown on the status line; stderr may be the screen we draw on.
                debug!(error = %err, "action rejected");
                self.status = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Label, QuizOption};
    use crate::session::{FnShuffler, Mark};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::EnvFilter;

    fn bank() -> Vec<QuestionRecord> {
        [Label::B, Label::C, Label::A]
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let options = Label::ALL
                    .iter()
                    .map(|l| QuizOption::new(*l, format!("{}{}", l, i)))
                    .collect();
                QuestionRecord::new(i, format!("question {}", i), options, *label).unwrap()
            })
            .collect()
    }

    fn app() -> App {
        App::with_shuffler(bank(), FnShuffler(|_: &mut [QuestionRecord]| {}))
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_rejected_action_is_silent_at_default_level() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("warn"))
            .with_writer(move || writer.clone())
            .finish();

        let options = vec![QuizOption::new(Label::A, "yes"), QuizOption::new(Label::B, "no")];
        let bank = vec![QuestionRecord::new(0, "two options", options, Label::A).unwrap()];
        let mut app = App::with_shuffler(bank, FnShuffler(|_: &mut [QuestionRecord]| {}));

        tracing::subscriber::with_default(subscriber, || {
            app.start_quiz();
            app.submit_label('d');
            app.begin_jump();
            app.jump_input_push('5');
            app.confirm_jump();
        });

        assert!(app.status().is_some());
        assert!(captured.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_welcome_until_started() {
        let mut app = app();
        assert_eq!(app.phase(), Phase::NotStarted);
        app.start_quiz();
        assert_eq!(app.phase(), Phase::InProgress);
        assert_eq!(app.selected_option(), 0);
    }

    #[test]
    fn test_cursor_wraps_and_submits() {
        let mut app = app();
        app.start_quiz();
        app.select_previous_option();
        assert_eq!(app.selected_option(), 3);
        app.select_next_option();
        app.select_next_option();
        assert_eq!(app.selected_option(), 1);

        app.submit_selected();
        assert!(app.feedback().unwrap().correct);
        assert_eq!(app.session().unwrap().mark(0), Mark::Correct);
    }

    #[test]
    fn test_cursor_follows_recorded_answer() {
        let mut app = app();
        app.start_quiz();
        app.submit_label('d');
        app.next_question();
        assert_eq!(app.selected_option(), 0);
        assert!(app.feedback().is_none());

        app.previous_question();
        assert_eq!(app.selected_option(), 3);
    }

    #[test]
    fn test_jump_input() {
        let mut app = app();
        app.start_quiz();
        app.begin_jump();
        app.jump_input_push('3');
        app.jump_input_push('x');
        assert_eq!(app.jump_input(), Some("3"));
        app.confirm_jump();
        assert_eq!(app.session().unwrap().current_index(), 2);
        assert!(app.jump_input().is_none());

        app.begin_jump();
        app.jump_input_push('9');
        app.confirm_jump();
        assert_eq!(app.session().unwrap().current_index(), 2);
        assert_eq!(app.status(), Some("No question 9 (the quiz has 3)"));

        app.begin_jump();
        app.jump_input_push('0');
        app.confirm_jump();
        assert_eq!(app.status(), Some("No question 0"));
    }

    #[test]
    fn test_invalid_label_reports_status() {
        let mut app = app();
        app.start_quiz();
        app.submit_label('z');
        assert!(app.status().is_some());
        app.submit_label('a');
        assert!(app.status().is_none());
    }

    #[test]
    fn test_finish_retry_and_new_quiz() {
        let mut app = app();
        app.start_quiz();
        app.submit_label('B');
        app.finish();
        assert_eq!(app.phase(), Phase::Completed);
        assert_eq!(app.results().unwrap().correct_count, 1);

        app.scroll_results_down();
        app.scroll_results_down();
        app.scroll_results_down();
        assert_eq!(app.result_scroll(), 2);
        app.scroll_results_up();
        assert_eq!(app.result_scroll(), 1);

        app.retry();
        assert_eq!(app.phase(), Phase::InProgress);
        assert_eq!(app.session().unwrap().answered_count(), 0);
        assert_eq!(app.result_scroll(), 0);

        app.new_quiz();
        assert_eq!(app.phase(), Phase::NotStarted);
        assert!(app.results().is_none());
    }
}
