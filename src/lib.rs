//! # quiz-session
//!
//! A shuffled multiple-choice quiz session with navigation, immediate
//! feedback and scoring. The session core is front-end agnostic; this crate
//! ships a full-screen terminal front end and a WebSocket host/client pair.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_session::{BankSource, Quiz, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     // Falls back to the built-in demo questions if the files are unusable
//!     let quiz = Quiz::from_source(&BankSource::default());
//!
//!     // Run the quiz in the terminal
//!     quiz.run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
pub mod client;
mod data;
mod error;
pub mod logging;
mod models;
pub mod protocol;
pub mod server;
mod session;
pub mod terminal;
mod ui;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::info;

pub use app::App;
pub use data::{
    demo_bank, load_bank, load_or_demo, parse_bank, BankSource, LoadedBank, DEFAULT_ANSWERS_PATH,
    DEFAULT_QUESTIONS_PATH,
};
pub use error::{BankError, ErrorKind, LoadError, QuizError, SessionError};
pub use models::{InvalidLabel, Label, QuestionRecord, QuizOption, MIN_OPTIONS};
pub use session::{
    score, shuffle, Direction, Feedback, FnShuffler, Mark, Phase, Progress, QuestionOutcome,
    RandomShuffler, ScoreSummary, SessionController, SessionState, Shuffler, Verdict,
};

use terminal::Tui;

/// A quiz that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a quiz over `questions`, shuffled randomly on every start.
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self {
            app: App::new(questions),
        }
    }

    /// Create a quiz with an explicit shuffler, e.g. a seeded one.
    pub fn with_shuffler(questions: Vec<QuestionRecord>, shuffler: impl Shuffler + 'static) -> Self {
        Self {
            app: App::with_shuffler(questions, shuffler),
        }
    }

    /// Load a quiz from `source`.
    ///
    /// An unusable source never fails: the demo questions are played
    /// instead and the welcome screen says why.
    ///
    /// ```rust,no_run
    /// use quiz_session::{BankSource, Quiz};
    ///
    /// let quiz = Quiz::from_source(&BankSource::Json("questions.json".into()));
    /// ```
    pub fn from_source(source: &BankSource) -> Self {
        Self::from_bank(load_or_demo(source), RandomShuffler::new())
    }

    /// Wrap an already loaded bank.
    pub fn from_bank(bank: LoadedBank, shuffler: impl Shuffler + 'static) -> Self {
        let mut app = App::with_shuffler(bank.records, shuffler);
        if let Some(reason) = bank.fallback {
            app = app.with_notice(reason.to_string());
        }
        Self { app }
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut tui = Tui::enter()?;
        info!(questions = self.app.bank_size(), "quiz started in terminal");
        run_event_loop(&mut tui, &mut self.app)
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.phase() {
        Phase::NotStarted => handle_welcome_input(app, key),
        Phase::InProgress if app.jump_input().is_some() => {
            handle_jump_input(app, key);
            false
        }
        Phase::InProgress => handle_quiz_input(app, key),
        Phase::Completed => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.submit_selected(),
        KeyCode::Left | KeyCode::Char('h') => app.previous_question(),
        KeyCode::Right | KeyCode::Char('l') => app.next_question(),
        KeyCode::Char('g') => app.begin_jump(),
        KeyCode::Char('f') | KeyCode::Char('F') => app.finish(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Char(c) if Label::from_char(c).is_some() => app.submit_label(c),
        _ => {}
    }
    false
}

fn handle_jump_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(c) if c.is_ascii_digit() => app.jump_input_push(c),
        KeyCode::Backspace => app.jump_input_pop(),
        KeyCode::Enter => app.confirm_jump(),
        KeyCode::Esc => app.cancel_jump(),
        _ => {}
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.retry(),
        KeyCode::Char('n') | KeyCode::Char('N') => app.new_quiz(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}
