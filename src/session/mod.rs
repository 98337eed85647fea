//! Quiz session core: shuffling, state, transitions and scoring.

mod controller;
mod score;
mod shuffle;
mod state;

pub use controller::{Direction, Phase, SessionController};
pub use score::{score, QuestionOutcome, ScoreSummary, Verdict};
pub use shuffle::{shuffle, FnShuffler, RandomShuffler, Shuffler};
pub use state::{Feedback, Mark, Progress, SessionState};
