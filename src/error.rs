//! Error types for loading question banks and driving a session.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Label;
use crate::session::Phase;

/// Violations of the session state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions to start a session with")]
    EmptyInput,
    #[error("cannot {operation} while the quiz is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: Phase,
    },
    #[error("question {index} is out of range (the quiz has {len} questions)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("'{choice}' is not an option of the current question")]
    InvalidChoice { choice: char },
}

/// Wire-friendly discriminant of [`SessionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    EmptyInput,
    InvalidState,
    IndexOutOfRange,
    InvalidChoice,
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput => ErrorKind::EmptyInput,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::InvalidChoice { .. } => ErrorKind::InvalidChoice,
        }
    }
}

/// A question bank whose questions and answers do not line up.
///
/// Question numbers are 1-based, as a person reading the file counts them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("found {questions} questions but {answers} answers")]
    CountMismatch { questions: usize, answers: usize },
    #[error("question {question}: answer {answer:?} is not one of its option labels")]
    InvalidAnswer { question: usize, answer: String },
    #[error("question {question}: cannot read option line {line:?}")]
    InvalidOption { question: usize, line: String },
    #[error("question {question}: option {label} appears twice")]
    DuplicateOption { question: usize, label: Label },
    #[error("question {question} has no options")]
    MissingOptions { question: usize },
    #[error("question {question} has {found} option(s), at least two are required")]
    TooFewOptions { question: usize, found: usize },
    #[error("question {question} has {found} options, at most four are supported")]
    TooManyOptions { question: usize, found: usize },
}

/// Failure to produce a question bank from disk.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("quiz file not found: {}", path.display())]
    Missing { path: PathBuf },
    #[error("{} contains no questions", path.display())]
    Empty { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed question bank: {0}")]
    Malformed(#[from] BankError),
}

/// Top-level error for running a quiz.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("invalid message: {0}")]
    Protocol(#[from] serde_json::Error),
}
