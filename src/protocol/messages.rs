//! Protocol messages for driving a quiz session remotely.
//!
//! All messages are serialized as JSON over WebSocket.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ErrorKind;
use crate::models::{Label, QuizOption};
use crate::session::{Direction, Feedback, Mark, Phase, ScoreSummary, SessionState};

/// Messages sent from client to server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Start a freshly shuffled session, replacing any current one.
    Start,

    /// Record an answer for the current question.
    Submit { label: char },

    /// Move to the previous or next question.
    Navigate { direction: Direction },

    /// Move to a question by its 0-based index.
    Jump { index: usize },

    /// Close the quiz and ask for results.
    Finish,

    /// Drop the session.
    Reset,

    /// Ask for the current view without changing anything.
    Status,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Connection accepted.
    ConnectionAck {
        total_questions: usize,
        /// Set when the host is serving the demo questions instead of its bank.
        fallback: Option<String>,
    },

    /// No session is running.
    Idle,

    /// Current state of the running session.
    Snapshot { view: SessionView },

    /// Final score of a completed session.
    Results { summary: ScoreSummary },

    /// The command was refused; the session is unchanged.
    Rejected { kind: ErrorKind, message: String },

    /// Another client already drives this session.
    Busy,
}

/// Read-only view of the current question. Never carries the answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub phase: Phase,
    pub index: usize,
    pub total: usize,
    pub text: String,
    pub options: Vec<QuizOption>,
    pub answer: Option<Label>,
    pub marks: Vec<Mark>,
    pub feedback: Option<Feedback>,
}

impl SessionView {
    pub fn of(state: &SessionState, phase: Phase) -> Self {
        let question = state.current_question();
        Self {
            session_id: state.id(),
            phase,
            index: state.current_index(),
            total: state.len(),
            text: question.text().to_string(),
            options: question.options().to_vec(),
            answer: state.answer(state.current_index()),
            marks: state.marks(),
            feedback: state.feedback().cloned(),
        }
    }

    pub fn answered_count(&self) -> usize {
        self.marks.iter().filter(|m| **m != Mark::Unanswered).count()
    }
}

/// Default server port.
pub const DEFAULT_PORT: u16 = 8712;
