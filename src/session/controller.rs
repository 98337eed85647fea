//! The quiz session state machine.
//!
//! `NotStarted -> InProgress -> Completed`, with `reset` returning to
//! `NotStarted` from anywhere. The controller is the only mutator of its
//! [`SessionState`]; callers get read-only views back.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::SessionError;
use crate::models::{Label, QuestionRecord};

use super::score::{score, ScoreSummary};
use super::shuffle::{shuffle, RandomShuffler, Shuffler};
use super::state::{Feedback, Progress, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Previous,
    Next,
}

pub struct SessionController<S = RandomShuffler> {
    shuffler: S,
    session: Option<SessionState>,
}

impl SessionController<RandomShuffler> {
    pub fn new() -> Self {
        Self::with_shuffler(RandomShuffler::new())
    }
}

impl Default for SessionController<RandomShuffler> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Shuffler> SessionController<S> {
    pub fn with_shuffler(shuffler: S) -> Self {
        Self {
            shuffler,
            session: None,
        }
    }

    pub fn phase(&self) -> Phase {
        match &self.session {
            None => Phase::NotStarted,
            Some(state) if state.completed => Phase::Completed,
            Some(_) => Phase::InProgress,
        }
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// Shuffle `records` into a brand new session, replacing any prior one.
    pub fn start(&mut self, records: Vec<QuestionRecord>) -> Result<&SessionState, SessionError> {
        let questions = shuffle(records, &mut self.shuffler)?;
        let state = SessionState::new(questions)?;
        info!(session = %state.id(), questions = state.len(), "quiz started");

        // The previous session is dropped here, before anything else can see it.
        Ok(self.session.insert(state))
    }

    /// Move one question back or forward. Clamps at either end.
    pub fn navigate(&mut self, direction: Direction) -> Result<usize, SessionError> {
        let state = self.active_mut("navigate")?;
        let last = state.len() - 1;
        state.current_index = match direction {
            Direction::Previous => state.current_index.saturating_sub(1),
            Direction::Next => (state.current_index + 1).min(last),
        };
        state.feedback = None;
        debug!(index = state.current_index, ?direction, "navigated");
        Ok(state.current_index)
    }

    pub fn jump(&mut self, index: usize) -> Result<(), SessionError> {
        let state = self.active_mut("jump to a question")?;
        if index >= state.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: state.len(),
            });
        }
        state.current_index = index;
        state.feedback = None;
        debug!(index, "jumped");
        Ok(())
    }

    /// Record `choice` for the current question, overwriting any earlier
    /// answer, and compute feedback. Does not move to another question.
    pub fn submit_answer(&mut self, choice: char) -> Result<&Feedback, SessionError> {
        let state = self.active_mut("submit an answer")?;
        let question = state.current_question();
        let label = Label::from_char(choice)
            .filter(|label| question.has_label(*label))
            .ok_or(SessionError::InvalidChoice { choice })?;

        let feedback = Feedback::for_choice(label, question.correct());
        let index = state.current_index;
        state.answers[index] = Some(label);
        debug!(index, %label, correct = feedback.correct, "answer recorded");

        Ok(state.feedback.insert(feedback))
    }

    /// Close the quiz. Any number of answered questions is allowed.
    pub fn finish(&mut self) -> Result<(), SessionError> {
        let state = self.active_mut("finish")?;
        state.completed = true;
        state.feedback = None;
        info!(
            session = %state.id(),
            answered = state.answered_count(),
            total = state.len(),
            "quiz finished"
        );
        Ok(())
    }

    /// Discard the session entirely.
    pub fn reset(&mut self) {
        if let Some(state) = self.session.take() {
            info!(session = %state.id(), "quiz reset");
        }
    }

    pub fn current_question(&self) -> Result<&QuestionRecord, SessionError> {
        Ok(self.existing("read the current question")?.current_question())
    }

    pub fn progress(&self) -> Result<Progress, SessionError> {
        Ok(self.existing("read progress")?.progress())
    }

    pub fn is_answered(&self, index: usize) -> Result<bool, SessionError> {
        let state = self.existing("read answers")?;
        if index >= state.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: state.len(),
            });
        }
        Ok(state.is_answered(index))
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.session.as_ref().and_then(SessionState::feedback)
    }

    /// Score summary, available once the quiz is completed.
    pub fn results(&self) -> Result<ScoreSummary, SessionError> {
        match &self.session {
            Some(state) if state.completed => score(state.questions(), state.answers()),
            _ => Err(self.invalid_state("read results")),
        }
    }

    fn active_mut(&mut self, operation: &'static str) -> Result<&mut SessionState, SessionError> {
        let phase = self.phase();
        match self.session.as_mut() {
            Some(state) if !state.completed => Ok(state),
            _ => Err(SessionError::InvalidState { operation, phase }),
        }
    }

    fn existing(&self, operation: &'static str) -> Result<&SessionState, SessionError> {
        self.session
            .as_ref()
            .ok_or_else(|| self.invalid_state(operation))
    }

    fn invalid_state(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidState {
            operation,
            phase: self.phase(),
        }
    }
}
