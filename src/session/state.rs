//! The record of an in-progress quiz.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::models::{Label, QuestionRecord};

/// Transient correctness message shown after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub correct: bool,
    pub message: String,
}

impl Feedback {
    pub fn for_choice(choice: Label, correct: Label) -> Self {
        if choice == correct {
            Self {
                correct: true,
                message: "Correct!".to_string(),
            }
        } else {
            Self {
                correct: false,
                message: format!("Wrong! The correct answer is {}", correct),
            }
        }
    }
}

/// Live status of one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    Unanswered,
    Correct,
    Incorrect,
}

/// Answered count against the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub answered: usize,
    pub total: usize,
}

impl Progress {
    /// Share of answered questions in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.answered as f64 / self.total as f64
        }
    }
}

/// State of a single quiz run.
///
/// `answers` holds one slot per question; a question counts as answered
/// exactly when its slot is filled, so there is no separate answered set
/// to keep in sync.
#[derive(Debug, Clone)]
pub struct SessionState {
    id: Uuid,
    questions: Vec<QuestionRecord>,
    pub(super) current_index: usize,
    pub(super) answers: Vec<Option<Label>>,
    pub(super) feedback: Option<Feedback>,
    pub(super) completed: bool,
}

impl SessionState {
    /// Fresh state over an already shuffled question list.
    ///
    /// Records are re-stamped with their display position.
    pub fn new(questions: Vec<QuestionRecord>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptyInput);
        }

        let questions: Vec<QuestionRecord> = questions
            .into_iter()
            .enumerate()
            .map(|(position, record)| record.with_id(position))
            .collect();
        let len = questions.len();

        Ok(Self {
            id: Uuid::new_v4(),
            questions,
            current_index: 0,
            answers: vec![None; len],
            feedback: None,
            completed: false,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false: a session holds at least one question.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &QuestionRecord {
        &self.questions[self.current_index]
    }

    pub fn answers(&self) -> &[Option<Label>] {
        &self.answers
    }

    pub fn answer(&self, index: usize) -> Option<Label> {
        self.answers.get(index).copied().flatten()
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.answer(index).is_some()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn progress(&self) -> Progress {
        Progress {
            current: self.current_index,
            answered: self.answered_count(),
            total: self.questions.len(),
        }
    }

    /// Unanswered, or whether the recorded choice matches the key.
    pub fn mark(&self, index: usize) -> Mark {
        match (self.answer(index), self.questions.get(index)) {
            (Some(choice), Some(question)) if choice == question.correct() => Mark::Correct,
            (Some(_), Some(_)) => Mark::Incorrect,
            _ => Mark::Unanswered,
        }
    }

    pub fn marks(&self) -> Vec<Mark> {
        (0..self.questions.len()).map(|i| self.mark(i)).collect()
    }
}
