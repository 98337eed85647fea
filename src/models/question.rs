use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::BankError;

/// Minimum number of options a question must offer.
pub const MIN_OPTIONS: usize = 2;

/// Single-letter option identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub enum Label {
    A,
    B,
    C,
    D,
}

/// A character that does not name any option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("'{0}' is not an option label")]
pub struct InvalidLabel(pub char);

impl Label {
    pub const ALL: [Label; 4] = [Label::A, Label::B, Label::C, Label::D];

    /// Parse a label, ignoring case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl From<Label> for char {
    fn from(label: Label) -> Self {
        label.as_char()
    }
}

impl TryFrom<char> for Label {
    type Error = InvalidLabel;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c).ok_or(InvalidLabel(c))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub label: Label,
    pub text: String,
}

impl QuizOption {
    pub fn new(label: Label, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
        }
    }
}

/// A question paired with its correct answer.
///
/// Records are immutable: the only way to obtain one is through
/// [`QuestionRecord::new`], which guarantees the answer key names one of
/// the question's own options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    id: usize,
    text: String,
    options: Vec<QuizOption>,
    correct: Label,
}

impl QuestionRecord {
    /// Build a validated record. `id` is the 0-based position in its bank.
    pub fn new(
        id: usize,
        text: impl Into<String>,
        options: Vec<QuizOption>,
        correct: Label,
    ) -> Result<Self, BankError> {
        let question = id + 1;

        if options.is_empty() {
            return Err(BankError::MissingOptions { question });
        }
        if options.len() < MIN_OPTIONS {
            return Err(BankError::TooFewOptions {
                question,
                found: options.len(),
            });
        }

        let mut seen = [false; Label::ALL.len()];
        for option in &options {
            let slot = &mut seen[option.label.index()];
            if *slot {
                return Err(BankError::DuplicateOption {
                    question,
                    label: option.label,
                });
            }
            *slot = true;
        }

        if !seen[correct.index()] {
            return Err(BankError::InvalidAnswer {
                question,
                answer: correct.to_string(),
            });
        }

        Ok(Self {
            id,
            text: text.into(),
            options,
            correct,
        })
    }

    /// Same question and answer, stamped with a new display position.
    pub fn with_id(self, id: usize) -> Self {
        Self { id, ..self }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[QuizOption] {
        &self.options
    }

    pub fn correct(&self) -> Label {
        self.correct
    }

    pub fn has_label(&self, label: Label) -> bool {
        self.options.iter().any(|option| option.label == label)
    }

    /// Position of `label` within the displayed options.
    pub fn option_position(&self, label: Label) -> Option<usize> {
        self.options.iter().position(|option| option.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(labels: &[Label]) -> Vec<QuizOption> {
        labels
            .iter()
            .map(|label| QuizOption::new(*label, format!("option {}", label)))
            .collect()
    }

    #[test]
    fn test_label_parsing_ignores_case() {
        assert_eq!(Label::from_char('b'), Some(Label::B));
        assert_eq!(Label::from_char('D'), Some(Label::D));
        assert_eq!(Label::from_char('E'), None);
        assert_eq!(Label::try_from('x'), Err(InvalidLabel('x')));
    }

    #[test]
    fn test_label_serializes_as_char() {
        let json = serde_json::to_string(&Label::C).unwrap();
        assert_eq!(json, "\"C\"");
        let label: Label = serde_json::from_str("\"a\"").unwrap();
        assert_eq!(label, Label::A);
        assert!(serde_json::from_str::<Label>("\"Z\"").is_err());
    }

    #[test]
    fn test_record_rejects_answer_outside_options() {
        let err = QuestionRecord::new(0, "q", options(&[Label::A, Label::B, Label::C]), Label::D)
            .unwrap_err();
        assert!(matches!(err, BankError::InvalidAnswer { question: 1, .. }));
    }

    #[test]
    fn test_record_rejects_duplicate_labels() {
        let err = QuestionRecord::new(2, "q", options(&[Label::A, Label::A]), Label::A)
            .unwrap_err();
        assert!(matches!(
            err,
            BankError::DuplicateOption {
                question: 3,
                label: Label::A
            }
        ));
    }

    #[test]
    fn test_record_requires_two_options() {
        assert!(matches!(
            QuestionRecord::new(0, "q", Vec::new(), Label::A),
            Err(BankError::MissingOptions { question: 1 })
        ));
        assert!(matches!(
            QuestionRecord::new(0, "q", options(&[Label::A]), Label::A),
            Err(BankError::TooFewOptions { found: 1, .. })
        ));
    }

    #[test]
    fn test_with_id_keeps_pairing() {
        let record =
            QuestionRecord::new(0, "q", options(&[Label::A, Label::B]), Label::B).unwrap();
        let moved = record.clone().with_id(7);
        assert_eq!(moved.id(), 7);
        assert_eq!(moved.text(), record.text());
        assert_eq!(moved.correct(), Label::B);
        assert_eq!(moved.option_position(Label::B), Some(1));
    }
}
