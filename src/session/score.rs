//! Final scoring of a quiz run.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::models::{Label, QuestionRecord};

const EXCELLENT_THRESHOLD: f64 = 80.0;
const GOOD_THRESHOLD: f64 = 60.0;

/// Outcome for a single question, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub index: usize,
    pub is_correct: bool,
    pub user_choice: Option<Label>,
    pub correct_choice: Label,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub correct_count: usize,
    pub total: usize,
    pub percentage: f64,
    pub per_question: Vec<QuestionOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Excellent,
    Good,
    KeepPracticing,
}

impl Verdict {
    pub fn message(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent job!",
            Self::Good => "Good work!",
            Self::KeepPracticing => "Keep practicing!",
        }
    }
}

impl ScoreSummary {
    pub fn incorrect_count(&self) -> usize {
        self.total - self.correct_count
    }

    pub fn verdict(&self) -> Verdict {
        if self.percentage >= EXCELLENT_THRESHOLD {
            Verdict::Excellent
        } else if self.percentage >= GOOD_THRESHOLD {
            Verdict::Good
        } else {
            Verdict::KeepPracticing
        }
    }
}

/// Score `answers` against the key carried by `questions`.
///
/// A missing or unset answer never matches. Fails with
/// [`SessionError::EmptyInput`] when there is nothing to score.
pub fn score(
    questions: &[QuestionRecord],
    answers: &[Option<Label>],
) -> Result<ScoreSummary, SessionError> {
    if questions.is_empty() {
        return Err(SessionError::EmptyInput);
    }

    let per_question: Vec<QuestionOutcome> = questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let user_choice = answers.get(index).copied().flatten();
            QuestionOutcome {
                index,
                is_correct: user_choice == Some(question.correct()),
                user_choice,
                correct_choice: question.correct(),
            }
        })
        .collect();

    let correct_count = per_question.iter().filter(|o| o.is_correct).count();
    let total = questions.len();

    Ok(ScoreSummary {
        correct_count,
        total,
        percentage: 100.0 * correct_count as f64 / total as f64,
        per_question,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuizOption;

    fn bank(correct: &[Label]) -> Vec<QuestionRecord> {
        correct
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let options = Label::ALL
                    .iter()
                    .map(|l| QuizOption::new(*l, l.to_string()))
                    .collect();
                QuestionRecord::new(i, format!("q{}", i), options, *label).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_score_half_correct() {
        let questions = bank(&[Label::B, Label::C]);
        let summary = score(&questions, &[Some(Label::B), Some(Label::D)]).unwrap();

        assert_eq!(summary.correct_count, 1);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.percentage, 50.0);
        assert_eq!(summary.incorrect_count(), 1);
        assert_eq!(
            summary.per_question[1],
            QuestionOutcome {
                index: 1,
                is_correct: false,
                user_choice: Some(Label::D),
                correct_choice: Label::C,
            }
        );
    }

    #[test]
    fn test_unanswered_counts_as_wrong() {
        let questions = bank(&[Label::B, Label::C]);
        let summary = score(&questions, &[None, Some(Label::C)]).unwrap();
        assert_eq!(summary.correct_count, 1);
        assert!(!summary.per_question[0].is_correct);
        assert_eq!(summary.per_question[0].user_choice, None);
    }

    #[test]
    fn test_short_answer_slice_is_unanswered() {
        let questions = bank(&[Label::A, Label::A, Label::A]);
        let summary = score(&questions, &[Some(Label::A)]).unwrap();
        assert_eq!(summary.correct_count, 1);
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn test_score_empty_bank_fails() {
        assert_eq!(score(&[], &[]), Err(SessionError::EmptyInput));
    }

    #[test]
    fn test_score_does_not_touch_inputs() {
        let questions = bank(&[Label::A, Label::D]);
        let answers = vec![Some(Label::A), None];
        let before = (questions.clone(), answers.clone());
        let _ = score(&questions, &answers).unwrap();
        assert_eq!((questions, answers), before);
    }

    #[test]
    fn test_verdict_thresholds() {
        let questions = bank(&[Label::A; 5]);
        let verdict = |hits: usize| {
            let answers: Vec<_> = (0..5)
                .map(|i| if i < hits { Some(Label::A) } else { None })
                .collect();
            score(&questions, &answers).unwrap().verdict()
        };
        assert_eq!(verdict(5), Verdict::Excellent);
        assert_eq!(verdict(4), Verdict::Excellent);
        assert_eq!(verdict(3), Verdict::Good);
        assert_eq!(verdict(2), Verdict::KeepPracticing);
        assert_eq!(Verdict::Good.message(), "Good work!");
    }
}
