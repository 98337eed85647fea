use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{BankError, LoadError};
use crate::models::{Label, QuestionRecord, QuizOption};

use super::demo::demo_bank;

pub const DEFAULT_QUESTIONS_PATH: &str = "questions.txt";
pub const DEFAULT_ANSWERS_PATH: &str = "answers.txt";

/// Where a question bank comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankSource {
    /// Blank-line separated question blocks plus one answer label per line.
    Text { questions: PathBuf, answers: PathBuf },
    /// A JSON array of questions.
    Json(PathBuf),
}

impl Default for BankSource {
    fn default() -> Self {
        Self::Text {
            questions: PathBuf::from(DEFAULT_QUESTIONS_PATH),
            answers: PathBuf::from(DEFAULT_ANSWERS_PATH),
        }
    }
}

impl fmt::Display for BankSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { questions, answers } => {
                write!(f, "{} + {}", questions.display(), answers.display())
            }
            Self::Json(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A bank ready to play, possibly the built-in demo set.
#[derive(Debug)]
pub struct LoadedBank {
    pub records: Vec<QuestionRecord>,
    /// Why the requested bank could not be used, if the demo set replaced it.
    pub fallback: Option<LoadError>,
}

impl LoadedBank {
    pub fn is_demo(&self) -> bool {
        self.fallback.is_some()
    }
}

#[derive(Deserialize)]
struct JsonQuestion {
    text: String,
    options: Vec<String>,
    correct_answer: String,
}

/// Load a bank, failing on any problem with the source.
pub fn load_bank(source: &BankSource) -> Result<Vec<QuestionRecord>, LoadError> {
    let records = match source {
        BankSource::Text { questions, answers } => {
            let question_text = read_file(questions)?;
            let answer_text = read_file(answers)?;
            if split_blocks(&question_text).is_empty() {
                return Err(LoadError::Empty {
                    path: questions.clone(),
                });
            }
            parse_bank(&question_text, &answer_text)?
        }
        BankSource::Json(path) => {
            let content = read_file(path)?;
            let raw: Vec<JsonQuestion> =
                serde_json::from_str(&content).map_err(|source| LoadError::Json {
                    path: path.clone(),
                    source,
                })?;
            if raw.is_empty() {
                return Err(LoadError::Empty { path: path.clone() });
            }
            raw.into_iter()
                .enumerate()
                .map(|(id, question)| json_record(id, question))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    info!(source = %source, questions = records.len(), "question bank loaded");
    Ok(records)
}

/// Load a bank, degrading to the demo set when the source is unusable.
pub fn load_or_demo(source: &BankSource) -> LoadedBank {
    match load_bank(source) {
        Ok(records) => LoadedBank {
            records,
            fallback: None,
        },
        Err(err) => {
            warn!(source = %source, error = %err, "quiz data unavailable, using demo questions");
            LoadedBank {
                records: demo_bank(),
                fallback: Some(err),
            }
        }
    }
}

/// Pair question blocks with answer labels.
///
/// `questions` holds blocks separated by blank lines: the first line is the
/// question, each following line an option written `"<Label>. <text>"`.
/// `answers` holds one label per non-empty line, in the same order.
pub fn parse_bank(questions: &str, answers: &str) -> Result<Vec<QuestionRecord>, BankError> {
    let blocks = split_blocks(questions);
    let answers: Vec<&str> = answers
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if blocks.len() != answers.len() {
        return Err(BankError::CountMismatch {
            questions: blocks.len(),
            answers: answers.len(),
        });
    }

    blocks
        .iter()
        .zip(answers)
        .enumerate()
        .map(|(id, (block, answer))| {
            let question = id + 1;
            let (text, option_lines) = block
                .split_first()
                .ok_or(BankError::MissingOptions { question })?;
            let options = option_lines
                .iter()
                .map(|line| parse_option(question, line))
                .collect::<Result<Vec<_>, _>>()?;
            let correct = parse_answer(question, answer)?;
            QuestionRecord::new(id, *text, options, correct)
        })
        .collect()
}

fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn parse_option(question: usize, line: &str) -> Result<QuizOption, BankError> {
    let invalid = || BankError::InvalidOption {
        question,
        line: line.to_string(),
    };

    let (label, text) = line.split_once('.').ok_or_else(invalid)?;
    let mut chars = label.trim().chars();
    let label = match (chars.next(), chars.next()) {
        (Some(c), None) => Label::from_char(c).ok_or_else(invalid)?,
        _ => return Err(invalid()),
    };

    Ok(QuizOption::new(label, text.trim()))
}

fn parse_answer(question: usize, answer: &str) -> Result<Label, BankError> {
    let mut chars = answer.chars();
    let label = match (chars.next(), chars.next()) {
        (Some(c), None) => Label::from_char(c),
        _ => None,
    };
    label.ok_or_else(|| BankError::InvalidAnswer {
        question,
        answer: answer.to_string(),
    })
}

fn json_record(id: usize, raw: JsonQuestion) -> Result<QuestionRecord, BankError> {
    let question = id + 1;
    if raw.options.len() > Label::ALL.len() {
        return Err(BankError::TooManyOptions {
            question,
            found: raw.options.len(),
        });
    }

    let options = Label::ALL
        .iter()
        .zip(raw.options)
        .map(|(label, text)| QuizOption::new(*label, text))
        .collect();
    let correct = parse_answer(question, raw.correct_answer.trim())?;

    QuestionRecord::new(id, raw.text, options, correct)
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::Missing {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
