mod question;

pub use question::{InvalidLabel, Label, QuestionRecord, QuizOption, MIN_OPTIONS};
