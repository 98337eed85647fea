//! Built-in questions used when no quiz data can be loaded.

use crate::models::QuestionRecord;

use super::loader::parse_bank;

const DEMO_QUESTIONS: &str = "\
What is the output of print(2 + 2)?
A. 2
B. 4
C. 22
D. Error

Which of these is NOT a Python data type?
A. Integer
B. Boolean
C. Character
D. Float

What does the 'append()' method do in Python?
A. Adds an element to the end of a list
B. Removes an element from a list
C. Sorts a list
D. Reverses a list
";

const DEMO_ANSWERS: &str = "B\nC\nA\n";

pub fn demo_bank() -> Vec<QuestionRecord> {
    parse_bank(DEMO_QUESTIONS, DEMO_ANSWERS).expect("built-in demo bank is well formed")
}
