mod demo;
mod loader;

pub use demo::demo_bank;
pub use loader::{
    load_bank, load_or_demo, parse_bank, BankSource, LoadedBank, DEFAULT_ANSWERS_PATH,
    DEFAULT_QUESTIONS_PATH,
};
