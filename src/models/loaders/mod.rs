pub mod question_bank;

pub use question_bank::{load_question_bank, parse_question_bank, questions_from_blocks};
