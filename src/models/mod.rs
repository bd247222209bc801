pub mod group;
pub mod ledger_entry;
pub mod loaders;
pub mod poll_question;

pub use group::{group_id_from_url, GroupRef};
pub use ledger_entry::{LedgerEntry, LEDGER_HEADERS};
pub use loaders::{load_question_bank, parse_question_bank, questions_from_blocks};
pub use poll_question::{PollQuestion, QuestionBlock};
