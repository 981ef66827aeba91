pub mod difficulty;
pub mod loaders;
pub mod question;
pub mod raw_row;

pub use difficulty::DifficultyLevel;
pub use loaders::{decode_workbook, decode_workbook_owned, read_spreadsheet_file};
pub use question::{Question, QuestionBatch};
pub use raw_row::{Column, RawRow};
