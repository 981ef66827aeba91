pub mod question_generator;
pub mod spreadsheet_importer;
pub mod templates;
pub mod topic_lookup;

pub use question_generator::TopicQuestionGenerator;
pub use spreadsheet_importer::SpreadsheetImporter;
pub use topic_lookup::{LookupResult, TopicLookup};
