pub mod question_filter;
pub mod quiz_session;

pub use question_filter::{DifficultyFilter, QuestionFilter};
pub use quiz_session::{QuizSession, SessionEntry, SessionKey};
