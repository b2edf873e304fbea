pub mod catalog;
pub mod question;

pub use catalog::QuestionCatalog;
pub use question::{ChoiceOption, Condition, Expectation, Question, QuestionKind};
