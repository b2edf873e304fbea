#![allow(missing_docs)]

pub mod answers;
pub mod engine;
pub mod error;
pub mod render;
pub mod spec;
pub mod summary;
pub mod visibility;

pub use answers::{Answer, AnswerStore, AnswerValue};
pub use engine::{Progress, Questionnaire};
pub use error::QuestionnaireError;
pub use render::{
    RenderPayload, RenderQuestion, RenderStatus, build_render_payload, render_json_ui, render_text,
};
pub use spec::{ChoiceOption, Condition, Expectation, Question, QuestionCatalog, QuestionKind};
pub use summary::{QuestionSummary, ids};
pub use visibility::{VisibilityMap, resolve_visibility};
