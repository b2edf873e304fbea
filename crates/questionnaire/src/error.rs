use thiserror::Error;

/// Contract violations between the question catalog, the answers and the engine.
#[derive(Debug, Error)]
pub enum QuestionnaireError {
    #[error("question '{0}' is not in the catalog")]
    UnknownQuestion(String),
    #[error("question '{question_id}' has no option '{value}'")]
    InvalidOption { question_id: String, value: String },
    #[error("question '{question_id}' expects {expected}")]
    AnswerShape {
        question_id: String,
        expected: &'static str,
    },
    #[error("question '{question_id}' of type '{kind}' has no handler for {context}")]
    UnsupportedQuestionType {
        question_id: String,
        kind: &'static str,
        context: &'static str,
    },
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    #[error("questionnaire is incomplete; '{0}' still needs an answer")]
    Incomplete(String),
    #[error("question '{0}' is hidden by the catalog conditions but the summary needs its answer")]
    HiddenQuestion(String),
    #[error("failed to parse catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QuestionnaireError>;
