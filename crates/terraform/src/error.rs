use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("module '{0}' is contributed more than once")]
    DuplicateModule(String),
    #[error("output '{0}' is declared more than once")]
    DuplicateOutput(String),
    #[error("description template error: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("description render error: {0}")]
    Render(#[from] handlebars::RenderError),
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, AssembleError>;
