use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScorecardError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("unknown agent profile: {0}")]
    UnknownProfile(String),

    #[error("parser setup failed: {0}")]
    Parser(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScorecardError>;
