use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Failed to load {key}: {message}")]
    LoadFailed { key: String, message: String },

    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    #[error("Invalid trace at line {line}: {message}")]
    InvalidTrace { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
