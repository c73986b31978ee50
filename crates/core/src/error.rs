use thiserror::Error;

/// Failures outside the best-effort extraction path.
#[derive(Error, Debug)]
pub enum PdError {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Unsupported file: {0}")]
    UnsupportedFile(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("{0}")]
    Other(String),
}
