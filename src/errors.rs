use thiserror::Error;

/// Error type for the collaborators around the forecast core.
///
/// The projection pipeline itself never fails; these variants cover snapshot
/// loading, configuration and model validation.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Table source failed: {0}")]
    Source(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
