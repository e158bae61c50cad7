//! Error type for persistence and configuration

use std::path::PathBuf;

/// Everything the meter can fail at. Scoring and updates are infallible.
#[derive(Debug, thiserror::Error)]
pub enum MeterError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Serialisation error: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MeterError {
    /// Wrap an IO error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MeterError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, MeterError>;
