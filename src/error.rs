use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// One data source that could not deliver, kept for the final report.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFailure {
    pub source: String,
    pub reason: String,
}

impl SourceFailure {
    pub fn new(source: impl Into<String>, reason: impl fmt::Display) -> Self {
        SourceFailure {
            source: source.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.reason)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed input: {reason}")]
    MalformedInput {
        reason: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("Unexpected page schema: {0}")]
    Schema(String),

    #[error("HTTP error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Champion pool file '{}' not found", .0.display())]
    PoolNotFound(PathBuf),

    #[error("League client unavailable: {0}")]
    ClientUnavailable(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("All sources failed:{}", join_failures(.0))]
    AllSourcesFailed(Vec<SourceFailure>),
}

impl AppError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        AppError::MalformedInput {
            reason: reason.into(),
            source: None,
        }
    }
}

fn join_failures(failures: &[SourceFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("\n  {}", f))
        .collect()
}
