//! Error types for the grid engine.
use thiserror::Error;

/// Top-level engine error type.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Unknown column group: {0}")]
    UnknownGroup(String),

    #[error("Unknown row: {0}")]
    UnknownRow(String),

    #[error("Column pinning is disabled")]
    PinningDisabled,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Dataset I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Client-side validation failure surfaced inline at the editing cell.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,
}

/// Rejection reported by a save sink or the save worker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Save failed: {message}")]
pub struct SaveError {
    pub message: String,
}

impl SaveError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failures raised by the analytics client lifecycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Analytics is disabled")]
    Disabled,

    #[error("Analytics token is missing")]
    MissingToken,

    #[error("Analytics sink error: {0}")]
    Sink(String),
}
