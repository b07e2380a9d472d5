//! Error type shared by the model and its input loaders

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// An input combination that makes a formula undefined
    #[error("domain error in `{field}`: {reason}")]
    Domain { field: &'static str, reason: String },

    /// An input outside its permitted range
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown input field: {0}")]
    UnknownField(String),

    #[error("cannot parse `{value}` for field `{field}`")]
    Parse { field: String, value: String },
}

impl ModelError {
    pub fn domain(field: &'static str, reason: impl Into<String>) -> Self {
        ModelError::Domain { field, reason: reason.into() }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ModelError::InvalidInput { field, reason: reason.into() }
    }

    /// True for errors raised by input validation rather than loading
    pub fn is_validation(&self) -> bool {
        matches!(self, ModelError::Domain { .. } | ModelError::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
