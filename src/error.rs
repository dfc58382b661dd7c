//! Error types for the classifier.

use thiserror::Error;

/// Errors surfaced by the engine and its persistence layer.
#[derive(Error, Debug)]
pub enum BayesError {
    /// A pool referenced by name does not exist.
    #[error("pool not found: {name}")]
    PoolNotFound { name: String },

    /// Input or snapshot data that breaks a pool invariant.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary encoding error: {0}")]
    Encode(#[from] bincode::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

impl BayesError {
    pub(crate) fn pool_not_found(name: &str) -> Self {
        Self::PoolNotFound {
            name: name.to_string(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Result type alias for classifier operations.
pub type Result<T> = std::result::Result<T, BayesError>;
