//! Error types for bagbatch

use thiserror::Error;

/// Result type alias for bagbatch operations
pub type Result<T> = std::result::Result<T, BagError>;

/// Main error type for bagbatch
#[derive(Error, Debug)]
pub enum BagError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BagError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
