//! Error types shared across lingua-rag crates.

use thiserror::Error;

/// Unified error type for configuration and domain validation.
#[derive(Debug, Error)]
pub enum LinguaError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
