//! Embedding error types.

use thiserror::Error;

/// Errors that can occur while loading a model or encoding text.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Model could not be initialized (bad config, corrupt weights, unsupported model)
    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    /// Model files could not be fetched
    #[error("Failed to download model: {0}")]
    Download(String),

    /// Text could not be turned into a vector
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Candle tensor error
    #[error("Candle error: {0}")]
    Candle(#[from] candle_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EmbeddingError {
    /// True for failures that happen while acquiring the model. These are
    /// fatal at startup; everything else is a per-call encoding failure.
    pub fn is_model_load(&self) -> bool {
        matches!(
            self,
            EmbeddingError::ModelLoad(_) | EmbeddingError::Download(_) | EmbeddingError::Io(_)
        )
    }
}
