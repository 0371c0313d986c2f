//! Retrieval error types.

use thiserror::Error;

use lingua_embeddings::EmbeddingError;

/// Errors that can occur while building the index or answering a query.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The embedder failed (model load or encoding)
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Search was attempted before any documents were indexed
    #[error("Index is empty: build the index before searching")]
    EmptyIndex,

    /// Query text is empty or blank
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// top_k must be a positive integer
    #[error("Invalid top_k: must be > 0")]
    InvalidTopK,

    /// Corpus failed validation
    #[error("Invalid corpus: {0}")]
    InvalidCorpus(String),

    /// Vectors of different dimensions were compared
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
