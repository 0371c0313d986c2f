//! Embedding model trait and types.
//!
//! Defines the interface for turning text into vectors. Retrieval code only
//! sees this trait, so the real model and the test stub are interchangeable.

use crate::error::EmbeddingError;

/// Vector embedding of a single text.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    /// The embedding vector
    pub values: Vec<f32>,
}

impl Embedding {
    /// Create a new embedding from a vector.
    /// Normalizes the vector to unit length; a zero vector stays zero.
    pub fn new(values: Vec<f32>) -> Self {
        let norm = l2_norm(&values);
        let normalized = if norm > 0.0 {
            values.iter().map(|x| x / norm).collect()
        } else {
            values
        };
        Self { values: normalized }
    }

    /// Create embedding without normalization
    pub fn from_raw(values: Vec<f32>) -> Self {
        Self { values }
    }

    /// Get the embedding dimension
    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// Euclidean length of the vector
    pub fn norm(&self) -> f32 {
        l2_norm(&self.values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

fn l2_norm(values: &[f32]) -> f32 {
    values.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Model information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// Model name (e.g., "paraphrase-multilingual-MiniLM-L12-v2")
    pub name: String,
    /// Embedding dimension
    pub dimension: usize,
    /// Maximum sequence length in tokens; longer inputs are truncated
    pub max_sequence_length: usize,
}

/// Trait for embedding models.
///
/// Encoding is deterministic for a given loaded instance: the same text
/// always produces the same vector. Implementations must be Send + Sync so a
/// loaded model can be shared behind an `Arc`.
pub trait EmbeddingModel: Send + Sync {
    /// Get model information
    fn info(&self) -> &ModelInfo;

    /// Generate embedding for a single text.
    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;

    /// Generate embeddings for multiple texts (batch), one per input, in order.
    /// An empty input yields an empty output.
    /// Default implementation calls embed() for each text.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }
}
