//! Deterministic hashing embedder.
//!
//! Feature-hashes lowercase word tokens into a fixed number of buckets and
//! normalizes the result. Texts that share words get similar vectors, which
//! is enough to exercise ranking without loading a neural model.

use crate::error::EmbeddingError;
use crate::model::{Embedding, EmbeddingModel, ModelInfo};

/// Default number of buckets, matching the real model's dimension
pub const DEFAULT_HASH_DIM: usize = 384;

/// Tokens beyond this count are ignored
pub const DEFAULT_HASH_MAX_TOKENS: usize = 512;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Stub embedder for tests and offline runs.
pub struct HashEmbedder {
    info: ModelInfo,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            info: ModelInfo {
                name: "hash-embedder".to_string(),
                dimension,
                max_sequence_length: DEFAULT_HASH_MAX_TOKENS,
            },
        }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_DIM)
    }
}

fn fnv1a(token: &str) -> u64 {
    token.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

impl EmbeddingModel for HashEmbedder {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        if self.info.dimension == 0 {
            return Err(EmbeddingError::Encoding(
                "hash embedder has zero dimension".to_string(),
            ));
        }
        let mut values = vec![0.0f32; self.info.dimension];
        for token in tokens(text).take(self.info.max_sequence_length) {
            let bucket = (fnv1a(&token) % self.info.dimension as u64) as usize;
            values[bucket] += 1.0;
        }
        Ok(Embedding::new(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_text_same_vector() {
        let embedder = HashEmbedder::default();
        let a = embedder.embed("Ceol traidisiúnta na hÉireann").unwrap();
        let b = embedder.embed("Ceol traidisiúnta na hÉireann").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.dimension(), DEFAULT_HASH_DIM);
    }

    #[test]
    fn test_case_and_punctuation_ignored() {
        let embedder = HashEmbedder::new(64);
        let a = embedder.embed("Tour Eiffel!").unwrap();
        let b = embedder.embed("tour, eiffel").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let embedder = HashEmbedder::new(32);
        let emb = embedder.embed("paella gazpacho tapas").unwrap();
        assert!((emb.norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_blank_text_is_zero_vector() {
        let embedder = HashEmbedder::new(16);
        let emb = embedder.embed("  ...  ").unwrap();
        assert_eq!(emb.norm(), 0.0);
    }

    #[test]
    fn test_zero_dimension_is_encoding_error() {
        let embedder = HashEmbedder::new(0);
        assert!(matches!(
            embedder.embed("hola"),
            Err(EmbeddingError::Encoding(_))
        ));
    }

    #[test]
    fn test_empty_batch() {
        let embedder = HashEmbedder::default();
        assert!(embedder.embed_batch(&[]).unwrap().is_empty());
    }
}
