//! # lingua-embeddings
//!
//! Local multilingual sentence embeddings for lingua-rag using Candle.
//!
//! ## Features
//! - Local inference via Candle (no Python, no API)
//! - paraphrase-multilingual-MiniLM-L12-v2 by default (384 dimensions)
//! - Automatic model file caching
//! - Explicit truncation of inputs longer than the model context
//! - `HashEmbedder`: a deterministic stand-in for tests and offline runs

pub mod cache;
pub mod candle;
pub mod error;
pub mod hash;
pub mod model;

pub use crate::candle::{CandleEmbedder, EMBEDDING_DIM, MAX_SEQ_LENGTH};
pub use cache::{get_or_download_model, ModelCache, ModelPaths, MODEL_FILES};
pub use error::EmbeddingError;
pub use hash::{HashEmbedder, DEFAULT_HASH_DIM};
pub use model::{Embedding, EmbeddingModel, ModelInfo};
