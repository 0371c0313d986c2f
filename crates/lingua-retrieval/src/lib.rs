//! # lingua-retrieval
//!
//! Semantic retrieval over a small multilingual corpus.
//!
//! Documents are embedded once into an in-memory index; each query is
//! embedded, scored against every stored vector by cosine similarity, and
//! the top-k hits are returned best first. The corpus is tiny, so the scan
//! is exhaustive.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use lingua_embeddings::HashEmbedder;
//! use lingua_retrieval::RagSession;
//! use lingua_types::{Corpus, DEFAULT_TOP_K};
//!
//! let mut session = RagSession::new(Arc::new(HashEmbedder::default()));
//! let count = session.initialize(&Corpus::builtin()).unwrap();
//! assert_eq!(count, 9);
//!
//! let results = session.query("flamenco guitarra", DEFAULT_TOP_K).unwrap();
//! assert_eq!(results.len(), DEFAULT_TOP_K);
//! ```

pub mod error;
pub mod retriever;
pub mod session;
pub mod similarity;

pub use error::RetrievalError;
pub use retriever::{IndexStats, Retriever};
pub use session::{RagSession, SessionStats};
pub use similarity::{cosine_similarity, rank_descending};
