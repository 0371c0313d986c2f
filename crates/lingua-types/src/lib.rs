//! # lingua-types
//!
//! Shared domain types for lingua-rag.
//!
//! - Documents and the language-grouped corpus, including the built-in
//!   Irish/French/Spanish collection
//! - Search results and their relevance bands
//! - Settings: layered configuration
//!
//! ## Usage
//!
//! ```rust
//! use lingua_types::Corpus;
//!
//! let corpus = Corpus::builtin();
//! assert_eq!(corpus.len(), 9);
//! ```

pub mod config;
pub mod corpus;
pub mod error;
pub mod result;

pub use config::{Settings, DEFAULT_MODEL_REPO, DEFAULT_TOP_K};
pub use corpus::{Corpus, Document, LanguageGroup, BUILTIN_DOCUMENTS};
pub use error::LinguaError;
pub use result::{Relevance, SearchResult, HIGH_RELEVANCE_THRESHOLD, MEDIUM_RELEVANCE_THRESHOLD};
