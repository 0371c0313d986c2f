//! End-to-end test infrastructure for lingua-rag.
//!
//! Provides session builders and assertion helpers shared by the tests under
//! `tests/`.

use std::collections::HashSet;
use std::sync::Arc;

use lingua_embeddings::{EmbeddingModel, HashEmbedder};
use lingua_retrieval::RagSession;
use lingua_types::{Corpus, SearchResult};

/// Build a session over `corpus` using the given embedder.
///
/// Panics if indexing fails.
pub fn session_with(embedder: Arc<dyn EmbeddingModel>, corpus: &Corpus) -> RagSession {
    let mut session = RagSession::new(embedder);
    session
        .initialize(corpus)
        .expect("Failed to initialize session");
    session
}

/// Session over the built-in corpus backed by the hashing stub.
pub fn stub_session() -> RagSession {
    session_with(Arc::new(HashEmbedder::default()), &Corpus::builtin())
}

/// Assert results are ordered by non-increasing score.
pub fn assert_descending(results: &[SearchResult]) {
    for i in 1..results.len() {
        assert!(
            results[i - 1].score >= results[i].score,
            "Results should be ordered by descending score: result[{}].score={} >= result[{}].score={}",
            i - 1,
            results[i - 1].score,
            i,
            results[i].score
        );
    }
}

/// Assert no document position appears twice.
pub fn assert_unique_positions(results: &[SearchResult]) {
    let mut seen = HashSet::new();
    for r in results {
        assert!(
            seen.insert(r.position),
            "Document at position {} returned twice",
            r.position
        );
    }
}
