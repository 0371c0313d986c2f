//! End-to-end cross-lingual search with the real multilingual model.
//!
//! NOTE: These tests require paraphrase-multilingual-MiniLM-L12-v2
//! (~470MB download on first run). The model is cached locally after the
//! first download. Run with:
//!   cargo test -p e2e-tests --test multilingual_search_test -- --ignored --nocapture

use std::sync::{Arc, OnceLock};

use pretty_assertions::assert_eq;

use e2e_tests::{assert_descending, assert_unique_positions, session_with};
use lingua_embeddings::{CandleEmbedder, EmbeddingModel, EMBEDDING_DIM};
use lingua_retrieval::RagSession;
use lingua_types::{Corpus, DEFAULT_TOP_K};

/// Shared embedder across tests to avoid concurrent model loading.
static EMBEDDER: OnceLock<Arc<CandleEmbedder>> = OnceLock::new();

fn get_embedder() -> Arc<CandleEmbedder> {
    EMBEDDER
        .get_or_init(|| {
            let embedder =
                CandleEmbedder::load_default().expect("Failed to load embedding model");
            Arc::new(embedder)
        })
        .clone()
}

fn builtin_session() -> RagSession {
    let embedder: Arc<dyn EmbeddingModel> = get_embedder();
    session_with(embedder, &Corpus::builtin())
}

#[test]
#[ignore = "requires model download"]
fn test_traditional_music_query_finds_irish_snippet() {
    let session = builtin_session();
    assert_eq!(session.stats().document_count, 9);
    assert_eq!(session.stats().dimension, EMBEDDING_DIM);

    let results = session
        .query("Tell me about traditional music", DEFAULT_TOP_K)
        .expect("Search failed");

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].language, "Irish");
    assert_eq!(results[0].position, 0);
    assert_descending(&results);
    assert_unique_positions(&results);
}

#[test]
#[ignore = "requires model download"]
fn test_exact_document_text_scores_near_one() {
    let session = builtin_session();
    for doc in Corpus::builtin().documents() {
        let results = session.query(&doc.text, 1).expect("Search failed");
        assert_eq!(results[0].position, doc.position);
        assert!(
            results[0].score > 0.99,
            "document {} scored {} against itself",
            doc.position,
            results[0].score
        );
    }
}

#[test]
#[ignore = "requires model download"]
fn test_cross_lingual_queries_hit_expected_documents() {
    let session = builtin_session();

    let cases = [
        // English query, French monument snippet
        ("Which famous monuments are in Paris?", 5),
        // English query, Spanish literature snippet
        ("Who wrote Don Quixote?", 6),
        // Irish-language topic asked in Spanish
        ("Mitología irlandesa y héroes legendarios", 1),
    ];

    for (query, expected_position) in cases {
        let results = session.query(query, DEFAULT_TOP_K).expect("Search failed");
        assert!(
            results.iter().any(|r| r.position == expected_position),
            "query {:?} should retrieve document {} in the top {}, got {:?}",
            query,
            expected_position,
            DEFAULT_TOP_K,
            results.iter().map(|r| r.position).collect::<Vec<_>>()
        );
    }
}

#[test]
#[ignore = "requires model download"]
fn test_repeated_queries_are_deterministic() {
    let session = builtin_session();
    let first = session.query("flamenco y guitarra", 9).expect("Search failed");
    let second = session.query("flamenco y guitarra", 9).expect("Search failed");
    assert_eq!(first, second);
}
