//! Brute-force cosine retriever over an in-memory corpus index.
//!
//! The index pairs documents and embeddings positionally and is replaced
//! wholesale by `build_index`. A failed build leaves the previous index in
//! place.

use std::sync::Arc;

use tracing::{debug, info};

use lingua_embeddings::{Embedding, EmbeddingError, EmbeddingModel};
use lingua_types::{Document, SearchResult};

use crate::error::RetrievalError;
use crate::similarity::{cosine_similarity, rank_descending};

/// Documents and their embeddings; `documents[i]` was encoded as `embeddings[i]`.
#[derive(Debug, Clone)]
struct CorpusIndex {
    documents: Vec<Document>,
    embeddings: Vec<Embedding>,
    dimension: usize,
}

/// Index statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of indexed documents
    pub document_count: usize,
    /// Embedding dimension
    pub dimension: usize,
    /// Whether an index has been built
    pub indexed: bool,
}

/// Answers top-k similarity queries against an embedded corpus.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingModel>,
    index: Option<CorpusIndex>,
}

impl Retriever {
    /// Create an unindexed retriever.
    pub fn new(embedder: Arc<dyn EmbeddingModel>) -> Self {
        Self {
            embedder,
            index: None,
        }
    }

    pub fn embedder(&self) -> &Arc<dyn EmbeddingModel> {
        &self.embedder
    }

    /// True once `build_index` has succeeded.
    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    pub fn stats(&self) -> IndexStats {
        match &self.index {
            Some(index) => IndexStats {
                document_count: index.documents.len(),
                dimension: index.dimension,
                indexed: true,
            },
            None => IndexStats::default(),
        }
    }

    /// Embed `documents` and replace the current index with them.
    ///
    /// Returns the number of documents indexed. Nothing is committed unless
    /// every document was encoded with the same dimension.
    pub fn build_index(&mut self, documents: Vec<Document>) -> Result<usize, RetrievalError> {
        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts)?;

        if embeddings.len() != documents.len() {
            return Err(EmbeddingError::Encoding(format!(
                "expected {} embeddings, got {}",
                documents.len(),
                embeddings.len()
            ))
            .into());
        }

        let dimension = embeddings
            .first()
            .map(Embedding::dimension)
            .unwrap_or_else(|| self.embedder.info().dimension);
        if let Some(bad) = embeddings.iter().find(|e| e.dimension() != dimension) {
            return Err(RetrievalError::DimensionMismatch {
                expected: dimension,
                actual: bad.dimension(),
            });
        }

        let count = documents.len();
        self.index = Some(CorpusIndex {
            documents,
            embeddings,
            dimension,
        });

        info!(documents = count, dim = dimension, "Index built");
        Ok(count)
    }

    /// Return up to `top_k` documents most similar to `query`, best first.
    ///
    /// Ties keep corpus order. Fewer than `top_k` results are returned only
    /// when the corpus is smaller than `top_k`.
    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>, RetrievalError> {
        if query.trim().is_empty() {
            return Err(RetrievalError::InvalidQuery(
                "query must not be blank".to_string(),
            ));
        }
        if top_k == 0 {
            return Err(RetrievalError::InvalidTopK);
        }
        self.populated_index()?;

        let query_embedding = self.embedder.embed(query)?;
        self.search_embedding(&query_embedding, top_k)
    }

    /// Rank the index against an already computed query vector.
    pub fn search_embedding(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, RetrievalError> {
        if top_k == 0 {
            return Err(RetrievalError::InvalidTopK);
        }
        let index = self.populated_index()?;
        self.rank(index, query, top_k)
    }

    fn populated_index(&self) -> Result<&CorpusIndex, RetrievalError> {
        match &self.index {
            Some(index) if !index.documents.is_empty() => Ok(index),
            _ => Err(RetrievalError::EmptyIndex),
        }
    }

    fn rank(
        &self,
        index: &CorpusIndex,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, RetrievalError> {
        if query.dimension() != index.dimension {
            return Err(RetrievalError::DimensionMismatch {
                expected: index.dimension,
                actual: query.dimension(),
            });
        }

        let mut scores: Vec<(usize, f32)> = index
            .embeddings
            .iter()
            .enumerate()
            .map(|(i, e)| (i, cosine_similarity(query.as_slice(), e.as_slice())))
            .collect();
        rank_descending(&mut scores);

        let results: Vec<SearchResult> = scores
            .into_iter()
            .take(top_k)
            .map(|(i, score)| SearchResult::new(&index.documents[i], score))
            .collect();

        debug!(
            results = results.len(),
            top_score = results.first().map(|r| r.score),
            "Search complete"
        );
        Ok(results)
    }
}
