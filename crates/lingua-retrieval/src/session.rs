//! Session context owning the embedder and the built index.
//!
//! A front end creates one `RagSession`, calls `initialize` once with the
//! corpus, then `query` for every user question.

use std::sync::Arc;

use tracing::info;

use lingua_embeddings::EmbeddingModel;
use lingua_types::{Corpus, SearchResult};

use crate::error::RetrievalError;
use crate::retriever::Retriever;

/// Summary of what a session has indexed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Total documents indexed
    pub document_count: usize,
    /// Embedding dimension of the index
    pub dimension: usize,
    /// Documents per language label, in corpus order
    pub languages: Vec<(String, usize)>,
}

impl SessionStats {
    pub fn language_count(&self) -> usize {
        self.languages.len()
    }
}

/// Explicit owner of the loaded model and the corpus index.
pub struct RagSession {
    retriever: Retriever,
    languages: Vec<(String, usize)>,
}

impl RagSession {
    pub fn new(embedder: Arc<dyn EmbeddingModel>) -> Self {
        Self {
            retriever: Retriever::new(embedder),
            languages: Vec::new(),
        }
    }

    /// Validate and index `corpus`, returning the number of documents.
    pub fn initialize(&mut self, corpus: &Corpus) -> Result<usize, RetrievalError> {
        corpus
            .validate()
            .map_err(|e| RetrievalError::InvalidCorpus(e.to_string()))?;

        let count = self.retriever.build_index(corpus.documents())?;
        self.languages = corpus
            .groups()
            .iter()
            .map(|g| (g.language.clone(), g.texts.len()))
            .collect();

        info!(
            documents = count,
            languages = self.languages.len(),
            model = %self.retriever.embedder().info().name,
            "Session initialized"
        );
        Ok(count)
    }

    /// Answer one user question.
    pub fn query(&self, text: &str, top_k: usize) -> Result<Vec<SearchResult>, RetrievalError> {
        self.retriever.search(text, top_k)
    }

    pub fn is_initialized(&self) -> bool {
        self.retriever.is_indexed()
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    pub fn stats(&self) -> SessionStats {
        let index = self.retriever.stats();
        SessionStats {
            document_count: index.document_count,
            dimension: index.dimension,
            languages: self.languages.clone(),
        }
    }
}
