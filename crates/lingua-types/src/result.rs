//! Search result types.

use serde::{Deserialize, Serialize};

use crate::corpus::Document;

/// Score above which a hit is shown as highly relevant.
pub const HIGH_RELEVANCE_THRESHOLD: f32 = 0.7;

/// Score above which a hit is shown as moderately relevant.
pub const MEDIUM_RELEVANCE_THRESHOLD: f32 = 0.5;

/// Display band for a similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relevance {
    High,
    Medium,
    Low,
}

impl Relevance {
    /// Classify a cosine similarity score. Both thresholds are exclusive.
    pub fn from_score(score: f32) -> Self {
        if score > HIGH_RELEVANCE_THRESHOLD {
            Relevance::High
        } else if score > MEDIUM_RELEVANCE_THRESHOLD {
            Relevance::Medium
        } else {
            Relevance::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Relevance::High => "high",
            Relevance::Medium => "medium",
            Relevance::Low => "low",
        }
    }
}

impl std::fmt::Display for Relevance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ranked hit: document text plus its cosine similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Document text
    pub text: String,
    /// Cosine similarity in [-1.0, 1.0]
    pub score: f32,
    /// Language label of the matched document
    pub language: String,
    /// Position of the document in the corpus
    pub position: usize,
}

impl SearchResult {
    pub fn new(document: &Document, score: f32) -> Self {
        Self {
            text: document.text.clone(),
            score,
            language: document.language.clone(),
            position: document.position,
        }
    }

    pub fn relevance(&self) -> Relevance {
        Relevance::from_score(self.score)
    }
}
