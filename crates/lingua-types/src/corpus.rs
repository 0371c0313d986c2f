//! Documents and the language-grouped corpus.
//!
//! A corpus is an ordered list of language groups. Flattening it yields
//! documents in group order, then in-group order, and that order fixes each
//! document's position for the lifetime of the index built from it.

use serde::{Deserialize, Serialize};

use crate::error::LinguaError;

/// An immutable text snippet with its language label and corpus position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Position in the flattened corpus (0-based)
    pub position: usize,
    /// Language label, e.g. "Irish"
    pub language: String,
    /// Snippet text
    pub text: String,
}

impl Document {
    pub fn new(position: usize, language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            position,
            language: language.into(),
            text: text.into(),
        }
    }
}

/// Snippets sharing a language label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageGroup {
    pub language: String,
    pub texts: Vec<String>,
}

/// Ordered collection of language groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    groups: Vec<LanguageGroup>,
}

impl Corpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from `(language, texts)` pairs, keeping their order.
    pub fn from_groups<L, T, I>(groups: I) -> Self
    where
        L: Into<String>,
        T: Into<String>,
        I: IntoIterator<Item = (L, Vec<T>)>,
    {
        let mut corpus = Self::new();
        for (language, texts) in groups {
            corpus.push_group(language, texts);
        }
        corpus
    }

    /// The multilingual collection shipped with the application.
    pub fn builtin() -> Self {
        Self::from_groups(
            BUILTIN_DOCUMENTS
                .iter()
                .map(|(language, texts)| (*language, texts.to_vec())),
        )
    }

    /// Append a group. Texts for a label already present are appended to
    /// that group so labels stay unique.
    pub fn push_group<T: Into<String>>(&mut self, language: impl Into<String>, texts: Vec<T>) {
        let language = language.into();
        let texts = texts.into_iter().map(Into::into);
        match self.groups.iter_mut().find(|g| g.language == language) {
            Some(group) => group.texts.extend(texts),
            None => self.groups.push(LanguageGroup {
                language,
                texts: texts.collect(),
            }),
        }
    }

    pub fn groups(&self) -> &[LanguageGroup] {
        &self.groups
    }

    /// Number of distinct language labels.
    pub fn language_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of documents across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.texts.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into positioned documents.
    pub fn documents(&self) -> Vec<Document> {
        self.groups
            .iter()
            .flat_map(|g| g.texts.iter().map(move |t| (g.language.as_str(), t.as_str())))
            .enumerate()
            .map(|(position, (language, text))| Document::new(position, language, text))
            .collect()
    }

    /// Reject a corpus that has no documents or contains blank snippets.
    pub fn validate(&self) -> Result<(), LinguaError> {
        if self.is_empty() {
            return Err(LinguaError::InvalidInput("corpus has no documents".to_string()));
        }
        for group in &self.groups {
            if group.language.trim().is_empty() {
                return Err(LinguaError::InvalidInput(
                    "language label must not be blank".to_string(),
                ));
            }
            if let Some(i) = group.texts.iter().position(|t| t.trim().is_empty()) {
                return Err(LinguaError::InvalidInput(format!(
                    "{} document {} is blank",
                    group.language, i
                )));
            }
        }
        Ok(())
    }
}

/// Built-in snippets, grouped by language.
pub const BUILTIN_DOCUMENTS: &[(&str, &[&str])] = &[
    (
        "Irish",
        &[
            "Ceol traidisiúnta na hÉireann: an bodhrán, an fheadóg stáin, agus na píobaí uilleann. Seanfhocal: 'Is fearr Gaeilge bhriste ná Béarla cliste'.",
            "Miotaseolaíocht Éireannach: Tuatha Dé Danann agus laochra cosúil le Cú Chulainn. Údair: James Joyce, W.B. Yeats, Samuel Beckett.",
            "Aillte an Mhothair: 214 méadar ar airde. Clochán na bhFomhórach: 40,000 colún basalt. Sí an Bhrú: tuama pasáiste 5,000 bliain d'aois.",
        ],
    ),
    (
        "French",
        &[
            "La cuisine française est patrimoine de l'UNESCO. Plats célèbres: coq au vin, bouillabaisse, ratatouille. La France a plus de 400 fromages comme le camembert et le roquefort.",
            "La culture française: philosophes comme Descartes et Voltaire. L'Académie française, fondée en 1635, préserve la langue française.",
            "Monuments parisiens: Tour Eiffel (1889), cathédrale Notre-Dame, musée du Louvre qui abrite la Joconde.",
        ],
    ),
    (
        "Spanish",
        &[
            "El español lo hablan más de 500 millones de personas. Miguel de Cervantes escribió Don Quijote, considerada la primera novela moderna.",
            "Arte español: Picasso, Dalí y Miró. El flamenco de Andalucía combina cante, baile y guitarra como patrimonio de la UNESCO.",
            "La Sagrada Familia y el Park Güell de Gaudí muestran arquitectura modernista única. Cocina española: paella, gazpacho y tapas.",
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_corpus_shape() {
        let corpus = Corpus::builtin();
        assert_eq!(corpus.len(), 9);
        assert_eq!(corpus.language_count(), 3);
        let labels: Vec<&str> = corpus.groups().iter().map(|g| g.language.as_str()).collect();
        assert_eq!(labels, vec!["Irish", "French", "Spanish"]);
        assert!(corpus.validate().is_ok());
    }

    #[test]
    fn test_documents_positions_follow_group_order() {
        let corpus = Corpus::from_groups(vec![("A", vec!["a0", "a1"]), ("B", vec!["b0"])]);
        let docs = corpus.documents();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0], Document::new(0, "A", "a0"));
        assert_eq!(docs[1], Document::new(1, "A", "a1"));
        assert_eq!(docs[2], Document::new(2, "B", "b0"));
    }

    #[test]
    fn test_push_group_merges_same_label() {
        let mut corpus = Corpus::new();
        corpus.push_group("French", vec!["un"]);
        corpus.push_group("Spanish", vec!["uno"]);
        corpus.push_group("French", vec!["deux"]);
        assert_eq!(corpus.language_count(), 2);
        assert_eq!(corpus.groups()[0].texts, vec!["un", "deux"]);
    }

    #[test]
    fn test_validate_rejects_empty_corpus() {
        assert!(Corpus::new().validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_document() {
        let corpus = Corpus::from_groups(vec![("Irish", vec!["Dia duit", "   "])]);
        let err = corpus.validate().unwrap_err();
        assert!(err.to_string().contains("Irish document 1"));
    }
}
