//! Candle-based embedding implementation.
//!
//! Runs a BERT sentence-transformers model (by default
//! paraphrase-multilingual-MiniLM-L12-v2, 384 dimensions) on CPU with
//! attention-masked mean pooling.

use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use serde::Deserialize;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use lingua_types::Settings;

use crate::cache::{get_or_download_model, ModelCache, ModelPaths};
use crate::error::EmbeddingError;
use crate::model::{Embedding, EmbeddingModel, ModelInfo};

/// Embedding dimension of the default multilingual model
pub const EMBEDDING_DIM: usize = 384;

/// Maximum sequence length used by the default model
pub const MAX_SEQ_LENGTH: usize = 128;

/// Shape parameters read from config.json. The candle config keeps its
/// fields private, so these are deserialized separately.
#[derive(Debug, Deserialize)]
struct ModelShape {
    hidden_size: usize,
    max_position_embeddings: usize,
}

/// Candle-based embedder for BERT sentence-transformers models.
pub struct CandleEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    pad_id: u32,
    info: ModelInfo,
}

impl CandleEmbedder {
    /// Load the embedding model from cache (downloading if needed).
    pub fn load(cache: &ModelCache, max_sequence_length: usize) -> Result<Self, EmbeddingError> {
        let paths = get_or_download_model(cache)?;
        Self::load_from_paths(cache.model_name(), &paths, max_sequence_length)
    }

    /// Load with default cache settings
    pub fn load_default() -> Result<Self, EmbeddingError> {
        Self::load(&ModelCache::default(), MAX_SEQ_LENGTH)
    }

    /// Load the model named in the settings
    pub fn from_settings(settings: &Settings) -> Result<Self, EmbeddingError> {
        Self::load(
            &ModelCache::from_settings(settings),
            settings.max_sequence_length,
        )
    }

    /// Load from explicit file paths
    pub fn load_from_paths(
        name: &str,
        paths: &ModelPaths,
        max_sequence_length: usize,
    ) -> Result<Self, EmbeddingError> {
        info!(model = name, "Loading embedding model...");

        let device = Device::Cpu;

        let config_str = std::fs::read_to_string(&paths.config)?;
        let config: BertConfig = serde_json::from_str(&config_str)
            .map_err(|e| EmbeddingError::ModelLoad(format!("Invalid config: {}", e)))?;
        let shape: ModelShape = serde_json::from_str(&config_str)
            .map_err(|e| EmbeddingError::ModelLoad(format!("Invalid config: {}", e)))?;

        let mut tokenizer = load_tokenizer(&paths.tokenizer)?;
        let pad_id = tokenizer
            .token_to_id("<pad>")
            .or_else(|| tokenizer.token_to_id("[PAD]"))
            .unwrap_or(0);
        // Padding and truncation are applied here, per batch
        tokenizer.with_padding(None);
        tokenizer
            .with_truncation(None)
            .map_err(|e| EmbeddingError::ModelLoad(format!("Tokenizer setup: {}", e)))?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(
                std::slice::from_ref(&paths.weights),
                DType::F32,
                &device,
            )
        }
        .map_err(|e| EmbeddingError::ModelLoad(format!("Invalid weights: {}", e)))?;

        let model = BertModel::load(vb, &config)
            .map_err(|e| EmbeddingError::ModelLoad(format!("Unsupported model: {}", e)))?;

        let max_sequence_length = max_sequence_length.min(shape.max_position_embeddings);

        info!(
            dim = shape.hidden_size,
            max_seq = max_sequence_length,
            "Model loaded successfully"
        );

        Ok(Self {
            model,
            tokenizer,
            device,
            pad_id,
            info: ModelInfo {
                name: name.to_string(),
                dimension: shape.hidden_size,
                max_sequence_length,
            },
        })
    }

    /// Mean pooling over token embeddings (excluding padding)
    fn mean_pooling(
        &self,
        embeddings: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor, EmbeddingError> {
        let mask = attention_mask
            .unsqueeze(2)?
            .broadcast_as(embeddings.shape())?;
        let mask_f32 = mask.to_dtype(DType::F32)?;

        let masked = embeddings.broadcast_mul(&mask_f32)?;
        let sum = masked.sum(1)?;

        let mask_sum = mask_f32.sum(1)?;
        let mask_sum = mask_sum.clamp(1e-9, f64::MAX)?;

        let mean = sum.broadcast_div(&mask_sum)?;
        Ok(mean)
    }
}

fn load_tokenizer(path: &Path) -> Result<Tokenizer, EmbeddingError> {
    Tokenizer::from_file(path).map_err(|e| EmbeddingError::ModelLoad(format!("Tokenizer: {}", e)))
}

/// Cut a token sequence down to `max_len`, keeping its final token (the
/// end-of-sequence marker). Returns the original length when truncated.
fn truncate_tokens(ids: &mut Vec<u32>, mask: &mut Vec<u32>, max_len: usize) -> Option<usize> {
    let original = ids.len();
    if original <= max_len || max_len == 0 {
        return None;
    }
    let last_id = ids[original - 1];
    let last_mask = mask[original - 1];
    ids.truncate(max_len);
    mask.truncate(max_len);
    ids[max_len - 1] = last_id;
    mask[max_len - 1] = last_mask;
    Some(original)
}

impl EmbeddingModel for CandleEmbedder {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        self.embed_batch(&[text])?
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::Encoding("model returned no embedding".to_string()))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        debug!(count = texts.len(), "Embedding batch");

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmbeddingError::Encoding(e.to_string()))?;

        let max_seq = self.info.max_sequence_length;
        let mut input_ids: Vec<Vec<u32>> = Vec::with_capacity(encodings.len());
        let mut attention_masks: Vec<Vec<u32>> = Vec::with_capacity(encodings.len());

        for (i, encoding) in encodings.iter().enumerate() {
            let mut ids = encoding.get_ids().to_vec();
            let mut mask = encoding.get_attention_mask().to_vec();
            if let Some(original) = truncate_tokens(&mut ids, &mut mask, max_seq) {
                warn!(
                    index = i,
                    tokens = original,
                    max_seq,
                    "Input exceeds model context, truncating"
                );
            }
            input_ids.push(ids);
            attention_masks.push(mask);
        }

        let max_len = input_ids.iter().map(Vec::len).max().unwrap_or(0);
        if max_len == 0 {
            return Err(EmbeddingError::Encoding(
                "tokenizer produced no tokens".to_string(),
            ));
        }

        for (ids, mask) in input_ids.iter_mut().zip(attention_masks.iter_mut()) {
            ids.resize(max_len, self.pad_id);
            mask.resize(max_len, 0);
        }

        let batch_size = texts.len();
        let input_ids_flat: Vec<u32> = input_ids.into_iter().flatten().collect();
        let mask_flat: Vec<u32> = attention_masks.into_iter().flatten().collect();

        let input_ids = Tensor::from_vec(input_ids_flat, (batch_size, max_len), &self.device)?;
        let attention_mask = Tensor::from_vec(mask_flat, (batch_size, max_len), &self.device)?;
        let token_type_ids = Tensor::zeros_like(&input_ids)?;

        let output = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;

        let pooled = self.mean_pooling(&output, &attention_mask)?;
        let pooled_vec: Vec<Vec<f32>> = pooled.to_vec2()?;

        let embeddings: Vec<Embedding> = pooled_vec.into_iter().map(Embedding::new).collect();

        debug!(
            count = embeddings.len(),
            dim = self.info.dimension,
            "Batch complete"
        );

        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_truncate_keeps_final_token() {
        let mut ids = vec![0, 11, 12, 13, 14, 2];
        let mut mask = vec![1; 6];
        let original = truncate_tokens(&mut ids, &mut mask, 4);
        assert_eq!(original, Some(6));
        assert_eq!(ids, vec![0, 11, 12, 2]);
        assert_eq!(mask, vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_truncate_short_input_untouched() {
        let mut ids = vec![0, 11, 2];
        let mut mask = vec![1; 3];
        assert_eq!(truncate_tokens(&mut ids, &mut mask, 4), None);
        assert_eq!(ids, vec![0, 11, 2]);
    }

    #[test]
    fn test_load_from_missing_files_fails_as_model_load() {
        let temp = TempDir::new().unwrap();
        let cache = ModelCache::new(temp.path(), "test/model");
        let err = CandleEmbedder::load_from_paths("model", &cache.paths(), MAX_SEQ_LENGTH)
            .err()
            .unwrap();
        assert!(err.is_model_load());
    }

    #[test]
    fn test_load_from_corrupt_config_fails_as_model_load() {
        let temp = TempDir::new().unwrap();
        let cache = ModelCache::new(temp.path(), "test/model");
        std::fs::create_dir_all(cache.model_dir()).unwrap();
        std::fs::write(cache.file_path("config.json"), b"{ not json").unwrap();
        let err = CandleEmbedder::load_from_paths("model", &cache.paths(), MAX_SEQ_LENGTH)
            .err()
            .unwrap();
        assert!(matches!(err, EmbeddingError::ModelLoad(_)));
    }

    // Tests below require model download, run with:
    // cargo test -p lingua-embeddings -- --ignored

    #[test]
    #[ignore = "requires model download"]
    fn test_load_model() {
        let embedder = CandleEmbedder::load_default().unwrap();
        assert_eq!(embedder.info().dimension, EMBEDDING_DIM);
        assert_eq!(embedder.info().max_sequence_length, MAX_SEQ_LENGTH);
    }

    #[test]
    #[ignore = "requires model download"]
    fn test_embed_batch() {
        let embedder = CandleEmbedder::load_default().unwrap();
        let texts = vec!["Dia duit", "Bonjour", "Hola"];
        let embeddings = embedder.embed_batch(&texts).unwrap();
        assert_eq!(embeddings.len(), 3);
        for emb in &embeddings {
            assert_eq!(emb.dimension(), EMBEDDING_DIM);
        }
    }

    #[test]
    #[ignore = "requires model download"]
    fn test_embed_is_deterministic() {
        let embedder = CandleEmbedder::load_default().unwrap();
        let a = embedder.embed("La cuisine française").unwrap();
        let b = embedder.embed("La cuisine française").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    #[ignore = "requires model download"]
    fn test_long_input_is_truncated_not_rejected() {
        let embedder = CandleEmbedder::load_default().unwrap();
        let long = "ceol ".repeat(2_000);
        let emb = embedder.embed(&long).unwrap();
        assert_eq!(emb.dimension(), EMBEDDING_DIM);
    }

    #[test]
    #[ignore = "requires model download"]
    fn test_translations_are_close() {
        let embedder = CandleEmbedder::load_default().unwrap();
        let en = embedder.embed("The cat sits on the mat").unwrap();
        let fr = embedder.embed("Le chat est assis sur le tapis").unwrap();
        let other = embedder.embed("Stock markets fell sharply today").unwrap();

        let dot = |a: &Embedding, b: &Embedding| -> f32 {
            a.values.iter().zip(&b.values).map(|(x, y)| x * y).sum()
        };
        assert!(dot(&en, &fr) > dot(&en, &other));
    }
}
