//! Model file caching.
//!
//! Downloads and caches model files from HuggingFace Hub.

use std::path::PathBuf;
use tracing::{debug, info};

use lingua_types::{Settings, DEFAULT_MODEL_REPO};

use crate::error::EmbeddingError;

/// Required model files
pub const MODEL_FILES: &[&str] = &["config.json", "tokenizer.json", "model.safetensors"];

/// Model cache configuration
#[derive(Debug, Clone)]
pub struct ModelCache {
    /// Cache directory path
    pub cache_dir: PathBuf,
    /// Model repository ID
    pub repo_id: String,
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl ModelCache {
    /// Create a new model cache with custom settings
    pub fn new(cache_dir: impl Into<PathBuf>, repo_id: impl Into<String>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            repo_id: repo_id.into(),
        }
    }

    /// Cache for the repository and directory named in the settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.expanded_cache_dir(), settings.model_repo.clone())
    }

    /// Short model name: the last segment of the repository ID
    pub fn model_name(&self) -> &str {
        self.repo_id.rsplit('/').next().unwrap_or(DEFAULT_MODEL_REPO)
    }

    /// Get the model directory path
    pub fn model_dir(&self) -> PathBuf {
        self.cache_dir.join(self.repo_id.replace('/', "_"))
    }

    /// Check if all model files are cached
    pub fn is_cached(&self) -> bool {
        let model_dir = self.model_dir();
        MODEL_FILES.iter().all(|f| model_dir.join(f).exists())
    }

    /// Get path to a specific model file
    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.model_dir().join(filename)
    }

    /// Paths the model files occupy inside this cache
    pub fn paths(&self) -> ModelPaths {
        ModelPaths {
            config: self.file_path("config.json"),
            tokenizer: self.file_path("tokenizer.json"),
            weights: self.file_path("model.safetensors"),
        }
    }
}

/// Paths to model files
#[derive(Debug, Clone)]
pub struct ModelPaths {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

/// Get or download model files.
///
/// Returns paths to config.json, tokenizer.json, and model.safetensors.
pub fn get_or_download_model(cache: &ModelCache) -> Result<ModelPaths, EmbeddingError> {
    if cache.is_cached() {
        debug!(path = ?cache.model_dir(), "Using cached model");
    } else {
        info!(repo = %cache.repo_id, "Downloading model files...");
        download_model_files(cache)?;
    }

    Ok(cache.paths())
}

/// Download model files from HuggingFace Hub
fn download_model_files(cache: &ModelCache) -> Result<(), EmbeddingError> {
    use hf_hub::api::sync::Api;

    let api = Api::new().map_err(|e| EmbeddingError::Download(e.to_string()))?;
    let repo = api.model(cache.repo_id.clone());

    std::fs::create_dir_all(cache.model_dir())?;

    for filename in MODEL_FILES {
        info!(file = filename, "Downloading...");
        let source_path = repo
            .get(filename)
            .map_err(|e| EmbeddingError::Download(format!("{}: {}", filename, e)))?;

        let dest_path = cache.file_path(filename);
        std::fs::copy(&source_path, &dest_path)?;
        debug!(file = filename, "Downloaded to {:?}", dest_path);
    }

    Ok(())
}
