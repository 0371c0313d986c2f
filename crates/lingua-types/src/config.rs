//! Configuration loading for lingua-rag.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at ~/.config/lingua-rag/config.toml.

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::LinguaError;

/// Multilingual sentence-transformers model used when nothing else is configured.
pub const DEFAULT_MODEL_REPO: &str = "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2";

/// Number of results returned per query unless overridden.
pub const DEFAULT_TOP_K: usize = 3;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// HuggingFace repository of the embedding model
    #[serde(default = "default_model_repo")]
    pub model_repo: String,

    /// Directory where model files are cached
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// Inputs longer than this many tokens are truncated before encoding
    #[serde(default = "default_max_sequence_length")]
    pub max_sequence_length: usize,

    /// Number of results per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_model_repo() -> String {
    DEFAULT_MODEL_REPO.to_string()
}

fn default_cache_dir() -> String {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("lingua-rag")
        .join("models")
        .to_string_lossy()
        .to_string()
}

fn default_max_sequence_length() -> usize {
    128
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_repo: default_model_repo(),
            cache_dir: default_cache_dir(),
            max_sequence_length: default_max_sequence_length(),
            top_k: default_top_k(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/lingua-rag/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (LINGUA_*)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, LinguaError> {
        let config_dir = ProjectDirs::from("", "", "lingua-rag")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("model_repo", default_model_repo())
            .map_err(|e| LinguaError::Config(e.to_string()))?
            .set_default("cache_dir", default_cache_dir())
            .map_err(|e| LinguaError::Config(e.to_string()))?
            .set_default("max_sequence_length", default_max_sequence_length() as i64)
            .map_err(|e| LinguaError::Config(e.to_string()))?
            .set_default("top_k", default_top_k() as i64)
            .map_err(|e| LinguaError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| LinguaError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Keys contain underscores, so nesting uses a double separator:
        // LINGUA_MODEL_REPO, LINGUA_TOP_K, LINGUA_MAX_SEQUENCE_LENGTH.
        builder = builder.add_source(
            Environment::with_prefix("LINGUA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| LinguaError::Config(e.to_string()))?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| LinguaError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), LinguaError> {
        if self.model_repo.trim().is_empty() {
            return Err(LinguaError::Config("model_repo must not be empty".to_string()));
        }
        if self.top_k == 0 {
            return Err(LinguaError::Config("top_k must be > 0".to_string()));
        }
        if self.max_sequence_length == 0 {
            return Err(LinguaError::Config(
                "max_sequence_length must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Expand ~ in cache_dir to the home directory
    pub fn expanded_cache_dir(&self) -> PathBuf {
        if let Some(rest) = self.cache_dir.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(&self.cache_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    /// Serializes tests that read or write LINGUA_* variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.model_repo, DEFAULT_MODEL_REPO);
        assert_eq!(settings.top_k, 3);
        assert_eq!(settings.max_sequence_length, 128);
        assert_eq!(settings.log_level, "warn");
        assert!(settings.cache_dir.contains("lingua-rag"));
    }

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());

        settings.top_k = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_sequence_length() {
        let settings = Settings {
            max_sequence_length: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_model_repo() {
        let settings = Settings {
            model_repo: "  ".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_from_cli_config_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "top_k = 5").unwrap();
        writeln!(file, "model_repo = \"local/test-model\"").unwrap();
        file.flush().unwrap();

        let settings = Settings::load(Some(&file.path().to_string_lossy())).unwrap();
        assert_eq!(settings.top_k, 5);
        assert_eq!(settings.model_repo, "local/test-model");
        assert_eq!(settings.max_sequence_length, 128);
    }

    #[test]
    fn test_load_missing_cli_config_file_fails() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let result = Settings::load(Some("/nonexistent/lingua-rag/config.toml"));
        assert!(matches!(result, Err(LinguaError::Config(_))));
    }

    #[test]
    fn test_load_env_overrides_underscored_keys() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("LINGUA_TOP_K", "7");
        std::env::set_var("LINGUA_MAX_SEQUENCE_LENGTH", "64");
        std::env::set_var("LINGUA_MODEL_REPO", "org/some-model");

        let result = Settings::load(None);

        std::env::remove_var("LINGUA_TOP_K");
        std::env::remove_var("LINGUA_MAX_SEQUENCE_LENGTH");
        std::env::remove_var("LINGUA_MODEL_REPO");

        let settings = result.unwrap();
        assert_eq!(settings.top_k, 7);
        assert_eq!(settings.max_sequence_length, 64);
        assert_eq!(settings.model_repo, "org/some-model");
    }

    #[test]
    fn test_load_env_value_failing_validation() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("LINGUA_TOP_K", "0");

        let result = Settings::load(None);

        std::env::remove_var("LINGUA_TOP_K");
        assert!(matches!(result, Err(LinguaError::Config(_))));
    }

    #[test]
    fn test_expanded_cache_dir_plain_path() {
        let settings = Settings {
            cache_dir: "/tmp/models".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.expanded_cache_dir(), PathBuf::from("/tmp/models"));
    }

    #[test]
    fn test_settings_serialization() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let decoded: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.model_repo, settings.model_repo);
        assert_eq!(decoded.top_k, settings.top_k);
    }
}
