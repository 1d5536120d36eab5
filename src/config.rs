use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Prefix for environment overrides, e.g. `PRACTICE_REPORT__MODEL__MODEL=gpt-4o`
const ENV_PREFIX: &str = "PRACTICE_REPORT";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub model: ModelConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "practice-report".to_string(),
            http: HttpConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8085,
        }
    }
}

/// Which model service implementation generates reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    /// OpenAI-compatible chat completions endpoint
    OpenAi,
    /// Canned reports, no network access
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub provider: ModelProvider,

    /// Base URL of the chat completions API (without `/chat/completions`)
    pub base_url: String,

    pub model: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    pub temperature: f32,
    pub max_tokens: u32,

    /// Optional upper bound on a single model request
    pub request_timeout_secs: Option<u64>,

    /// Canned report used by the mock provider (`high`, `low` or `mixed`)
    pub mock_profile: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ModelProvider::OpenAi,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            request_timeout_secs: None,
            mock_profile: "mixed".to_string(),
        }
    }
}

impl ModelConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String> {
        let key = std::env::var(&self.api_key_env)
            .with_context(|| format!("{} is not defined in environment variables", self.api_key_env))?;

        let key = key.trim().to_string();
        if key.is_empty() {
            anyhow::bail!("{} is empty", self.api_key_env);
        }
        Ok(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    Memory,
    Sled,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackendKind,

    /// Database directory for the sled backend
    pub path: PathBuf,

    /// Key under which the report collection is stored
    pub collection: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::Sled,
            path: PathBuf::from("data/reports"),
            collection: crate::store::DEFAULT_COLLECTION.to_string(),
        }
    }
}

impl Config {
    /// Load `path` (extension optional) layered with `PRACTICE_REPORT__*` variables.
    /// A missing file falls back to defaults.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .with_context(|| format!("Failed to read config from {}", path))?;

        settings
            .try_deserialize()
            .context("Failed to parse configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.service.http.port, 8085);
        assert_eq!(cfg.model.provider, ModelProvider::OpenAi);
        assert_eq!(cfg.model.model, "gpt-4o-mini");
        assert_eq!(cfg.model.max_tokens, 2000);
        assert!(cfg.model.request_timeout_secs.is_none());
        assert_eq!(cfg.storage.backend, StorageBackendKind::Sled);
        assert_eq!(cfg.storage.collection, "interview_reports");
    }

    #[test]
    fn test_load_partial_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("practice.toml");
        let mut file = std::fs::File::create(&path)?;
        writeln!(
            file,
            "[model]\nprovider = \"mock\"\nmock_profile = \"high\"\n\n[storage]\nbackend = \"memory\""
        )?;

        let cfg = Config::load(path.to_str().unwrap())?;
        assert_eq!(cfg.model.provider, ModelProvider::Mock);
        assert_eq!(cfg.model.mock_profile, "high");
        assert_eq!(cfg.storage.backend, StorageBackendKind::Memory);
        assert_eq!(cfg.service.http.bind, "127.0.0.1");
        Ok(())
    }

    #[test]
    fn test_missing_api_key() {
        let cfg = ModelConfig {
            api_key_env: "PRACTICE_REPORT_TEST_UNSET_KEY".to_string(),
            ..ModelConfig::default()
        };
        let err = cfg.api_key().unwrap_err();
        assert!(err.to_string().contains("PRACTICE_REPORT_TEST_UNSET_KEY"));
    }
}
