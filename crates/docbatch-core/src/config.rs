//! Configuration management for the document batch generator

use serde::{Deserialize, Serialize};
use crate::constants;
use crate::error::{DocBatchError, Result};
use std::path::Path;
use std::time::Duration;

/// Prefix for environment overrides, e.g. `DOCBATCH_CONCURRENCY=4`
pub const ENV_PREFIX: &str = "DOCBATCH";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,

    #[serde(default = "default_truncate_bytes")]
    pub truncate_bytes: usize,

    #[serde(alias = "retries", default = "default_fetch_attempts")]
    pub fetch_attempts: u32,

    #[serde(default = "default_fallback_min_chars")]
    pub fallback_min_chars: usize,

    #[serde(default = "default_filler_min_chars")]
    pub filler_min_chars: usize,

    #[serde(default = "default_filler_max_chars")]
    pub filler_max_chars: usize,

    #[serde(alias = "timeout_secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

/// URLs of the remote content endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_quote_url")]
    pub quote_url: String,

    #[serde(default = "default_fact_url")]
    pub fact_url: String,

    #[serde(default = "default_joke_url")]
    pub joke_url: String,
}

// Default functions
fn default_concurrency() -> usize {
    constants::DEFAULT_CONCURRENCY
}

fn default_batch_size() -> usize {
    constants::DEFAULT_BATCH_SIZE
}

fn default_max_file_bytes() -> u64 {
    constants::MAX_FILE_BYTES
}

fn default_truncate_bytes() -> usize {
    constants::TRUNCATE_BODY_BYTES
}

fn default_fetch_attempts() -> u32 {
    constants::FETCH_ATTEMPTS
}

fn default_fallback_min_chars() -> usize {
    constants::FALLBACK_MIN_CHARS
}

fn default_filler_min_chars() -> usize {
    constants::FILLER_MIN_CHARS
}

fn default_filler_max_chars() -> usize {
    constants::FILLER_MAX_CHARS
}

fn default_request_timeout_secs() -> u64 {
    constants::REQUEST_TIMEOUT_SECS
}

fn default_quote_url() -> String {
    "https://api.quotable.io/random".to_string()
}

fn default_fact_url() -> String {
    "https://uselessfacts.jsph.pl/api/v2/facts/random".to_string()
}

fn default_joke_url() -> String {
    "https://official-joke-api.appspot.com/random_joke".to_string()
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            quote_url: default_quote_url(),
            fact_url: default_fact_url(),
            joke_url: default_joke_url(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            batch_size: default_batch_size(),
            max_file_bytes: default_max_file_bytes(),
            truncate_bytes: default_truncate_bytes(),
            fetch_attempts: default_fetch_attempts(),
            fallback_min_chars: default_fallback_min_chars(),
            filler_min_chars: default_filler_min_chars(),
            filler_max_chars: default_filler_max_chars(),
            request_timeout_secs: default_request_timeout_secs(),
            endpoints: EndpointsConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DocBatchError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_json_str(&content)
    }

    /// Load configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DocBatchError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Layer an optional JSON file and `DOCBATCH_*` environment variables
    /// over the defaults. Nested keys use a double underscore,
    /// e.g. `DOCBATCH_ENDPOINTS__QUOTE_URL`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(DocBatchError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(
                config::File::from(path).format(config::FileFormat::Json),
            );
        }

        let config: Self = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(DocBatchError::Config("concurrency must be greater than zero".to_string()));
        }

        if self.batch_size == 0 {
            return Err(DocBatchError::Config("batch_size must be greater than zero".to_string()));
        }

        if self.fetch_attempts == 0 {
            return Err(DocBatchError::Config("fetch_attempts must be greater than zero".to_string()));
        }

        if self.truncate_bytes as u64 >= self.max_file_bytes {
            return Err(DocBatchError::Config(format!(
                "truncate_bytes ({}) must be smaller than max_file_bytes ({})",
                self.truncate_bytes, self.max_file_bytes
            )));
        }

        if self.filler_min_chars > self.filler_max_chars {
            return Err(DocBatchError::Config(
                "filler_min_chars must not exceed filler_max_chars".to_string()
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
