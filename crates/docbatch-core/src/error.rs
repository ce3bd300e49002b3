//! Error types for the document batch generator

use thiserror::Error;

/// Main error type for all generation operations
#[derive(Error, Debug)]
pub enum DocBatchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Unexpected response status: {0}")]
    Status(String),

    #[error("Unexpected response shape: {0}")]
    Decode(String),

    #[error("Render failed: {0}")]
    Render(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

impl DocBatchError {
    /// Short stable label for logs and counters
    pub fn kind(&self) -> &'static str {
        match self {
            DocBatchError::Http(e) if e.is_timeout() => "timeout",
            DocBatchError::Http(e) if e.is_connect() => "connect",
            DocBatchError::Http(_) => "http",
            DocBatchError::Json(_) => "json",
            DocBatchError::Io(_) => "io",
            DocBatchError::Config(_) => "config",
            DocBatchError::Pdf(_) => "pdf",
            DocBatchError::Status(_) => "status",
            DocBatchError::Decode(_) => "decode",
            DocBatchError::Render(_) => "render",
            DocBatchError::Processing(_) => "processing",
        }
    }
}

impl From<lopdf::Error> for DocBatchError {
    fn from(err: lopdf::Error) -> Self {
        DocBatchError::Pdf(err.to_string())
    }
}

impl From<config::ConfigError> for DocBatchError {
    fn from(err: config::ConfigError) -> Self {
        DocBatchError::Config(err.to_string())
    }
}

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, DocBatchError>;
