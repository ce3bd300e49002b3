//! Shared types for the document batch generator

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use uuid::Uuid;

/// Source locator used for content produced by the synthetic generator
pub const GENERATED_SOURCE: &str = "generated";

/// Content for a single document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Origin identifier: the endpoint URL or `generated`
    pub source_locator: String,
    pub title: String,
    pub body: String,
}

impl ContentRecord {
    pub fn new(
        source_locator: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            source_locator: source_locator.into(),
            title: title.into(),
            body: body.into(),
        }
    }

    /// Sentinel for "no content obtained" from a remote source
    pub fn empty(source_locator: impl Into<String>) -> Self {
        Self::new(source_locator, String::new(), String::new())
    }

    pub fn has_content(&self) -> bool {
        !self.body.is_empty()
    }

    pub fn is_generated(&self) -> bool {
        self.source_locator == GENERATED_SOURCE
    }

    /// Same record with the body replaced
    pub fn with_body(&self, body: String) -> Self {
        Self {
            source_locator: self.source_locator.clone(),
            title: self.title.clone(),
            body,
        }
    }
}

/// One requested document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationTask {
    /// Zero-based index, also the seed root for synthesized text
    pub index: u64,
    pub output_path: PathBuf,
}

impl GenerationTask {
    pub fn new(index: u64, output_path: PathBuf) -> Self {
        Self { index, output_path }
    }

    /// One-based number printed in the document footer
    pub fn document_number(&self) -> u64 {
        self.index + 1
    }
}

/// Progress announcement emitted after each batch join
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProgress {
    pub batch_index: usize,
    pub batch_len: usize,
    pub completed: u64,
    pub total: u64,
    pub is_final: bool,
}

/// Summary of a `generate_all` run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub requested: u64,
    /// Units that produced a file, resized ones included
    pub written: u64,
    /// Units that went through the truncate and re-render path
    pub resized: u64,
    pub failed: u64,
    /// Units whose content came from the synthetic fallback
    pub fallbacks: u64,
    /// Size of each joined batch, in submission order
    pub batches: Vec<usize>,
    /// Most units that held an admission slot at the same time
    pub peak_in_flight: usize,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl GenerationReport {
    pub fn new(requested: u64) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            requested,
            written: 0,
            resized: 0,
            failed: 0,
            fallbacks: 0,
            batches: Vec::new(),
            peak_in_flight: 0,
            started_at: Utc::now(),
            elapsed_ms: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failed == 0 && self.written == self.requested
    }
}
