//! Test doubles shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use docbatch_core::error::{DocBatchError, Result};
use docbatch_core::{BatchProgress, ContentRecord, ContentSource, DocumentRenderer, ProgressSink};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Returns a fixed body after a short delay and records concurrency
pub struct StaticSource {
    pub body: String,
    pub delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            delay: Duration::from_millis(0),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for StaticSource {
    async fn fetch(&self, document_index: u64) -> Result<ContentRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(ContentRecord::new(
            "http://mock/fact",
            format!("Fact {}", document_index),
            self.body.clone(),
        ))
    }
}

/// Always fails, like a network with every endpoint down
pub struct DownSource {
    calls: AtomicUsize,
}

impl DownSource {
    pub fn new() -> Self {
        Self { calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for DownSource {
    async fn fetch(&self, _document_index: u64) -> Result<ContentRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DocBatchError::Status("503 Service Unavailable".to_string()))
    }
}

/// Writes a small header followed by the raw body, so file size = body size + header
pub struct RawRenderer {
    renders: Mutex<HashMap<PathBuf, usize>>,
    fail_for: Option<String>,
    panic_for: Option<String>,
}

pub const RAW_HEADER: &[u8] = b"%PDF-raw\n";

impl RawRenderer {
    pub fn new() -> Self {
        Self { renders: Mutex::new(HashMap::new()), fail_for: None, panic_for: None }
    }

    /// Fail every render whose file name equals `file_name`
    pub fn failing_for(mut self, file_name: &str) -> Self {
        self.fail_for = Some(file_name.to_string());
        self
    }

    pub fn panicking_for(mut self, file_name: &str) -> Self {
        self.panic_for = Some(file_name.to_string());
        self
    }

    pub fn render_count(&self, path: &Path) -> usize {
        self.renders.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn total_renders(&self) -> usize {
        self.renders.lock().unwrap().values().sum()
    }
}

impl DocumentRenderer for RawRenderer {
    fn render(&self, path: &Path, content: &ContentRecord, _document_number: u64) -> Result<()> {
        *self.renders.lock().unwrap().entry(path.to_path_buf()).or_insert(0) += 1;

        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if self.panic_for.as_deref() == Some(file_name) {
            panic!("renderer crashed on {}", file_name);
        }
        if self.fail_for.as_deref() == Some(file_name) {
            return Err(DocBatchError::Render(format!("disk full writing {}", file_name)));
        }

        let mut bytes = RAW_HEADER.to_vec();
        bytes.extend_from_slice(content.body.as_bytes());
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Keeps every progress announcement
#[derive(Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<BatchProgress>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<BatchProgress> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn on_batch(&self, progress: &BatchProgress) {
        self.events.lock().unwrap().push(*progress);
    }
}
