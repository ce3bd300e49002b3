//! Batch orchestrator for bulk document generation

use super::admission::AdmissionGate;
use super::traits::{LogProgress, ProgressSink};
use crate::clients::ContentSource;
use crate::config::GeneratorConfig;
use crate::error::{DocBatchError, Result};
use crate::paths;
use crate::render::DocumentRenderer;
use crate::services::{ContentResolver, ResolverStatsSnapshot};
use crate::truncate::truncate_to_bytes;
use docbatch_types::{BatchProgress, ContentRecord, GenerationReport, GenerationTask};
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// What happened to one generation unit that produced a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitOutcome {
    pub resized: bool,
    pub fallback: bool,
    pub file_bytes: u64,
}

/// Everything a single unit needs, cloned into its task
struct GenerationUnit<S: ContentSource + ?Sized> {
    resolver: Arc<ContentResolver<S>>,
    renderer: Arc<dyn DocumentRenderer>,
    max_file_bytes: u64,
    truncate_bytes: usize,
}

impl<S: ContentSource + ?Sized> GenerationUnit<S> {
    /// Render on the blocking pool and hand the record back
    async fn render(
        &self,
        path: PathBuf,
        content: ContentRecord,
        document_number: u64,
    ) -> Result<ContentRecord> {
        let renderer = self.renderer.clone();
        tokio::task::spawn_blocking(move || {
            renderer.render(&path, &content, document_number).map(|_| content)
        })
        .await
        .map_err(|e| DocBatchError::Render(format!("Render task failed: {}", e)))?
    }

    async fn run(&self, task: &GenerationTask) -> Result<UnitOutcome> {
        let content = self.resolver.resolve(task.index).await;
        let fallback = content.is_generated();

        let content = self.render(task.output_path.clone(), content, task.document_number()).await?;
        let file_bytes = tokio::fs::metadata(&task.output_path).await?.len();

        if file_bytes <= self.max_file_bytes {
            log::debug!("Document {}: {} bytes", task.index, file_bytes);
            return Ok(UnitOutcome { resized: false, fallback, file_bytes });
        }

        log::info!(
            "Document {}: {} bytes exceeds {} byte limit, truncating body to {} bytes",
            task.index, file_bytes, self.max_file_bytes, self.truncate_bytes
        );
        let truncated = content.with_body(truncate_to_bytes(&content.body, self.truncate_bytes));
        self.render(task.output_path.clone(), truncated, task.document_number()).await?;

        let file_bytes = tokio::fs::metadata(&task.output_path).await?.len();
        if file_bytes > self.max_file_bytes {
            log::warn!(
                "Document {}: still {} bytes after truncation",
                task.index, file_bytes
            );
        }

        Ok(UnitOutcome { resized: true, fallback, file_bytes })
    }
}

/// Drives generation of many documents with bounded concurrency
pub struct BatchOrchestrator<S: ContentSource + ?Sized + 'static> {
    resolver: Arc<ContentResolver<S>>,
    renderer: Arc<dyn DocumentRenderer>,
    progress: Arc<dyn ProgressSink>,
    config: GeneratorConfig,
}

impl<S: ContentSource + ?Sized + 'static> BatchOrchestrator<S> {
    /// Rejects configurations that could never finish, such as a zero batch
    /// size or zero concurrency
    pub fn new(
        source: Arc<S>,
        renderer: Arc<dyn DocumentRenderer>,
        config: GeneratorConfig,
    ) -> Result<Self> {
        config.validate()?;

        let resolver = Arc::new(ContentResolver::new(source, &config));
        Ok(Self {
            resolver,
            renderer,
            progress: Arc::new(LogProgress),
            config,
        })
    }

    /// Replace the default log-based progress reporting
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn resolver_stats(&self) -> ResolverStatsSnapshot {
        self.resolver.stats()
    }

    fn unit(&self) -> GenerationUnit<S> {
        GenerationUnit {
            resolver: self.resolver.clone(),
            renderer: self.renderer.clone(),
            max_file_bytes: self.config.max_file_bytes,
            truncate_bytes: self.config.truncate_bytes,
        }
    }

    /// Generate `count` documents into `output_dir`.
    ///
    /// Units are submitted in batches of `batch_size`; each batch is joined
    /// completely before the next starts. At most `concurrency` units hold an
    /// admission slot at any time. A failing unit is counted in the report and
    /// never affects its siblings. The only error returned is failure to create
    /// the output directory.
    pub async fn generate_all(&self, count: u64, output_dir: &Path) -> Result<GenerationReport> {
        paths::ensure_output_dir(output_dir)?;

        let started = Instant::now();
        let mut report = GenerationReport::new(count);
        let gate = AdmissionGate::new(self.config.concurrency);
        let batch_size = self.config.batch_size as u64;

        log::info!(
            "Run {}: generating {} documents into {} (concurrency {}, batch size {})",
            report.run_id, count, output_dir.display(), gate.capacity(), batch_size
        );

        let mut next_index = 0;
        while next_index < count {
            let batch_end = (next_index + batch_size).min(count);

            let handles: Vec<_> = (next_index..batch_end)
                .map(|index| {
                    let task = paths::generation_task(output_dir, index);
                    let unit = self.unit();
                    let gate = gate.clone();
                    tokio::spawn(async move {
                        let _slot = gate.acquire().await?;
                        unit.run(&task).await
                    })
                })
                .collect();

            let results = join_all(handles).await;

            for (index, result) in (next_index..batch_end).zip(results) {
                match result {
                    Ok(Ok(outcome)) => {
                        report.written += 1;
                        if outcome.resized {
                            report.resized += 1;
                        }
                        if outcome.fallback {
                            report.fallbacks += 1;
                        }
                    }
                    Ok(Err(e)) => {
                        report.failed += 1;
                        log::error!("Document {} failed ({}): {}", index, e.kind(), e);
                    }
                    Err(e) => {
                        report.failed += 1;
                        log::error!("Document {} task aborted: {}", index, e);
                    }
                }
            }

            let batch_len = (batch_end - next_index) as usize;
            report.batches.push(batch_len);
            next_index = batch_end;

            self.progress.on_batch(&BatchProgress {
                batch_index: report.batches.len() - 1,
                batch_len,
                completed: next_index,
                total: count,
                is_final: next_index >= count,
            });
        }

        report.peak_in_flight = gate.peak();
        report.elapsed_ms = started.elapsed().as_millis() as u64;

        log::info!(
            "Run {}: {} written, {} resized, {} fallback, {} failed in {} ms",
            report.run_id, report.written, report.resized, report.fallbacks, report.failed,
            report.elapsed_ms
        );

        Ok(report)
    }
}
