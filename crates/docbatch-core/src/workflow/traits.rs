//! Hooks the orchestrator reports through

use docbatch_types::BatchProgress;

/// Receives one announcement after every batch join.
///
/// The last announcement of a run has `is_final` set.
pub trait ProgressSink: Send + Sync {
    fn on_batch(&self, progress: &BatchProgress);
}

/// Writes progress to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn on_batch(&self, progress: &BatchProgress) {
        log::info!(
            "Generated {}/{} documents (batch {}, {} units)",
            progress.completed, progress.total, progress.batch_index + 1, progress.batch_len
        );
    }
}
