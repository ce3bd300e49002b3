//! Bounded retry over a content source with synthetic fallback

use crate::clients::ContentSource;
use crate::config::GeneratorConfig;
use crate::phrase_bank::FALLBACK_TOPICS;
use crate::synthesis;
use docbatch_types::{ContentRecord, GENERATED_SOURCE};
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Attempt counters shared by every unit of a run
#[derive(Debug, Default)]
pub struct ResolverStats {
    attempts: AtomicU64,
    failed_attempts: AtomicU64,
    empty_attempts: AtomicU64,
    fallbacks: AtomicU64,
}

/// Point-in-time copy of [`ResolverStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStatsSnapshot {
    pub attempts: u64,
    pub failed_attempts: u64,
    pub empty_attempts: u64,
    pub fallbacks: u64,
}

impl ResolverStats {
    pub fn snapshot(&self) -> ResolverStatsSnapshot {
        ResolverStatsSnapshot {
            attempts: self.attempts.load(Ordering::Relaxed),
            failed_attempts: self.failed_attempts.load(Ordering::Relaxed),
            empty_attempts: self.empty_attempts.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
        }
    }
}

pub struct ContentResolver<S: ContentSource + ?Sized> {
    source: Arc<S>,
    attempts: u32,
    fallback_min_chars: usize,
    stats: ResolverStats,
}

impl<S: ContentSource + ?Sized> ContentResolver<S> {
    pub fn new(source: Arc<S>, config: &GeneratorConfig) -> Self {
        Self {
            source,
            attempts: config.fetch_attempts,
            fallback_min_chars: config.fallback_min_chars,
            stats: ResolverStats::default(),
        }
    }

    pub fn stats(&self) -> ResolverStatsSnapshot {
        self.stats.snapshot()
    }

    /// Content for `document_index`. Never fails: remote content when one of
    /// the attempts yields a non-empty body, synthetic content otherwise.
    pub async fn resolve(&self, document_index: u64) -> ContentRecord {
        for attempt in 1..=self.attempts {
            self.stats.attempts.fetch_add(1, Ordering::Relaxed);

            match self.source.fetch(document_index).await {
                Ok(record) if record.has_content() => {
                    log::debug!(
                        "Document {}: content from {} on attempt {}",
                        document_index, record.source_locator, attempt
                    );
                    return record;
                }
                Ok(record) => {
                    self.stats.empty_attempts.fetch_add(1, Ordering::Relaxed);
                    log::warn!(
                        "Document {}: attempt {}/{} returned no content from {}",
                        document_index, attempt, self.attempts, record.source_locator
                    );
                }
                Err(e) => {
                    self.stats.failed_attempts.fetch_add(1, Ordering::Relaxed);
                    log::warn!(
                        "Document {}: attempt {}/{} failed ({}): {}",
                        document_index, attempt, self.attempts, e.kind(), e
                    );
                }
            }
        }

        self.stats.fallbacks.fetch_add(1, Ordering::Relaxed);
        log::info!(
            "Document {}: all {} attempts exhausted, using generated content",
            document_index, self.attempts
        );
        self.fallback(document_index)
    }

    /// Synthetic content on a randomly chosen educational topic
    pub fn fallback(&self, document_index: u64) -> ContentRecord {
        let topic = FALLBACK_TOPICS[rand::thread_rng().gen_range(0..FALLBACK_TOPICS.len())];
        let body = synthesis::synthesize(topic, document_index, self.fallback_min_chars);

        ContentRecord::new(
            GENERATED_SOURCE,
            format!("Educational Content: {}", topic),
            body,
        )
    }
}
