//! Batch orchestration properties: admission ceiling, batch joins,
//! size-cap re-render and unit isolation

mod common;

use common::{DownSource, RawRenderer, RecordingProgress, StaticSource, RAW_HEADER};
use docbatch_core::phrase_bank::FALLBACK_TOPICS;
use docbatch_core::{paths, BatchOrchestrator, GeneratorConfig};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrency_never_exceeds_ceiling() {
    let temp_dir = TempDir::new().unwrap();
    let source = Arc::new(StaticSource::new("body").with_delay(Duration::from_millis(20)));
    let renderer = Arc::new(RawRenderer::new());

    let config = GeneratorConfig::default();
    assert_eq!(config.concurrency, 10);

    let orchestrator = BatchOrchestrator::new(source.clone(), renderer.clone(), config).unwrap();
    let report = orchestrator.generate_all(50, temp_dir.path()).await.unwrap();

    assert_eq!(report.written, 50);
    assert!(report.peak_in_flight <= 10, "peak was {}", report.peak_in_flight);
    assert!(report.peak_in_flight > 1, "units should overlap");
    assert!(source.peak() <= 10, "source saw {} concurrent fetches", source.peak());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_batches_join_in_hundreds() {
    let temp_dir = TempDir::new().unwrap();
    let progress = Arc::new(RecordingProgress::default());
    let orchestrator = BatchOrchestrator::new(
        Arc::new(StaticSource::new("short body")),
        Arc::new(RawRenderer::new()),
        GeneratorConfig::default(),
    ).unwrap()
    .with_progress(progress.clone());

    let report = orchestrator.generate_all(250, temp_dir.path()).await.unwrap();

    assert_eq!(report.batches, vec![100, 100, 50]);

    let events = progress.events();
    assert_eq!(events.len(), 3);
    let before_final: Vec<_> = events.iter().filter(|e| !e.is_final).collect();
    assert_eq!(before_final.len(), 2);
    assert_eq!(events[0].completed, 100);
    assert_eq!(events[1].completed, 200);
    assert!(events[2].is_final);
    assert_eq!(events[2].completed, 250);
    assert_eq!(events[2].batch_len, 50);

    for index in [0, 99, 100, 249] {
        assert!(paths::document_path(temp_dir.path(), index).exists());
    }
    assert!(!paths::document_path(temp_dir.path(), 250).exists());
}

#[tokio::test]
async fn test_oversize_document_is_rerendered_once() {
    let temp_dir = TempDir::new().unwrap();
    let big_body = "oversized content ".repeat(120_000); // ~2.1 MB
    let renderer = Arc::new(RawRenderer::new());
    let orchestrator = BatchOrchestrator::new(
        Arc::new(StaticSource::new(big_body)),
        renderer.clone(),
        GeneratorConfig::default(),
    ).unwrap();

    let report = orchestrator.generate_all(1, temp_dir.path()).await.unwrap();

    let path = paths::document_path(temp_dir.path(), 0);
    assert_eq!(report.resized, 1);
    assert_eq!(renderer.render_count(&path), 2);

    let size = std::fs::metadata(&path).unwrap().len();
    assert!(size <= 1_048_576, "final size {}", size);
    assert!(size <= (RAW_HEADER.len() + 800_000) as u64);

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.ends_with("..."));
}

#[tokio::test]
async fn test_small_document_is_rendered_once() {
    let temp_dir = TempDir::new().unwrap();
    let renderer = Arc::new(RawRenderer::new());
    let orchestrator = BatchOrchestrator::new(
        Arc::new(StaticSource::new("small")),
        renderer.clone(),
        GeneratorConfig::default(),
    ).unwrap();

    let report = orchestrator.generate_all(3, temp_dir.path()).await.unwrap();

    assert_eq!(report.resized, 0);
    assert_eq!(renderer.total_renders(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_failing_units_do_not_affect_siblings() {
    let temp_dir = TempDir::new().unwrap();
    let renderer = Arc::new(
        RawRenderer::new()
            .failing_for("document_000003.pdf")
            .panicking_for("document_000005.pdf"),
    );
    let orchestrator = BatchOrchestrator::new(
        Arc::new(StaticSource::new("body")),
        renderer,
        GeneratorConfig::default(),
    ).unwrap();

    let report = orchestrator.generate_all(12, temp_dir.path()).await.unwrap();

    assert_eq!(report.failed, 2);
    assert_eq!(report.written, 10);
    assert!(!report.is_complete());
    for index in (0..12).filter(|i| *i != 3 && *i != 5) {
        assert!(paths::document_path(temp_dir.path(), index).exists(), "missing {}", index);
    }
}

#[tokio::test]
async fn test_unreachable_sources_still_produce_documents() {
    let temp_dir = TempDir::new().unwrap();
    let source = Arc::new(DownSource::new());
    let orchestrator = BatchOrchestrator::new(
        source.clone(),
        Arc::new(RawRenderer::new()),
        GeneratorConfig::default(),
    ).unwrap();

    let report = orchestrator.generate_all(4, temp_dir.path()).await.unwrap();

    assert_eq!(report.written, 4);
    assert_eq!(report.fallbacks, 4);
    assert_eq!(source.calls(), 12);
    assert_eq!(orchestrator.resolver_stats().failed_attempts, 12);

    let body = std::fs::read_to_string(paths::document_path(temp_dir.path(), 2)).unwrap();
    let body = body.trim_start_matches(std::str::from_utf8(RAW_HEADER).unwrap());
    assert!(body.chars().count() >= 3000);
    assert!(FALLBACK_TOPICS.iter().any(|topic| body.contains(topic)));
}

#[tokio::test]
async fn test_output_directory_is_created() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("nested").join("docs");

    let orchestrator = BatchOrchestrator::new(
        Arc::new(StaticSource::new("body")),
        Arc::new(RawRenderer::new()),
        GeneratorConfig::default(),
    ).unwrap();

    let report = orchestrator.generate_all(0, &output_dir).await.unwrap();

    assert!(output_dir.is_dir());
    assert_eq!(report.written, 0);
    assert!(report.batches.is_empty());
}

#[tokio::test]
async fn test_zero_batch_size_is_rejected() {
    let config = GeneratorConfig { batch_size: 0, ..GeneratorConfig::default() };

    let err = BatchOrchestrator::new(
        Arc::new(StaticSource::new("body")),
        Arc::new(RawRenderer::new()),
        config,
    )
    .err()
    .expect("zero batch size must not build an orchestrator");

    assert_eq!(err.kind(), "config");
    assert!(err.to_string().contains("batch_size"));
}

#[tokio::test]
async fn test_zero_concurrency_is_rejected() {
    let config = GeneratorConfig { concurrency: 0, ..GeneratorConfig::default() };

    let result = BatchOrchestrator::new(
        Arc::new(StaticSource::new("body")),
        Arc::new(RawRenderer::new()),
        config,
    );

    assert!(result.is_err());
}
