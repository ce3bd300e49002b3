//! Bulk document generator executable

use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use docbatch_core::{paths, BatchOrchestrator, ContentFetcher, GeneratorConfig, PdfRenderer, ProgressSink};
use docbatch_types::{BatchProgress, GenerationReport};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Prints one line per joined batch
struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn on_batch(&self, progress: &BatchProgress) {
        println!("Generated {}/{} documents", progress.completed, progress.total);
    }
}

fn cli() -> Command {
    Command::new("docbatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate many single-page PDF documents from web and synthetic content")
        .arg(
            Arg::new("count")
                .long("count")
                .short('n')
                .value_name("N")
                .help("Number of documents to generate")
                .value_parser(clap::value_parser!(u64))
                .default_value("1000")
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .value_name("DIR")
                .help("Directory the documents are written to")
                .default_value(paths::DEFAULT_OUTPUT_DIR)
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Optional JSON configuration file; DOCBATCH_* variables override it")
        )
}

fn print_summary(report: &GenerationReport, output_dir: &Path, elapsed_secs: f64) {
    println!();
    println!("Done in {:.2} seconds", elapsed_secs);
    println!(
        "Written: {}  Resized: {}  Fallback content: {}  Failed: {}",
        report.written, report.resized, report.fallbacks, report.failed
    );
    println!("Documents saved to: {}", output_dir.display());
}

async fn run(matches: ArgMatches) -> anyhow::Result<()> {
    let count = *matches.get_one::<u64>("count").context("missing --count")?;
    let output_dir = PathBuf::from(
        matches.get_one::<String>("output-dir").context("missing --output-dir")?,
    );
    let config_path = matches.get_one::<String>("config").map(PathBuf::from);

    let config = GeneratorConfig::load(config_path.as_deref())?;
    log::info!(
        "Loaded configuration (concurrency {}, batch size {}, size limit {} bytes)",
        config.concurrency, config.batch_size, config.max_file_bytes
    );

    let fetcher = Arc::new(ContentFetcher::new(&config)?);
    let orchestrator = BatchOrchestrator::new(fetcher, Arc::new(PdfRenderer::new()), config)?
        .with_progress(Arc::new(ConsoleProgress));

    println!("Generating {} documents into {}", count, output_dir.display());
    let started = Instant::now();

    let report = orchestrator.generate_all(count, &output_dir).await?;

    let stats = orchestrator.resolver_stats();
    log::info!(
        "Fetch attempts: {} total, {} failed, {} empty",
        stats.attempts, stats.failed_attempts, stats.empty_attempts
    );

    print_summary(&report, &output_dir, started.elapsed().as_secs_f64());
    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize logging with INFO as default if RUST_LOG not set
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let matches = cli().get_matches();

    if let Err(e) = run(matches).await {
        log::error!("Generation failed: {:#}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
