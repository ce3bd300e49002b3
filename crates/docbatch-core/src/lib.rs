//! DocBatch Core Library
//!
//! Bulk generation of single-page documents. Content comes from public web
//! endpoints when they answer and from a deterministic text synthesizer when
//! they don't; every output file is kept under a size ceiling.

pub mod config;
pub mod constants;
pub mod clients;
pub mod services;
pub mod workflow;
pub mod error;
pub mod paths;
pub mod phrase_bank;
pub mod render;
pub mod synthesis;
pub mod truncate;

// Re-export main types for easy access
pub use config::GeneratorConfig;
pub use error::{DocBatchError, Result};
pub use docbatch_types::{BatchProgress, ContentRecord, GenerationReport, GenerationTask};

pub use clients::{ContentEndpoint, ContentFetcher, ContentSource};
pub use services::ContentResolver;
pub use render::{DocumentRenderer, PdfRenderer};
pub use workflow::{BatchOrchestrator, ProgressSink};
