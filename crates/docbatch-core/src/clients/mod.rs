//! Client modules for external content sources

pub mod content_fetcher;

use async_trait::async_trait;
use crate::error::Result;
use docbatch_types::ContentRecord;

pub use content_fetcher::{ContentEndpoint, ContentFetcher};

/// A single content attempt with a typed outcome.
///
/// `Ok` with an empty body means the source answered but had nothing usable.
/// Implementations must take the document index as a parameter and never
/// keep per-document state on `self`.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, document_index: u64) -> Result<ContentRecord>;
}
