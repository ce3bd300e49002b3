//! Service modules for content resolution

pub mod content_resolver;

// Re-export service types
pub use content_resolver::{ContentResolver, ResolverStats, ResolverStatsSnapshot};
