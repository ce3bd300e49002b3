/// Generation constants

/// Maximum generation units holding an admission slot at once
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Units submitted per batch before the await-all join
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Hard ceiling on a rendered document (1 MiB)
pub const MAX_FILE_BYTES: u64 = 1_048_576;

/// Body size, in UTF-8 bytes, used when an oversize document is re-rendered
pub const TRUNCATE_BODY_BYTES: usize = 800_000;

/// Marker appended to a truncated body
pub const ELLIPSIS_MARKER: &str = "...";

/// Fetch attempts before falling back to synthetic content
pub const FETCH_ATTEMPTS: u32 = 3;

/// Minimum fallback body length, in characters
pub const FALLBACK_MIN_CHARS: usize = 3000;

/// Bounds of the filler appended to fetched content, in characters
pub const FILLER_MIN_CHARS: usize = 2000;
pub const FILLER_MAX_CHARS: usize = 2500;

/// Seed stride between documents; sentence seeds are `index * stride + sentence`
pub const SEED_STRIDE: u64 = 10_000;

/// Default per-request timeout for content endpoints
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
