/// Output layout for generated documents
use docbatch_types::GenerationTask;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "generated_documents";
pub const DOCUMENT_PREFIX: &str = "document_";
pub const DOCUMENT_EXTENSION: &str = "pdf";

/// `document_000042.pdf` for index 42
pub fn document_file_name(index: u64) -> String {
    format!("{}{:06}.{}", DOCUMENT_PREFIX, index, DOCUMENT_EXTENSION)
}

pub fn document_path(output_dir: &Path, index: u64) -> PathBuf {
    output_dir.join(document_file_name(index))
}

pub fn generation_task(output_dir: &Path, index: u64) -> GenerationTask {
    GenerationTask::new(index, document_path(output_dir, index))
}

/// Create the output directory if needed. Safe to call repeatedly.
pub fn ensure_output_dir(output_dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(output_dir)
}
