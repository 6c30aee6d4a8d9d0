//! Corpus discovery for swath files.
//!
//! Walks the input root recursively and collects files with the configured
//! extension, excluding fit-error sidecars, in a deterministic sorted order.

use crate::constants::FIT_ERROR_SIDECAR_EXTENSION;
use crate::error::{PipelineError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Whether a path is a swath file with the wanted extension (and not an
/// auxiliary sidecar, which shares the extension)
fn is_swath_file(path: &Path, extension: &str) -> bool {
    let matches_extension = path.extension().is_some_and(|ext| ext == extension);
    let is_sidecar = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(&format!(".{FIT_ERROR_SIDECAR_EXTENSION}")));
    matches_extension && !is_sidecar
}

/// Discover all swath files under a corpus root
pub fn discover_swath_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(PipelineError::CorpusNotFound {
            path: root.to_path_buf(),
        });
    }

    debug!("searching for .{} files under {}", extension, root.display());

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_file() && is_swath_file(entry.path(), extension) {
            files.push(entry.into_path());
        }
    }

    // Deterministic processing order regardless of directory iteration order
    files.sort();

    debug!("found {} swath files", files.len());
    Ok(files)
}
