//! Error handling for L3 gridding operations.
//!
//! A single closed error enumeration replaces the mix of reader-library and
//! writer-library failure signals, so the batch orchestrator can classify
//! per-file failures with one exhaustive match instead of a chain of
//! library-specific catch clauses.

use crate::models::SkipReason;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corpus root not found: {path}")]
    CorpusNotFound { path: PathBuf },

    #[error("corpus traversal failed: {0}")]
    Traversal(#[from] walkdir::Error),

    #[error("no gas retrieval dataset in file: {path}")]
    NoData { path: PathBuf },

    #[error("auxiliary field '{field}' missing from file: {path}")]
    FieldMissing { path: PathBuf, field: String },

    #[error("unreadable swath file: {path} - {reason}")]
    Format { path: PathBuf, reason: String },

    #[error(
        "per-observation arrays misaligned in file: {path} - \
         {records} records vs {fit_errors} fit-error samples"
    )]
    Alignment {
        path: PathBuf,
        records: usize,
        fit_errors: usize,
    },

    #[error("raster encoding failed for {path}: {source}")]
    Raster {
        path: PathBuf,
        #[source]
        source: tiff::TiffError,
    },

    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl PipelineError {
    /// Create a format error with context
    pub fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Classify this error for the batch loop.
    ///
    /// `Some(reason)` means the error is scoped to a single file: the
    /// orchestrator logs it and moves on. `None` means the failure mode is
    /// not one of the known per-file kinds and must abort the run rather
    /// than be silently folded into "no data".
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::NoData { .. } => Some(SkipReason::NoData),
            Self::FieldMissing { .. } => Some(SkipReason::MissingField),
            Self::Format { .. } => Some(SkipReason::Unreadable),
            Self::Alignment { .. } => Some(SkipReason::Misaligned),
            Self::Io(_)
            | Self::CorpusNotFound { .. }
            | Self::Traversal(_)
            | Self::Raster { .. }
            | Self::Configuration { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
