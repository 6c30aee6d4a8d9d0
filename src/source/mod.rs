//! Record sources: decoding swath files into observation batches.
//!
//! The pipeline consumes sources through the [`RecordSource`] trait so the
//! gridding core stays independent of any particular container format. A
//! source exposes two operations mirroring the upstream product layout: the
//! primary per-observation arrays, and a separate accessor for the auxiliary
//! fit-error fields that older files may omit.

pub mod csv;

pub use self::csv::CsvRecordSource;

use crate::error::Result;
use crate::models::{FitErrors, SwathRecords};
use std::path::Path;

/// Decoder for one swath file format.
pub trait RecordSource {
    /// Decode the primary per-observation arrays from one file.
    ///
    /// Fails with `NoData` when the file carries no gas retrieval dataset at
    /// all, and with `Format` when the file is truncated, corrupted, or
    /// structurally wrong.
    fn open_swath(&self, path: &Path) -> Result<SwathRecords>;

    /// Fetch the three auxiliary fit-error fields for the same file.
    ///
    /// Fails with `FieldMissing` when the file predates or omits an
    /// auxiliary field, which the batch loop treats as a per-file skip.
    fn fetch_fit_errors(&self, path: &Path) -> Result<FitErrors>;
}
