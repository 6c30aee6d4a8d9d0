//! Core data structures for swath observations and batch outcomes.
//!
//! Per-observation data is kept as aligned struct-of-arrays batches, matching
//! how the upstream product exposes it. All arrays for one file must share
//! the same length and ordering; a violation makes the file unprocessable and
//! surfaces as an alignment failure, never as silent truncation.

use crate::error::{PipelineError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Viewing geometry of one detector scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    Forward,
    Backward,
}

impl ScanDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanDirection::Forward => "forward",
            ScanDirection::Backward => "backward",
        }
    }
}

impl FromStr for ScanDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "forward" => Ok(ScanDirection::Forward),
            "backward" => Ok(ScanDirection::Backward),
            other => Err(format!("unknown scan direction '{other}'")),
        }
    }
}

/// Primary per-observation arrays decoded from one swath file.
///
/// `gas_column_density` uses NaN for absent retrievals. `validity` is the
/// 16-bit product quality bitfield (bit 15 = model convergence, bit 14 =
/// solar zenith angle below threshold).
#[derive(Debug, Clone, Default)]
pub struct SwathRecords {
    /// Acquisition order index, used only to align auxiliary fields
    pub time: Vec<i64>,
    pub scan_direction: Vec<ScanDirection>,
    pub cloud_fraction: Vec<f64>,
    /// Footprint polygon vertex longitudes, one small vector per observation
    pub longitude_bounds: Vec<Vec<f64>>,
    /// Footprint polygon vertex latitudes, aligned with `longitude_bounds`
    pub latitude_bounds: Vec<Vec<f64>>,
    pub gas_column_density: Vec<f64>,
    pub validity: Vec<u16>,
}

impl SwathRecords {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Check that every per-observation array shares one length
    pub fn validate_alignment(&self, path: &Path) -> Result<()> {
        let n = self.time.len();
        let lengths = [
            self.scan_direction.len(),
            self.cloud_fraction.len(),
            self.longitude_bounds.len(),
            self.latitude_bounds.len(),
            self.gas_column_density.len(),
            self.validity.len(),
        ];
        if let Some(&bad) = lengths.iter().find(|&&len| len != n) {
            return Err(PipelineError::Alignment {
                path: path.to_path_buf(),
                records: n,
                fit_errors: bad,
            });
        }
        Ok(())
    }
}

/// Auxiliary per-observation fit-error estimates, fetched separately from the
/// primary records and aligned to them by acquisition order.
#[derive(Debug, Clone, Default)]
pub struct FitErrors {
    /// Fit error of the primary gas scale factor (field index 0)
    pub primary: Vec<f64>,
    /// Fit error of the first co-retrieved species (field index 1)
    pub secondary: Vec<f64>,
    /// Fit error of the second co-retrieved species (field index 2)
    pub tertiary: Vec<f64>,
}

impl FitErrors {
    pub fn len(&self) -> usize {
        self.primary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    fn validate_internal(&self, path: &Path) -> Result<()> {
        let n = self.primary.len();
        if self.secondary.len() != n || self.tertiary.len() != n {
            return Err(PipelineError::Alignment {
                path: path.to_path_buf(),
                records: n,
                fit_errors: self.secondary.len().min(self.tertiary.len()),
            });
        }
        Ok(())
    }
}

/// One file's complete observation batch: primary records plus attached
/// fit-error arrays, alignment-checked at assembly.
#[derive(Debug, Clone)]
pub struct ObservationBatch {
    pub records: SwathRecords,
    pub fit_errors: FitErrors,
}

impl ObservationBatch {
    /// Combine primary records with their auxiliary fit errors.
    ///
    /// Fails with an alignment error if any array disagrees in length; the
    /// caller must treat that as a file-level failure.
    pub fn assemble(path: &Path, records: SwathRecords, fit_errors: FitErrors) -> Result<Self> {
        records.validate_alignment(path)?;
        fit_errors.validate_internal(path)?;
        if fit_errors.len() != records.len() {
            return Err(PipelineError::Alignment {
                path: path.to_path_buf(),
                records: records.len(),
                fit_errors: fit_errors.len(),
            });
        }
        Ok(Self {
            records,
            fit_errors,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Quality survivors projected down to the fields needed for gridding
#[derive(Debug, Clone, Default)]
pub struct FilteredBatch {
    pub longitude_bounds: Vec<Vec<f64>>,
    pub latitude_bounds: Vec<Vec<f64>>,
    pub gas_column_density: Vec<f64>,
}

impl FilteredBatch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            longitude_bounds: Vec::with_capacity(capacity),
            latitude_bounds: Vec::with_capacity(capacity),
            gas_column_density: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.gas_column_density.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gas_column_density.is_empty()
    }
}

/// Why a file produced no raster even though processing continued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Zero observations survived quality screening
    NoObservations,
    /// Observations survived but every grid cell stayed empty
    EmptyGrid,
    /// The gas retrieval dataset is absent from the file entirely
    NoData,
    /// An auxiliary fit-error field is missing from the file
    MissingField,
    /// The file is truncated, corrupted, or structurally wrong
    Unreadable,
    /// Auxiliary arrays disagree in length with the primary records
    Misaligned,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::NoObservations => "did not meet recommended quality",
            SkipReason::EmptyGrid => "no observation fell inside the grid",
            SkipReason::NoData => "no gas retrieval dataset",
            SkipReason::MissingField => "auxiliary fit-error field missing",
            SkipReason::Unreadable => "unreadable or truncated file",
            SkipReason::Misaligned => "fit-error arrays misaligned with records",
        };
        f.write_str(reason)
    }
}

/// Outcome of processing one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// A raster artifact was written to this path
    Written(PathBuf),
    /// The file was skipped for a normal, classified reason
    Skipped(SkipReason),
}

/// Running outcome counters for one corpus run
#[derive(Debug, Default)]
pub struct BatchStats {
    pub files_scanned: usize,
    pub rasters_written: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub processing_time_ms: u128,
}

impl BatchStats {
    /// Files that produced no raster, for whatever reason
    pub fn files_without_output(&self) -> usize {
        self.files_skipped + self.files_failed
    }
}
