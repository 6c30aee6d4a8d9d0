//! Integration tests for the processor module
//!
//! Tests the complete per-file pipeline and the batch loop using synthetic
//! swath corpora written to temporary directories.

pub mod basic_processing;
pub mod error_handling;

use crate::source::CsvRecordSource;
use std::fs;
use std::path::{Path, PathBuf};

pub const SWATH_HEADER: &str =
    "time,scan_direction,cloud_fraction,longitude_bounds,latitude_bounds,gas_column_density,validity\n";
pub const SIDECAR_HEADER: &str = "time,fit_param_err_0,fit_param_err_1,fit_param_err_2\n";

/// Write a swath file plus its fit-error sidecar into `dir`
pub fn write_orbit(dir: &Path, name: &str, swath_rows: &str, sidecar_rows: &str) -> PathBuf {
    let path = dir.join(format!("{name}.csv"));
    fs::write(&path, format!("{SWATH_HEADER}{swath_rows}")).unwrap();
    fs::write(
        CsvRecordSource::sidecar_path(&path),
        format!("{SIDECAR_HEADER}{sidecar_rows}"),
    )
    .unwrap();
    path
}

/// Four observations: two passing all predicates with densities 1.0 and 3.0
/// whose centroids share one cell, one rejected by cloud fraction, one
/// rejected by the validity bitmask.
pub fn mixed_quality_rows() -> (&'static str, &'static str) {
    (
        "0,forward,0.05,-60.2;-60.0;-60.2;-60.0,-30.2;-30.2;-30.0;-30.0,1.0,49152\n\
         1,forward,0.10,-60.4;-60.2;-60.4;-60.2,-30.4;-30.4;-30.2;-30.2,3.0,49152\n\
         2,forward,0.50,-60.2;-60.0;-60.2;-60.0,-30.2;-30.2;-30.0;-30.0,9.0,49152\n\
         3,forward,0.05,-60.2;-60.0;-60.2;-60.0,-30.2;-30.2;-30.0;-30.0,9.0,32768\n",
        "0,0.001,0.005,0.1\n\
         1,0.002,0.006,0.2\n\
         2,0.001,0.005,0.1\n\
         3,0.001,0.005,0.1\n",
    )
}
