//! L3 Gridder Library
//!
//! A Rust library for converting satellite L2 swath retrievals (per-observation
//! trace-gas columns with quality metadata) into daily L3 gridded GeoTIFF
//! rasters.
//!
//! This library provides tools for:
//! - Reading per-orbit swath exports together with their auxiliary fit-error
//!   datasets, with strict array-alignment checking
//! - Screening observations against the recommended quality predicates
//!   (scan direction, cloud fraction, validity bitmask, fit errors)
//! - Binning surviving observations onto a fixed geographic grid with mean
//!   aggregation and NaN no-data cells
//! - Emitting one georeferenced WGS84 GeoTIFF per input file
//! - Resilient batch orchestration that classifies per-file failures and
//!   keeps processing the rest of the corpus

pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod grid;
pub mod models;
pub mod processor;
pub mod raster;
pub mod source;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{FilterConfig, GridSpec, ProcessorConfig};
pub use error::{PipelineError, Result};
pub use models::{BatchStats, FileOutcome, ObservationBatch, SkipReason};
pub use processor::BatchProcessor;
