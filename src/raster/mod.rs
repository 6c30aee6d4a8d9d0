//! Georeferencing and raster artifact assembly.
//!
//! Computes the affine pixel-to-geographic mapping for a populated grid,
//! attaches the fixed WGS84 geographic CRS, and hands the result to a
//! [`RasterWriter`]. The writer owns the on-disk encoding; this module's
//! contract ends at a correctly shaped, correctly georeferenced in-memory
//! artifact.

pub mod geotiff;

pub use geotiff::GeoTiffWriter;

use crate::config::GridSpec;
use crate::constants::{output_filename, WGS84_EPSG, WGS84_PROJ4};
use crate::error::Result;
use crate::grid::BinnedGrid;
use ndarray::Array2;
use std::path::{Path, PathBuf};

/// Affine mapping between pixel coordinates (col, row) and geographic
/// coordinates (longitude, latitude).
///
/// The origin is the grid's north-west corner; longitude grows with column
/// and latitude shrinks with row, matching the grid convention where cell
/// (0, 0) is the north-west cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    pub origin_longitude: f64,
    pub origin_latitude: f64,
    pub pixel_width: f64,
    /// Negative: latitude decreases as the row index grows southward
    pub pixel_height: f64,
}

impl GeoTransform {
    /// Transform matching a grid specification
    pub fn from_grid(spec: &GridSpec) -> Self {
        Self {
            origin_longitude: spec.west,
            origin_latitude: spec.north,
            pixel_width: spec.resolution,
            pixel_height: -spec.resolution,
        }
    }

    /// Map fractional pixel coordinates to geographic coordinates
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.origin_longitude + col * self.pixel_width,
            self.origin_latitude + row * self.pixel_height,
        )
    }

    /// Map geographic coordinates back to fractional pixel coordinates
    pub fn invert(&self, longitude: f64, latitude: f64) -> (f64, f64) {
        (
            (longitude - self.origin_longitude) / self.pixel_width,
            (latitude - self.origin_latitude) / self.pixel_height,
        )
    }

    /// Geographic coordinates of a pixel's center
    pub fn pixel_center(&self, col: usize, row: usize) -> (f64, f64) {
        self.apply(col as f64 + 0.5, row as f64 + 0.5)
    }
}

/// Fixed geographic coordinate-reference-system descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crs {
    pub epsg: u16,
    pub proj4: &'static str,
}

/// Unprojected latitude/longitude on the WGS84 ellipsoid
pub const WGS84: Crs = Crs {
    epsg: WGS84_EPSG,
    proj4: WGS84_PROJ4,
};

/// One band of aggregated values plus everything the writer needs to
/// georeference it. Created once per successfully processed file; ownership
/// passes to the writer and the artifact is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RasterArtifact {
    pub values: Array2<f64>,
    pub transform: GeoTransform,
    pub crs: Crs,
    pub path: PathBuf,
}

impl RasterArtifact {
    /// Assemble the artifact for a populated grid
    pub fn new(grid: BinnedGrid, spec: &GridSpec, path: PathBuf) -> Self {
        Self {
            values: grid.values,
            transform: GeoTransform::from_grid(spec),
            crs: WGS84,
            path,
        }
    }

    /// Raster dimensions as (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }
}

/// Destination path for the raster derived from an input file's name.
///
/// Uses the full file stem so distinct inputs never collide; no fixed
/// character slicing of the name is assumed.
pub fn raster_output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "unnamed".to_string());
    output_dir.join(output_filename(&stem))
}

/// Raster container writer consumed by the pipeline. Implementations own the
/// byte-level encoding and must release the file handle on all exit paths.
pub trait RasterWriter {
    fn write(&self, artifact: &RasterArtifact) -> Result<()>;
}
