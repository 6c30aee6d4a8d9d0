//! Spatial binning of filtered observations onto the target grid.
//!
//! Each observation is assigned to the cell containing its footprint
//! centroid; each cell holds the mean of the gas column densities assigned
//! to it, or NaN when no observation landed there. Accumulation is sum plus
//! count per cell, so the result does not depend on observation order.
//!
//! Cell geometry: cells are half-open intervals `[edge, edge + resolution)`
//! walking south and east from the north-west corner. A centroid exactly on
//! the grid's outer south or east edge is clamped into the last row or
//! column; a centroid outside the extent is dropped.

use crate::config::GridSpec;
use crate::models::FilteredBatch;
use ndarray::Array2;
use tracing::debug;

impl GridSpec {
    /// Map a geographic coordinate to its (row, col) cell, or None when the
    /// coordinate falls outside the grid extent or is not finite.
    pub fn cell_index(&self, longitude: f64, latitude: f64) -> Option<(usize, usize)> {
        let inside = longitude >= self.west
            && longitude <= self.east
            && latitude >= self.south
            && latitude <= self.north;
        if !inside {
            return None;
        }

        let col = ((longitude - self.west) / self.resolution).floor() as usize;
        let row = ((self.north - latitude) / self.resolution).floor() as usize;
        Some((row.min(self.rows() - 1), col.min(self.cols() - 1)))
    }

    /// Geographic coordinates of a cell's center
    pub fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        (
            self.west + (col as f64 + 0.5) * self.resolution,
            self.north - (row as f64 + 0.5) * self.resolution,
        )
    }
}

/// Dense binning result for one file
#[derive(Debug, Clone)]
pub struct BinnedGrid {
    /// Cell means, NaN where no observation landed
    pub values: Array2<f64>,
    /// Number of cells holding at least one observation
    pub populated_cells: usize,
}

impl BinnedGrid {
    /// Whether any cell holds data; an all-NaN grid means the file yields no
    /// usable raster and must be skipped, which is a normal outcome.
    pub fn has_data(&self) -> bool {
        self.populated_cells > 0
    }
}

/// Centroid of a footprint polygon as the vertex mean.
///
/// Returns None for an empty vertex set or non-finite vertices, which drops
/// the observation from binning.
pub fn footprint_centroid(longitudes: &[f64], latitudes: &[f64]) -> Option<(f64, f64)> {
    if longitudes.is_empty() || longitudes.len() != latitudes.len() {
        return None;
    }
    let lon = longitudes.iter().sum::<f64>() / longitudes.len() as f64;
    let lat = latitudes.iter().sum::<f64>() / latitudes.len() as f64;
    if lon.is_finite() && lat.is_finite() {
        Some((lon, lat))
    } else {
        None
    }
}

/// Aggregate a filtered batch onto the grid.
///
/// Observations with NaN density, a degenerate footprint, or a centroid
/// outside the grid extent contribute nothing.
pub fn bin_observations(filtered: &FilteredBatch, spec: &GridSpec) -> BinnedGrid {
    let shape = (spec.rows(), spec.cols());
    let mut sums = Array2::<f64>::zeros(shape);
    let mut counts = Array2::<u32>::zeros(shape);

    for index in 0..filtered.len() {
        let density = filtered.gas_column_density[index];
        if density.is_nan() {
            continue;
        }
        let Some((lon, lat)) = footprint_centroid(
            &filtered.longitude_bounds[index],
            &filtered.latitude_bounds[index],
        ) else {
            continue;
        };
        let Some((row, col)) = spec.cell_index(lon, lat) else {
            continue;
        };
        sums[[row, col]] += density;
        counts[[row, col]] += 1;
    }

    let mut populated_cells = 0;
    let mut values = Array2::<f64>::from_elem(shape, f64::NAN);
    for ((cell, &count), &sum) in values.iter_mut().zip(counts.iter()).zip(sums.iter()) {
        if count > 0 {
            *cell = sum / count as f64;
            populated_cells += 1;
        }
    }

    debug!(
        "binned {} observations into {} of {} cells",
        filtered.len(),
        populated_cells,
        shape.0 * shape.1
    );

    BinnedGrid {
        values,
        populated_cells,
    }
}
