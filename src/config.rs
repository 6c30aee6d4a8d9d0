//! Configuration for filtering, gridding, and batch processing.
//!
//! The recommended quality thresholds and the grid specification are explicit
//! immutable configuration values rather than literals inside the engines, so
//! tests can vary thresholds without touching engine code.

use crate::constants::{
    DEFAULT_GRID_EAST, DEFAULT_GRID_NORTH, DEFAULT_GRID_RESOLUTION, DEFAULT_GRID_SOUTH,
    DEFAULT_GRID_WEST, DEFAULT_INPUT_EXTENSION, DEFAULT_MAX_CLOUD_FRACTION,
    DEFAULT_MAX_PRIMARY_FIT_ERROR, DEFAULT_MAX_SECONDARY_FIT_ERROR, DEFAULT_VALIDITY_MASK,
};
use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};

/// Quality predicate thresholds applied to every observation.
///
/// The same configuration is used for every file in a corpus run; it is never
/// mutated while processing. Note the asymmetry carried over from the
/// recommended product thresholds: the tertiary fit error has a sign check
/// but no upper bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Observations with cloud fraction at or above this value are rejected
    pub max_cloud_fraction: f64,

    /// Every retained observation must satisfy `validity & mask == mask`
    pub validity_mask: u16,

    /// Upper bound (exclusive) on the primary gas fit error
    pub max_primary_fit_error: f64,

    /// Upper bound (exclusive) on the first co-retrieved species' fit error
    pub max_secondary_fit_error: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_cloud_fraction: DEFAULT_MAX_CLOUD_FRACTION,
            validity_mask: DEFAULT_VALIDITY_MASK,
            max_primary_fit_error: DEFAULT_MAX_PRIMARY_FIT_ERROR,
            max_secondary_fit_error: DEFAULT_MAX_SECONDARY_FIT_ERROR,
        }
    }
}

/// Immutable geographic grid specification.
///
/// Cell (row 0, col 0) is the north-west corner; row index grows southward
/// and column index grows eastward. The extent is expected to be an integer
/// number of cells in both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
    /// Cell size in degrees, uniform in both axes
    pub resolution: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            south: DEFAULT_GRID_SOUTH,
            north: DEFAULT_GRID_NORTH,
            west: DEFAULT_GRID_WEST,
            east: DEFAULT_GRID_EAST,
            resolution: DEFAULT_GRID_RESOLUTION,
        }
    }
}

impl GridSpec {
    /// Create a validated grid specification
    pub fn new(south: f64, north: f64, west: f64, east: f64, resolution: f64) -> Result<Self> {
        let spec = Self {
            south,
            north,
            west,
            east,
            resolution,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Validate bounds ordering and resolution
    pub fn validate(&self) -> Result<()> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(PipelineError::configuration(format!(
                "grid resolution must be positive, got {}",
                self.resolution
            )));
        }
        if self.south >= self.north {
            return Err(PipelineError::configuration(format!(
                "grid south ({}) must be below north ({})",
                self.south, self.north
            )));
        }
        if self.west >= self.east {
            return Err(PipelineError::configuration(format!(
                "grid west ({}) must be west of east ({})",
                self.west, self.east
            )));
        }
        if self.rows() == 0 || self.cols() == 0 {
            return Err(PipelineError::configuration(
                "grid extent is smaller than one cell".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of grid rows (latitude axis)
    pub fn rows(&self) -> usize {
        ((self.north - self.south) / self.resolution).round() as usize
    }

    /// Number of grid columns (longitude axis)
    pub fn cols(&self) -> usize {
        ((self.east - self.west) / self.resolution).round() as usize
    }
}

/// Global configuration for a corpus run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Quality predicate thresholds
    pub filter: FilterConfig,

    /// Target grid specification
    pub grid: GridSpec,

    /// Extension of swath files to discover under the input root
    pub input_extension: String,

    /// Show a progress bar while processing the corpus
    pub show_progress: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            grid: GridSpec::default(),
            input_extension: DEFAULT_INPUT_EXTENSION.to_string(),
            show_progress: true,
        }
    }
}

impl ProcessorConfig {
    /// Use a custom filter configuration
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Use a custom grid specification
    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }

    /// Use a custom input file extension
    pub fn with_input_extension(mut self, extension: impl Into<String>) -> Self {
        self.input_extension = extension.into();
        self
    }

    /// Disable the progress bar (quiet mode)
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }
}
