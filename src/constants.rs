//! Application constants for the L3 gridder
//!
//! This module contains the recommended quality thresholds, the default grid
//! specification, column names of the swath export layout, and output naming
//! used throughout the application.

// =============================================================================
// Recommended Quality Thresholds
// =============================================================================

/// Maximum tolerated cloud fraction (observations at or above are rejected)
pub const DEFAULT_MAX_CLOUD_FRACTION: f64 = 0.2;

/// Validity bitmask required on every retained observation.
///
/// Bit 15: retrieval model converged. Bit 14: solar zenith angle below the
/// retrieval's valid threshold. Both must be set (AND-equals-mask test).
pub const DEFAULT_VALIDITY_MASK: u16 = 0xC000;

/// Maximum recommended fit error for the primary gas scale factor
pub const DEFAULT_MAX_PRIMARY_FIT_ERROR: f64 = 0.005;

/// Maximum recommended fit error for the first co-retrieved species
pub const DEFAULT_MAX_SECONDARY_FIT_ERROR: f64 = 0.01;

/// Individual validity flag bits
pub mod validity_bits {
    /// Retrieval model convergence flag (bit 15)
    pub const CONVERGED: u16 = 0x8000;

    /// Solar zenith angle below threshold flag (bit 14)
    pub const SOLAR_ZENITH_OK: u16 = 0x4000;
}

// =============================================================================
// Default Grid Specification
// =============================================================================

/// Southern latitude bound of the default grid (degrees)
pub const DEFAULT_GRID_SOUTH: f64 = -58.0;

/// Northern latitude bound of the default grid (degrees)
pub const DEFAULT_GRID_NORTH: f64 = -15.0;

/// Western longitude bound of the default grid (degrees)
pub const DEFAULT_GRID_WEST: f64 = -79.0;

/// Eastern longitude bound of the default grid (degrees)
pub const DEFAULT_GRID_EAST: f64 = -48.0;

/// Default cell size in degrees, uniform in both axes
pub const DEFAULT_GRID_RESOLUTION: f64 = 0.5;

// =============================================================================
// Coordinate Reference System
// =============================================================================

/// Proj4 descriptor for unprojected WGS84 geographic coordinates
pub const WGS84_PROJ4: &str = "+proj=latlong +datum=WGS84 +no_defs +ellps=WGS84 +towgs84=0,0,0";

/// EPSG code for WGS84 geographic coordinates
pub const WGS84_EPSG: u16 = 4326;

// =============================================================================
// Swath Export Layout
// =============================================================================

/// Default extension of swath export files in the input corpus
pub const DEFAULT_INPUT_EXTENSION: &str = "csv";

/// Extension of the auxiliary fit-error sidecar next to each swath file
pub const FIT_ERROR_SIDECAR_EXTENSION: &str = "fit-errors.csv";

/// Column name prefix of the auxiliary fit-error fields; the full column
/// name is the prefix followed by the field index (0 = primary gas,
/// 1 = first co-retrieved species, 2 = second co-retrieved species)
pub const FIT_ERROR_FIELD_PREFIX: &str = "fit_param_err_";

/// Separator between footprint polygon vertices inside one bounds cell
pub const BOUNDS_SEPARATOR: char = ';';

/// Missing value indicator accepted for the gas column density
pub const MISSING_VALUE: &str = "NA";

/// Column names of the swath export layout
pub mod columns {
    pub const TIME: &str = "time";
    pub const SCAN_DIRECTION: &str = "scan_direction";
    pub const CLOUD_FRACTION: &str = "cloud_fraction";
    pub const LONGITUDE_BOUNDS: &str = "longitude_bounds";
    pub const LATITUDE_BOUNDS: &str = "latitude_bounds";
    pub const GAS_COLUMN_DENSITY: &str = "gas_column_density";
    pub const VALIDITY: &str = "validity";
}

// =============================================================================
// Output Naming
// =============================================================================

/// Suffix appended to the input file stem for the emitted raster
pub const OUTPUT_SUFFIX: &str = "_L3";

/// Extension of the emitted raster artifacts
pub const OUTPUT_EXTENSION: &str = "tif";

/// Derive the output raster filename from an input file stem.
///
/// Deterministic and injective over distinct stems: same stem always maps to
/// the same name, and distinct stems never collide.
pub fn output_filename(input_stem: &str) -> String {
    format!("{input_stem}{OUTPUT_SUFFIX}.{OUTPUT_EXTENSION}")
}
