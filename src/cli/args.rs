//! Command-line argument definitions for the L3 gridder
//!
//! Defines the CLI interface using the clap derive API, with validation
//! helpers that turn arguments into pipeline configuration.

use crate::config::{FilterConfig, GridSpec};
use crate::constants::DEFAULT_INPUT_EXTENSION;
use crate::error::{PipelineError, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the L3 gridder
///
/// Converts satellite L2 swath retrievals into daily L3 gridded GeoTIFF
/// rasters, one per input file.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "l3grid",
    version,
    about = "Convert satellite L2 swath retrievals into daily L3 GeoTIFF rasters",
    long_about = "Processes a corpus of satellite swath-measurement files into daily gridded \
                  raster products. Each file's observations are screened against the recommended \
                  quality thresholds, binned onto a fixed geographic grid, and written as a \
                  georeferenced WGS84 GeoTIFF. Files that yield no usable data are skipped and \
                  logged; the run always continues to the end of the corpus."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Process a swath corpus into gridded rasters (main command)
    Process(ProcessArgs),
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Input corpus root, searched recursively for swath files
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Input corpus root directory"
    )]
    pub input_path: PathBuf,

    /// Output directory for the emitted rasters
    ///
    /// Will be created if it doesn't exist. Rasters are named from the input
    /// file stem, e.g. orbit_0312.csv -> orbit_0312_L3.tif.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = "./l3",
        help = "Output directory for emitted rasters"
    )]
    pub output_path: PathBuf,

    /// Extension of swath files to discover under the input root
    #[arg(
        short = 'e',
        long = "extension",
        value_name = "EXT",
        default_value = DEFAULT_INPUT_EXTENSION,
        help = "Swath file extension to discover"
    )]
    pub extension: String,

    /// Grid extent as south,north,west,east in degrees
    ///
    /// Defaults to the built-in South American study extent.
    #[arg(
        long = "extent",
        value_name = "BBOX",
        help = "Grid extent as south,north,west,east (degrees)"
    )]
    pub extent: Option<String>,

    /// Grid cell size in degrees, uniform in both axes
    #[arg(
        short = 'r',
        long = "resolution",
        value_name = "DEGREES",
        help = "Grid cell size in degrees"
    )]
    pub resolution: Option<f64>,

    /// Maximum tolerated cloud fraction
    #[arg(
        long = "max-cloud-fraction",
        value_name = "FRACTION",
        help = "Reject observations with cloud fraction at or above this value"
    )]
    pub max_cloud_fraction: Option<f64>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl ProcessArgs {
    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input_path.exists() {
            return Err(PipelineError::configuration(format!(
                "Input path does not exist: {}",
                self.input_path.display()
            )));
        }
        if !self.input_path.is_dir() {
            return Err(PipelineError::configuration(format!(
                "Input path is not a directory: {}",
                self.input_path.display()
            )));
        }
        if self.extension.is_empty() {
            return Err(PipelineError::configuration(
                "Swath file extension cannot be empty".to_string(),
            ));
        }
        if let Some(fraction) = self.max_cloud_fraction {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(PipelineError::configuration(format!(
                    "Cloud fraction threshold must be within [0, 1], got {fraction}"
                )));
            }
        }
        // Grid arguments are validated together by GridSpec
        self.grid_spec()?;
        Ok(())
    }

    /// Build the grid specification from the extent/resolution arguments
    pub fn grid_spec(&self) -> Result<GridSpec> {
        let defaults = GridSpec::default();
        let resolution = self.resolution.unwrap_or(defaults.resolution);
        match &self.extent {
            Some(extent) => {
                let (south, north, west, east) = parse_extent(extent)?;
                GridSpec::new(south, north, west, east, resolution)
            }
            None => GridSpec::new(
                defaults.south,
                defaults.north,
                defaults.west,
                defaults.east,
                resolution,
            ),
        }
    }

    /// Build the filter configuration from the threshold arguments
    pub fn filter_config(&self) -> FilterConfig {
        let mut filter = FilterConfig::default();
        if let Some(fraction) = self.max_cloud_fraction {
            filter.max_cloud_fraction = fraction;
        }
        filter
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show a progress bar (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Parse a south,north,west,east extent string
fn parse_extent(extent: &str) -> Result<(f64, f64, f64, f64)> {
    let parts: Vec<&str> = extent.split(',').collect();
    if parts.len() != 4 {
        return Err(PipelineError::configuration(
            "Extent must be in format: south,north,west,east".to_string(),
        ));
    }

    let mut values = [0.0_f64; 4];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part.trim().parse().map_err(|_| {
            PipelineError::configuration(format!("Invalid extent component: {part}"))
        })?;
    }

    Ok((values[0], values[1], values[2], values[3]))
}
