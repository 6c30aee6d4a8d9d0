//! CSV swath-export record source.
//!
//! Reads the per-orbit CSV export layout: one `<name>.csv` file with the
//! primary observation columns, and a `<name>.fit-errors.csv` sidecar
//! holding the auxiliary fit-error fields indexed by field number. The
//! sidecar is fetched separately because older exports ship without it.

use super::RecordSource;
use crate::constants::{
    columns, BOUNDS_SEPARATOR, FIT_ERROR_FIELD_PREFIX, FIT_ERROR_SIDECAR_EXTENSION, MISSING_VALUE,
};
use crate::error::{PipelineError, Result};
use crate::models::{FitErrors, ScanDirection, SwathRecords};
use csv::StringRecord;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Record source for the CSV swath export layout
#[derive(Debug, Default)]
pub struct CsvRecordSource;

impl CsvRecordSource {
    pub fn new() -> Self {
        Self
    }

    /// Path of the fit-error sidecar next to a swath file
    pub fn sidecar_path(path: &Path) -> PathBuf {
        path.with_extension(FIT_ERROR_SIDECAR_EXTENSION)
    }
}

/// Header name to column position mapping for one file
struct ColumnMap {
    positions: HashMap<String, usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(index, name)| (name.trim().to_string(), index))
            .collect();
        Self { positions }
    }

    fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Position of a column that must exist for the file to be readable
    fn require(&self, path: &Path, name: &str) -> Result<usize> {
        self.get(name)
            .ok_or_else(|| PipelineError::format(path, format!("missing column '{name}'")))
    }
}

fn field<'r>(path: &Path, record: &'r StringRecord, position: usize, line: u64) -> Result<&'r str> {
    record.get(position).ok_or_else(|| {
        PipelineError::format(path, format!("truncated record on line {line}"))
    })
}

fn parse_i64(path: &Path, value: &str, name: &str, line: u64) -> Result<i64> {
    value.trim().parse().map_err(|_| {
        PipelineError::format(path, format!("invalid {name} '{value}' on line {line}"))
    })
}

fn parse_f64(path: &Path, value: &str, name: &str, line: u64) -> Result<f64> {
    value.trim().parse().map_err(|_| {
        PipelineError::format(path, format!("invalid {name} '{value}' on line {line}"))
    })
}

fn parse_u16(path: &Path, value: &str, name: &str, line: u64) -> Result<u16> {
    value.trim().parse().map_err(|_| {
        PipelineError::format(path, format!("invalid {name} '{value}' on line {line}"))
    })
}

/// Density accepts the product's missing-value marker as NaN
fn parse_density(path: &Path, value: &str, line: u64) -> Result<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == MISSING_VALUE {
        return Ok(f64::NAN);
    }
    parse_f64(path, trimmed, columns::GAS_COLUMN_DENSITY, line)
}

/// Semicolon-joined footprint vertex coordinates
fn parse_bounds(path: &Path, value: &str, name: &str, line: u64) -> Result<Vec<f64>> {
    value
        .split(BOUNDS_SEPARATOR)
        .map(|vertex| parse_f64(path, vertex, name, line))
        .collect()
}

impl RecordSource for CsvRecordSource {
    fn open_swath(&self, path: &Path) -> Result<SwathRecords> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| PipelineError::format(path, e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| PipelineError::format(path, e.to_string()))?
            .clone();
        let map = ColumnMap::from_headers(&headers);

        // A file without the gas dataset is a different product variant, not
        // a malformed file.
        let density_pos = map
            .get(columns::GAS_COLUMN_DENSITY)
            .ok_or_else(|| PipelineError::NoData {
                path: path.to_path_buf(),
            })?;

        let time_pos = map.require(path, columns::TIME)?;
        let scan_pos = map.require(path, columns::SCAN_DIRECTION)?;
        let cloud_pos = map.require(path, columns::CLOUD_FRACTION)?;
        let lon_pos = map.require(path, columns::LONGITUDE_BOUNDS)?;
        let lat_pos = map.require(path, columns::LATITUDE_BOUNDS)?;
        let validity_pos = map.require(path, columns::VALIDITY)?;

        let mut records = SwathRecords::default();
        for row in reader.records() {
            let row = row.map_err(|e| PipelineError::format(path, e.to_string()))?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();

            records.time.push(parse_i64(
                path,
                field(path, &row, time_pos, line)?,
                columns::TIME,
                line,
            )?);

            let scan = field(path, &row, scan_pos, line)?;
            records.scan_direction.push(
                scan.parse::<ScanDirection>()
                    .map_err(|reason| {
                        PipelineError::format(path, format!("{reason} on line {line}"))
                    })?,
            );

            records.cloud_fraction.push(parse_f64(
                path,
                field(path, &row, cloud_pos, line)?,
                columns::CLOUD_FRACTION,
                line,
            )?);
            records.longitude_bounds.push(parse_bounds(
                path,
                field(path, &row, lon_pos, line)?,
                columns::LONGITUDE_BOUNDS,
                line,
            )?);
            records.latitude_bounds.push(parse_bounds(
                path,
                field(path, &row, lat_pos, line)?,
                columns::LATITUDE_BOUNDS,
                line,
            )?);
            records
                .gas_column_density
                .push(parse_density(path, field(path, &row, density_pos, line)?, line)?);
            records.validity.push(parse_u16(
                path,
                field(path, &row, validity_pos, line)?,
                columns::VALIDITY,
                line,
            )?);
        }

        debug!("decoded {} observations from {}", records.len(), path.display());
        Ok(records)
    }

    fn fetch_fit_errors(&self, path: &Path) -> Result<FitErrors> {
        let sidecar = Self::sidecar_path(path);
        if !sidecar.exists() {
            return Err(PipelineError::FieldMissing {
                path: path.to_path_buf(),
                field: format!("{FIT_ERROR_FIELD_PREFIX}*"),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&sidecar)
            .map_err(|e| PipelineError::format(&sidecar, e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| PipelineError::format(&sidecar, e.to_string()))?
            .clone();
        let map = ColumnMap::from_headers(&headers);

        let mut positions = [0usize; 3];
        for (index, position) in positions.iter_mut().enumerate() {
            let name = format!("{FIT_ERROR_FIELD_PREFIX}{index}");
            *position = map.get(&name).ok_or_else(|| PipelineError::FieldMissing {
                path: path.to_path_buf(),
                field: name,
            })?;
        }

        let mut errors = FitErrors::default();
        for row in reader.records() {
            let row = row.map_err(|e| PipelineError::format(&sidecar, e.to_string()))?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();

            for (index, target) in [
                &mut errors.primary,
                &mut errors.secondary,
                &mut errors.tertiary,
            ]
            .into_iter()
            .enumerate()
            {
                let name = format!("{FIT_ERROR_FIELD_PREFIX}{index}");
                let value = field(&sidecar, &row, positions[index], line)?;
                target.push(parse_f64(&sidecar, value, &name, line)?);
            }
        }

        Ok(errors)
    }
}
