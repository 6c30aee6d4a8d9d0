//! Quality screening for swath observations.
//!
//! Applies the recommended quality predicates as a fixed conjunction over one
//! file's observation batch and projects the survivors down to the three
//! fields the gridding stage needs. Pure function over the batch; an empty
//! result is a normal outcome, not an error.

use crate::config::FilterConfig;
use crate::models::{FilteredBatch, ObservationBatch, ScanDirection};
use tracing::debug;

/// Check whether observation `index` passes every quality predicate.
///
/// Predicates, all of which must hold:
/// - forward scan (backward scans have a different viewing geometry)
/// - cloud fraction below the configured maximum
/// - validity bitmask has every configured bit set (`flags & mask == mask`)
/// - all three fit errors non-negative (negative means a degenerate fit)
/// - primary and secondary fit errors below their recommended maxima;
///   the tertiary error carries no upper bound
pub fn passes_quality_filter(batch: &ObservationBatch, index: usize, config: &FilterConfig) -> bool {
    let records = &batch.records;
    let errors = &batch.fit_errors;

    records.scan_direction[index] == ScanDirection::Forward
        && records.cloud_fraction[index] < config.max_cloud_fraction
        && records.validity[index] & config.validity_mask == config.validity_mask
        && errors.primary[index] >= 0.0
        && errors.secondary[index] >= 0.0
        && errors.tertiary[index] >= 0.0
        && errors.primary[index] < config.max_primary_fit_error
        && errors.secondary[index] < config.max_secondary_fit_error
}

/// Apply the quality predicate conjunction to a whole batch.
///
/// Survivors keep only `longitude_bounds`, `latitude_bounds`, and
/// `gas_column_density`; all other fields are dropped to bound memory use on
/// large files.
pub fn apply_quality_filter(batch: &ObservationBatch, config: &FilterConfig) -> FilteredBatch {
    let mut filtered = FilteredBatch::with_capacity(batch.len());

    for index in 0..batch.len() {
        if passes_quality_filter(batch, index, config) {
            filtered
                .longitude_bounds
                .push(batch.records.longitude_bounds[index].clone());
            filtered
                .latitude_bounds
                .push(batch.records.latitude_bounds[index].clone());
            filtered
                .gas_column_density
                .push(batch.records.gas_column_density[index]);
        }
    }

    debug!(
        "quality filter: {} -> {} observations ({} rejected)",
        batch.len(),
        filtered.len(),
        batch.len() - filtered.len()
    );

    filtered
}
