//! Failure classification tests for the batch loop

use super::{mixed_quality_rows, write_orbit, SIDECAR_HEADER, SWATH_HEADER};
use crate::config::ProcessorConfig;
use crate::error::PipelineError;
use crate::processor::BatchProcessor;
use crate::raster::GeoTiffWriter;
use crate::source::CsvRecordSource;
use std::fs;
use tempfile::TempDir;

fn processor(temp_dir: &TempDir) -> BatchProcessor<CsvRecordSource, GeoTiffWriter> {
    BatchProcessor::new(
        CsvRecordSource::new(),
        GeoTiffWriter::new(),
        ProcessorConfig::default().without_progress(),
        temp_dir.path().join("l3"),
    )
    .unwrap()
}

#[test]
fn test_missing_gas_dataset_fails_with_no_data() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("orbit_nodata.csv");
    fs::write(
        &path,
        "time,scan_direction,cloud_fraction,longitude_bounds,latitude_bounds,validity\n\
         0,forward,0.05,-60.0,-30.0,49152\n",
    )
    .unwrap();

    let result = processor(&temp_dir).process_file(&path);
    assert!(matches!(result.unwrap_err(), PipelineError::NoData { .. }));
}

#[test]
fn test_missing_sidecar_fails_with_field_missing() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("orbit_old.csv");
    fs::write(
        &path,
        format!("{SWATH_HEADER}0,forward,0.05,-60.0,-30.0,1.0,49152\n"),
    )
    .unwrap();

    let result = processor(&temp_dir).process_file(&path);
    assert!(matches!(
        result.unwrap_err(),
        PipelineError::FieldMissing { .. }
    ));
}

#[test]
fn test_misaligned_sidecar_fails_with_alignment() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("orbit_short.csv");
    fs::write(
        &path,
        format!(
            "{SWATH_HEADER}\
             0,forward,0.05,-60.0,-30.0,1.0,49152\n\
             1,forward,0.05,-60.0,-30.0,1.0,49152\n"
        ),
    )
    .unwrap();
    fs::write(
        CsvRecordSource::sidecar_path(&path),
        format!("{SIDECAR_HEADER}0,0.001,0.005,0.1\n"),
    )
    .unwrap();

    let result = processor(&temp_dir).process_file(&path);
    match result.unwrap_err() {
        PipelineError::Alignment {
            records,
            fit_errors,
            ..
        } => {
            assert_eq!(records, 2);
            assert_eq!(fit_errors, 1);
        }
        other => panic!("expected Alignment error, got {other:?}"),
    }
}

#[test]
fn test_batch_continues_past_classified_failures() {
    let temp_dir = TempDir::new().unwrap();
    let corpus = temp_dir.path().join("corpus");
    fs::create_dir_all(&corpus).unwrap();

    // One good orbit, one without the gas dataset, one truncated, one with a
    // misaligned sidecar. Only the good one yields a raster; the rest are
    // logged and counted, and the run still completes.
    let (swath, sidecar) = mixed_quality_rows();
    write_orbit(&corpus, "orbit_good", swath, sidecar);

    fs::write(
        corpus.join("orbit_nodata.csv"),
        "time,scan_direction,cloud_fraction,longitude_bounds,latitude_bounds,validity\n",
    )
    .unwrap();

    write_orbit(
        &corpus,
        "orbit_garbled",
        "0,forward,broken,-60.0,-30.0,1.0,49152\n",
        "0,0.001,0.005,0.1\n",
    );

    write_orbit(
        &corpus,
        "orbit_short",
        "0,forward,0.05,-60.0,-30.0,1.0,49152\n\
         1,forward,0.05,-60.0,-30.0,1.0,49152\n",
        "0,0.001,0.005,0.1\n",
    );

    let stats = processor(&temp_dir).process_corpus(&corpus).unwrap();

    assert_eq!(stats.files_scanned, 4);
    assert_eq!(stats.rasters_written, 1);
    assert_eq!(stats.files_failed, 3);
    assert!(temp_dir.path().join("l3").join("orbit_good_L3.tif").exists());
}

#[test]
fn test_missing_corpus_root_aborts_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let result = processor(&temp_dir).process_corpus(&temp_dir.path().join("nonexistent"));

    let error = result.unwrap_err();
    assert!(matches!(error, PipelineError::CorpusNotFound { .. }));
    // Unclassified for the per-file loop: this aborts rather than skips
    assert_eq!(error.skip_reason(), None);
}

#[test]
fn test_invalid_grid_is_rejected_at_construction() {
    let temp_dir = TempDir::new().unwrap();
    let config = ProcessorConfig::default();
    let mut bad = config.clone();
    bad.grid.resolution = -1.0;

    let result = BatchProcessor::new(
        CsvRecordSource::new(),
        GeoTiffWriter::new(),
        bad,
        temp_dir.path().join("l3"),
    );
    assert!(matches!(
        result.unwrap_err(),
        PipelineError::Configuration { .. }
    ));
}
