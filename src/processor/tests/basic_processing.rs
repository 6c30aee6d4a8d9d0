//! End-to-end pipeline tests over synthetic corpora

use super::{mixed_quality_rows, write_orbit};
use crate::config::ProcessorConfig;
use crate::models::{FileOutcome, SkipReason};
use crate::processor::BatchProcessor;
use crate::raster::{GeoTiffWriter, RasterArtifact, RasterWriter};
use crate::source::CsvRecordSource;
use std::cell::RefCell;
use std::path::PathBuf;
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

/// Writer that only records which artifacts it was asked to emit
#[derive(Default)]
struct RecordingWriter {
    written: RefCell<Vec<PathBuf>>,
}

impl RasterWriter for RecordingWriter {
    fn write(&self, artifact: &RasterArtifact) -> crate::Result<()> {
        self.written.borrow_mut().push(artifact.path.clone());
        Ok(())
    }
}

#[test]
fn test_mixed_quality_file_produces_one_cell_raster() {
    let temp_dir = TempDir::new().unwrap();
    let (swath, sidecar) = mixed_quality_rows();
    let path = write_orbit(temp_dir.path(), "orbit_0312", swath, sidecar);

    let processor = processor(&temp_dir);
    let outcome = processor.process_file(&path).unwrap();

    let output = match outcome {
        FileOutcome::Written(output) => output,
        other => panic!("expected a written raster, got {other:?}"),
    };
    assert_eq!(
        output.file_name().unwrap().to_string_lossy(),
        "orbit_0312_L3.tif"
    );

    // Exactly one populated cell holding the mean of 1.0 and 3.0
    let file = std::fs::File::open(&output).unwrap();
    let mut decoder = tiff::decoder::Decoder::new(file).unwrap();
    assert_eq!(decoder.dimensions().unwrap(), (62, 86));
    match decoder.read_image().unwrap() {
        tiff::decoder::DecodingResult::F64(band) => {
            let populated: Vec<f64> = band.iter().copied().filter(|v| !v.is_nan()).collect();
            assert_eq!(populated, vec![2.0]);
        }
        other => panic!("expected f64 band, got {other:?}"),
    }
}

#[test]
fn test_single_file_emits_without_a_prior_corpus_run() {
    // process_file must not depend on process_corpus having set up the
    // output directory first
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("l3");
    assert!(!output_dir.exists());

    let processor = processor(&temp_dir);
    assert!(output_dir.is_dir());

    let (swath, sidecar) = mixed_quality_rows();
    let path = write_orbit(temp_dir.path(), "orbit_solo", swath, sidecar);
    let outcome = processor.process_file(&path).unwrap();

    assert!(matches!(outcome, FileOutcome::Written(ref p) if p.exists()));
}

#[test]
fn test_all_rejected_file_is_skipped_without_emitting() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_orbit(
        temp_dir.path(),
        "orbit_cloudy",
        "0,forward,0.90,-60.2;-60.0,-30.2;-30.0,1.0,49152\n",
        "0,0.001,0.005,0.1\n",
    );

    let writer = RecordingWriter::default();
    let processor = BatchProcessor::new(
        CsvRecordSource::new(),
        writer,
        ProcessorConfig::default().without_progress(),
        temp_dir.path().join("l3"),
    )
    .unwrap();

    let outcome = processor.process_file(&path).unwrap();
    assert_eq!(outcome, FileOutcome::Skipped(SkipReason::NoObservations));
}

#[test]
fn test_out_of_extent_file_is_skipped_without_emitting() {
    let temp_dir = TempDir::new().unwrap();
    // Passes every quality predicate but the footprint sits far outside the
    // grid extent, so every cell stays empty.
    let path = write_orbit(
        temp_dir.path(),
        "orbit_north",
        "0,forward,0.05,10.2;10.0,40.2;40.0,1.0,49152\n",
        "0,0.001,0.005,0.1\n",
    );

    let writer = RecordingWriter::default();
    let processor = BatchProcessor::new(
        CsvRecordSource::new(),
        writer,
        ProcessorConfig::default().without_progress(),
        temp_dir.path().join("l3"),
    )
    .unwrap();

    let outcome = processor.process_file(&path).unwrap();
    assert_eq!(outcome, FileOutcome::Skipped(SkipReason::EmptyGrid));
}

#[test]
fn test_corpus_run_counts_outcomes() {
    let temp_dir = TempDir::new().unwrap();
    let corpus = temp_dir.path().join("corpus");
    std::fs::create_dir_all(&corpus).unwrap();

    let (swath, sidecar) = mixed_quality_rows();
    write_orbit(&corpus, "orbit_good", swath, sidecar);
    write_orbit(
        &corpus,
        "orbit_cloudy",
        "0,forward,0.90,-60.2;-60.0,-30.2;-30.0,1.0,49152\n",
        "0,0.001,0.005,0.1\n",
    );

    let processor = processor(&temp_dir);
    let stats = processor.process_corpus(&corpus).unwrap();

    assert_eq!(stats.files_scanned, 2);
    assert_eq!(stats.rasters_written, 1);
    assert_eq!(stats.files_skipped, 1);
    assert_eq!(stats.files_failed, 0);
    assert_eq!(stats.files_without_output(), 1);

    assert!(temp_dir.path().join("l3").join("orbit_good_L3.tif").exists());
}

#[test]
fn test_empty_corpus_completes() {
    let temp_dir = TempDir::new().unwrap();
    let corpus = temp_dir.path().join("corpus");
    std::fs::create_dir_all(&corpus).unwrap();

    let processor = processor(&temp_dir);
    let stats = processor.process_corpus(&corpus).unwrap();

    assert_eq!(stats.files_scanned, 0);
    assert_eq!(stats.rasters_written, 0);
}
