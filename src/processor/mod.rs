//! Batch orchestration of the per-file gridding pipeline.
//!
//! Drives Read -> Filter -> Bin -> Emit for every file in the corpus. Files
//! that yield nothing usable are skipped; classified per-file failures are
//! logged and counted without stopping the batch. Unclassified failures
//! propagate, so new failure modes surface instead of hiding as "no data".
//! No state is shared across files beyond the outcome counters.

pub mod discovery;

#[cfg(test)]
mod tests;

use crate::config::ProcessorConfig;
use crate::error::Result;
use crate::filter::apply_quality_filter;
use crate::grid::bin_observations;
use crate::models::{BatchStats, FileOutcome, ObservationBatch, SkipReason};
use crate::raster::{raster_output_path, RasterArtifact, RasterWriter};
use crate::source::RecordSource;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

/// Sequential corpus processor: one file is fully read, filtered, binned,
/// and emitted before the next begins.
#[derive(Debug)]
pub struct BatchProcessor<S, W> {
    source: S,
    writer: W,
    config: ProcessorConfig,
    output_dir: PathBuf,
}

impl<S: RecordSource, W: RasterWriter> BatchProcessor<S, W> {
    /// Build a processor, validating the grid and creating the output
    /// directory so `process_file` can emit without further setup.
    pub fn new(source: S, writer: W, config: ProcessorConfig, output_dir: PathBuf) -> Result<Self> {
        config.grid.validate()?;
        fs::create_dir_all(&output_dir)?;
        Ok(Self {
            source,
            writer,
            config,
            output_dir,
        })
    }

    /// Process every swath file under the corpus root.
    ///
    /// Always runs to the end of the corpus unless an unclassified error
    /// occurs; the operator discovers omissions from the per-file log lines
    /// and the final counts.
    pub fn process_corpus(&self, input_root: &Path) -> Result<BatchStats> {
        let start_time = Instant::now();

        let files = discovery::discover_swath_files(input_root, &self.config.input_extension)?;
        println!(
            "{} {} swath files under {}",
            "Found".bright_green(),
            files.len().to_string().bright_white().bold(),
            input_root.display()
        );

        let progress = if self.config.show_progress {
            ProgressBar::new(files.len() as u64).with_style(
                ProgressStyle::with_template(
                    "{bar:40.cyan/blue} {pos}/{len} files ({eta})",
                )
                .expect("valid progress template"),
            )
        } else {
            ProgressBar::hidden()
        };

        let mut stats = BatchStats {
            files_scanned: files.len(),
            ..Default::default()
        };

        for path in &files {
            match self.process_file(path) {
                Ok(FileOutcome::Written(output)) => {
                    stats.rasters_written += 1;
                    debug!("{} -> {}", path.display(), output.display());
                }
                Ok(FileOutcome::Skipped(reason)) => {
                    stats.files_skipped += 1;
                    warn!("skipping {}: {}", path.display(), reason);
                }
                Err(error) => match error.skip_reason() {
                    Some(reason) => {
                        stats.files_failed += 1;
                        warn!("skipping {}: {} ({})", path.display(), reason, error);
                    }
                    None => {
                        progress.finish_and_clear();
                        return Err(error);
                    }
                },
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        stats.processing_time_ms = start_time.elapsed().as_millis();
        self.print_summary(&stats);
        Ok(stats)
    }

    /// Run the per-file pipeline: Read -> Filter -> Bin -> Emit.
    ///
    /// Returns a skip outcome when the file yields nothing to grid; errors
    /// carry their own classification for the batch loop.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let records = self.source.open_swath(path)?;
        let fit_errors = self.source.fetch_fit_errors(path)?;
        let batch = ObservationBatch::assemble(path, records, fit_errors)?;

        let filtered = apply_quality_filter(&batch, &self.config.filter);
        if filtered.is_empty() {
            return Ok(FileOutcome::Skipped(SkipReason::NoObservations));
        }

        let grid = bin_observations(&filtered, &self.config.grid);
        if !grid.has_data() {
            return Ok(FileOutcome::Skipped(SkipReason::EmptyGrid));
        }

        let output = raster_output_path(&self.output_dir, path);
        let populated = grid.populated_cells;
        let artifact = RasterArtifact::new(grid, &self.config.grid, output.clone());
        self.writer.write(&artifact)?;

        debug!(
            "emitted {} populated cells for {}",
            populated,
            path.display()
        );
        Ok(FileOutcome::Written(output))
    }

    fn print_summary(&self, stats: &BatchStats) {
        println!("\n{}", "Processing Summary".bright_green().bold());
        println!(
            "  {} {}",
            "Files scanned:".bright_cyan(),
            stats.files_scanned.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Rasters written:".bright_cyan(),
            stats.rasters_written.to_string().bright_white().bold()
        );
        println!(
            "  {} {}",
            "Files skipped:".bright_cyan(),
            stats.files_skipped.to_string().bright_white()
        );
        if stats.files_failed > 0 {
            println!(
                "  {} {}",
                "Files failed:".bright_red(),
                stats.files_failed.to_string().bright_red().bold()
            );
        }
        println!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            stats.processing_time_ms.to_string().bright_white()
        );
    }
}
