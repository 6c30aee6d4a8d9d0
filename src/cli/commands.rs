//! Command implementations for the L3 gridder CLI
//!
//! Wires validated arguments into a configured batch processor, sets up
//! structured logging, and runs the corpus.

use crate::cli::args::{Args, Commands, ProcessArgs};
use crate::config::ProcessorConfig;
use crate::models::BatchStats;
use crate::processor::BatchProcessor;
use crate::raster::GeoTiffWriter;
use crate::source::CsvRecordSource;
use crate::Result;
use tracing::{debug, info};

/// Main command runner
///
/// Dispatches to the requested subcommand after logging is initialized.
pub fn run(args: Args) -> Result<BatchStats> {
    match args.get_command() {
        Commands::Process(process_args) => run_process(process_args),
    }
}

/// Run the process command: validate, configure, and grid the corpus
fn run_process(args: ProcessArgs) -> Result<BatchStats> {
    setup_logging(&args);

    info!("Starting L3 gridding run");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = ProcessorConfig::default()
        .with_filter(args.filter_config())
        .with_grid(args.grid_spec()?)
        .with_input_extension(&args.extension);
    let config = if args.show_progress() {
        config
    } else {
        config.without_progress()
    };
    debug!("Processor configuration: {:?}", config);

    let processor = BatchProcessor::new(
        CsvRecordSource::new(),
        GeoTiffWriter::new(),
        config,
        args.output_path.clone(),
    )?;

    processor.process_corpus(&args.input_path)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &ProcessArgs) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("l3grid={log_level}")));

    // try_init so repeated calls in tests don't panic
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();

    debug!("Logging initialized at level: {}", log_level);
}
