use clap::Parser;
use l3grid::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_stats) => {
            // Success - the summary has already been printed by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {error:#}");
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("L3 Gridder - Satellite Swath to Raster Converter");
    println!("================================================");
    println!();
    println!("Convert L2 satellite swath retrievals into daily L3 gridded");
    println!("GeoTIFF rasters, one raster per input file.");
    println!();
    println!("USAGE:");
    println!("    l3grid <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Process a swath corpus into gridded rasters (main command)");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Process a corpus with the default grid and thresholds:");
    println!("    l3grid process --input /data/swaths --output /data/l3");
    println!();
    println!("    # Custom extent and resolution:");
    println!("    l3grid process --input /data/swaths --extent -58,-15,-79,-48 \\");
    println!("                   --resolution 0.25");
    println!();
    println!("For detailed help on any command, use:");
    println!("    l3grid process --help");
}
