use std::error::Error;
use std::io::{self, Write};

use clap::{ArgAction, Parser, Subcommand};
use commands::{
    pivots::{self, PivotsArgs},
    plot::{self, MetadataArgs, PlotArgs},
};
use evalplot_report::{DetectionReport, LandmarkingReport, RecognitionReport};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod commands;
mod inputs;

#[derive(Parser, Debug)]
#[command(name = "evalplot", version, about = "Evaluation result plotting CLI")]
struct Cli {
    /// Increase log verbosity (`-v` debug, `-vv` trace); `RUST_LOG` wins when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plot biometric recognition results (ROC, DET, IET, CMC, score distributions).
    Recognition(PlotArgs),
    /// Plot object detection results (ROC, PR, overlap).
    Detection(PlotArgs),
    /// Plot facial landmarking results (galleries, error table, error distributions).
    Landmarking(PlotArgs),
    /// Plot violin charts for metadata columns.
    Metadata(MetadataArgs),
    /// Print the pivot classification of a set of inputs as JSON.
    Pivots(PivotsArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Recognition(args) => plot::run(&RecognitionReport, &args, None),
        Command::Detection(args) => plot::run(&DetectionReport, &args, None),
        Command::Landmarking(args) => plot::run(&LandmarkingReport, &args, None),
        Command::Metadata(args) => plot::run_metadata(&args),
        Command::Pivots(args) => pivots::run(&args),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
