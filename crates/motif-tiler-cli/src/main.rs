//! motif-tiler - CLI for motif pattern fills
//!
//! Usage:
//!   motif-tiler fill <region.svg> --motif <motif.svg>        Generate a motif fill
//!   motif-tiler params [--params <file>]                     Print effective parameters
//!   motif-tiler benchmark <region.svg> --motif <motif.svg>   Benchmark fill generation

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::LevelFilter;

mod cli;

use cli::{BenchmarkArgs, FillArgs, PatternArgs};

/// Fill SVG regions with a repeated motif
#[derive(Parser)]
#[command(name = "motif-tiler")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace). RUST_LOG wins when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tile a motif over every closed shape in an SVG
    Fill(FillArgs),

    /// Print the effective pattern parameters as a JSON field set
    Params {
        #[command(flatten)]
        pattern: PatternArgs,
    },

    /// Time repeated fills of every shape in an SVG
    Benchmark(BenchmarkArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Fill(args) => cli::cmd_fill(&args),
        Commands::Params { pattern } => cli::cmd_params(&pattern),
        Commands::Benchmark(args) => cli::cmd_benchmark(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
