//! knit-chart - knitting charts from garment measurements
//!
//! Usage:
//!   knit-chart chart <dims.json> [-o DIR] [--xlsx FILE] [--piece NAME]
//!   knit-chart outline <dims.json> --piece NAME [-o FILE]
//!   knit-chart symbols [--json]

mod cli;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cli::{cmd_chart, cmd_outline, cmd_symbols};

#[derive(Parser)]
#[command(name = "knit-chart", version, about = "Knitting charts from garment measurements")]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate charts as CSV files or one workbook
    Chart {
        /// Measurements JSON file
        dims: PathBuf,

        /// Directory for the CSV files
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Write a single .xlsx workbook instead of CSV files
        #[arg(long)]
        xlsx: Option<PathBuf>,

        /// Only this piece (front_body, back_body, sleeve)
        #[arg(short, long)]
        piece: Option<String>,
    },
    /// Write the outline of one piece as SVG
    Outline {
        /// Measurements JSON file
        dims: PathBuf,

        /// Piece to draw (front_body, back_body, sleeve)
        #[arg(short, long)]
        piece: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List chart symbols with their codes
    Symbols {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    match cli.command {
        Command::Chart { dims, output, xlsx, piece } => {
            cmd_chart(&dims, &output, xlsx.as_deref(), piece.as_deref())
        }
        Command::Outline { dims, piece, output } => cmd_outline(&dims, &piece, output.as_deref()),
        Command::Symbols { json } => cmd_symbols(json),
    }
}
