use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use ocrdoc_core::OutputDetail;

/// Inspect, query and normalize OCR document snapshots.
#[derive(Debug, Parser)]
#[command(name = "ocrdoc", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show page and per-line letter statistics
    Stats {
        /// Path to the JSON snapshot
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Dump page text, one row per line
    Text {
        /// Path to the JSON snapshot
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Prefer alternative readings that are nearly as confident
        #[arg(long)]
        alts: bool,
    },

    /// List the words overlapping a box
    Words {
        /// Path to the JSON snapshot
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Query box as X,Y,W,H in page pixels
        #[arg(long, value_name = "X,Y,W,H")]
        bbox: String,

        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Minimal overlap in percent of the smaller box
        #[arg(long, default_value_t = 50.0)]
        min_overlap: f64,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the coarse word grid of a page
    Grid {
        /// Path to the JSON snapshot
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Cell size in pixels
        #[arg(long, default_value_t = 30)]
        step: u32,
    },

    /// Purge ignored and empty words and lines, then write a snapshot
    Normalize {
        /// Path to the JSON snapshot
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file. Default: stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        /// Snapshot detail level
        #[arg(long, value_enum, default_value_t = DetailArg::Normal)]
        detail: DetailArg,

        /// Map rotated words back to upright letters
        #[arg(long)]
        reset_orientation: bool,
    },
}

/// Output format for listing commands.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Snapshot detail level.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DetailArg {
    Basic,
    Normal,
    Full,
}

impl From<DetailArg> for OutputDetail {
    fn from(arg: DetailArg) -> Self {
        match arg {
            DetailArg::Basic => OutputDetail::Basic,
            DetailArg::Normal => OutputDetail::Normal,
            DetailArg::Full => OutputDetail::Full,
        }
    }
}
