mod cli;
mod grid_cmd;
mod normalize_cmd;
mod page_range;
mod shared;
mod stats_cmd;
mod text_cmd;
mod words_cmd;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Stats {
            ref file,
            ref pages,
            ref format,
        } => stats_cmd::run(file, pages.as_deref(), format),
        Commands::Text {
            ref file,
            ref pages,
            alts,
        } => text_cmd::run(file, pages.as_deref(), alts),
        Commands::Words {
            ref file,
            ref bbox,
            page,
            min_overlap,
            ref format,
        } => words_cmd::run(file, bbox, page, min_overlap, format),
        Commands::Grid {
            ref file,
            page,
            step,
        } => grid_cmd::run(file, page, step),
        Commands::Normalize {
            ref file,
            ref output,
            detail,
            reset_orientation,
        } => normalize_cmd::run(file, output.as_deref(), detail.into(), reset_orientation),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}

/// Log to stderr at `warn` unless `RUST_LOG` says otherwise.
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
