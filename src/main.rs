mod app;
mod config;
mod dates;
mod error;
mod fetcher;
mod format;
mod hymns;
mod listing;
mod logger;
mod models;
mod normalize;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "daily-saint")]
#[command(about = "Fetch the top saint of the day from oca.org")]
struct Cli {
    /// Date to fetch (YYYY-MM-DD, MM/DD/YYYY or MM/DD/YY). Defaults to today.
    date: Option<String>,

    /// Save output to this file instead of printing to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pick a random non-top saint for the day. Falls back to the top saint if only one is listed.
    #[arg(long)]
    random: bool,

    /// Read configuration from this file instead of the XDG config dir
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a template config file and exit
    #[arg(long)]
    init_config: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log every request
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        LevelFilter::Warn
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    app::run(app::Options {
        date: cli.date,
        output: cli.output,
        random: cli.random,
        config: cli.config,
        init_config: cli.init_config,
        log_level,
    })
    .await
}
