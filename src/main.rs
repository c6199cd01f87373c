use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod exports;
mod geos;
mod run;
mod scraper;

#[cfg(test)]
mod tests;

use crate::config::load_config;
use crate::scraper::{HttpFetcher, ZillowScraper};

const DEFAULT_CONFIG_PATH: &str = "data/input.sample.json";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Zillow search scraper - fetches listing pages and exports the records"
)]
struct Args {
    /// Path to the configuration JSON (default: data/input.sample.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the output format (json, csv, xml, rss, html, xlsx)
    #[arg(short, long)]
    format: Option<String>,

    /// Override the output file path
    #[arg(short, long)]
    output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let base_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            error!("cannot determine working directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config_path = args
        .config
        .unwrap_or_else(|| base_dir.join(DEFAULT_CONFIG_PATH));

    let mut config = match load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!(
                "failed to load configuration from {}: {e}",
                config_path.display()
            );
            return ExitCode::FAILURE;
        }
    };

    if let Some(format) = args.format {
        config.output.format = format;
    }
    if let Some(output) = args.output {
        config.output.path = output;
    }

    let fetcher = match HttpFetcher::new() {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!("failed to initialize HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };
    let scraper = ZillowScraper::new(fetcher);

    match run::run(&scraper, &config, &base_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("unexpected error during execution: {e}");
            ExitCode::FAILURE
        }
    }
}
