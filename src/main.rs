//! pagedir - directory-per-page normalization for bundled static sites.

mod bundle;
mod cli;
mod config;
mod logger;
mod normalize;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, build};
use config::PagedirConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = PagedirConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { skip_bundle, .. } => build::build(&config, *skip_bundle).map(|_| ()),
        Commands::Normalize { .. } => {
            build::normalize_output(&config.bundle.output, &config).map(|_| ())
        }
    }
}
