//! Coarse - trace raster images into hand-sketched SVG drawings.

#![allow(dead_code)]

mod cli;
mod config;
mod logger;
mod sketch;
mod trace;
mod vector;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::CoarseConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = CoarseConfig::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Sketch { args } => cli::sketch::run(args, &config),
        Commands::Trace { args } => cli::trace::run(args, &config),
    }
}
