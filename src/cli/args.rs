//! Command-line interface definitions.

use clap::{Args, ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{RoughOptions, TraceParameters};

/// Coarse image tracer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: coarse.toml when present)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rewrite the primitives of an SVG file into hand-sketched strokes
    #[command(visible_alias = "s")]
    Sketch {
        #[command(flatten)]
        args: SketchArgs,
    },

    /// Trace a raster image into a (optionally sketched) SVG drawing
    #[command(visible_alias = "t")]
    Trace {
        #[command(flatten)]
        args: TraceArgs,
    },
}

/// Arguments for `coarse sketch`
#[derive(Args, Debug, Clone)]
pub struct SketchArgs {
    /// Input SVG file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub rough: RoughOptions,
}

/// Arguments for `coarse trace`
#[derive(Args, Debug, Clone)]
pub struct TraceArgs {
    /// Input raster image (png, jpeg, webp)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output SVG file
    #[arg(short, long, default_value = "traced.svg", value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Target display width; height follows the traced aspect ratio
    #[arg(short, long)]
    pub width: Option<f64>,

    /// Display color applied through currentColor
    #[arg(long)]
    pub display_color: Option<String>,

    /// Run the sketch transform on the traced output
    #[arg(short, long)]
    pub rough: bool,

    /// Keep watching the input image and retrace on change
    #[arg(long)]
    pub watch: bool,

    #[command(flatten)]
    pub trace: TraceParameters,

    #[command(flatten)]
    pub rough_options: RoughOptions,
}
