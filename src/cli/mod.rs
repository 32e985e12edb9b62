//! Command-line interface.

mod args;
pub mod sketch;
pub mod trace;

pub use args::{Cli, Commands, SketchArgs, TraceArgs};
