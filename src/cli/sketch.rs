//! `coarse sketch` - roughen an existing SVG file.

use anyhow::{Context, Result};
use std::fs;

use super::SketchArgs;
use crate::config::CoarseConfig;
use crate::log;
use crate::sketch::{RoughSketch, sketch_document};
use crate::vector::parse_document;

pub fn run(args: &SketchArgs, config: &CoarseConfig) -> Result<()> {
    let svg = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let mut doc = parse_document(&svg)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;

    let rough = args
        .rough
        .merged_over(&config.rough.clone().unwrap_or_default());
    let renderer = RoughSketch::from_options(&rough);

    let replaced = sketch_document(&mut doc, &renderer, &rough)?;
    let rendered = doc.to_svg_string()?;

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log!("sketch"; "{}: sketched {} primitives -> {}", args.input.display(), replaced, path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
