//! `coarse trace` - raster image to (optionally sketched) SVG.

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result, bail};

use super::TraceArgs;
use crate::config::CoarseConfig;
use crate::log;
use crate::sketch::RoughSketch;
use crate::trace::coordinator::TracePhase;
use crate::trace::watch::watch_image;
use crate::trace::{FileSurface, PotraceCommand, TraceCoordinator};

pub fn run(args: &TraceArgs, config: &CoarseConfig) -> Result<()> {
    let params = args.trace.merged_over(&config.trace);
    let rough_enabled = args.rough || config.rough.is_some();
    let rough = args
        .rough_options
        .merged_over(&config.rough.clone().unwrap_or_default());
    let width = args.width.unwrap_or(config.display.width);
    let color = args
        .display_color
        .clone()
        .or_else(|| config.display.color.clone());

    let image = Arc::new(
        fs::read(&args.input)
            .with_context(|| format!("failed to read {}", args.input.display()))?,
    );
    let tracer = Arc::new(PotraceCommand::locate()?);
    let surface = FileSurface::new(args.output.clone());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let (coordinator, mut handle) = TraceCoordinator::new(tracer, surface, width);
        let coordinator = if rough_enabled {
            coordinator.with_renderer(Arc::new(RoughSketch::from_options(&rough)), rough.clone())
        } else {
            coordinator
        };
        let coordinator = match color {
            Some(color) => coordinator.with_color(color),
            None => coordinator,
        };
        let task = tokio::spawn(coordinator.run());

        handle.retrace(image, params.clone()).await?;
        let status = handle.wait_settled().await;
        match status.phase {
            TracePhase::Displayed => {
                log!("trace"; "{} -> {}", args.input.display(), args.output.display());
            }
            _ => {
                let detail = status.error.unwrap_or_else(|| "trace did not finish".into());
                bail!("{detail}");
            }
        }

        if args.watch {
            watch_image(&args.input, params, &mut handle).await?;
        }

        handle.dispose().await;
        task.await.ok();
        Ok(())
    })
}
