//! Tracer backed by the `potrace` executable.
//!
//! The raster input is decoded with the `image` crate, flattened to 8-bit
//! grayscale and piped to potrace as binary PGM on stdin; the SVG result is
//! read from stdout. Unset parameters are omitted from the command line so
//! potrace applies its own defaults.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder};

use super::Tracer;
use crate::config::TraceParameters;

/// External `potrace` invocation.
pub struct PotraceCommand {
    program: PathBuf,
}

impl PotraceCommand {
    /// Locate `potrace` on PATH.
    pub fn locate() -> Result<Self> {
        let program = which::which("potrace")
            .context("potrace executable not found on PATH (install potrace to trace images)")?;
        Ok(Self { program })
    }

    /// Build the argument list, omitting unset parameters entirely.
    fn args(params: &TraceParameters) -> Vec<String> {
        let mut args = vec!["--svg".to_owned(), "-o".to_owned(), "-".to_owned()];

        if let Some(policy) = params.turn_policy {
            args.push("-z".to_owned());
            args.push(policy.as_str().to_owned());
        }
        if let Some(size) = params.speckle_size {
            args.push("-t".to_owned());
            args.push(size.to_string());
        }
        // Curve optimization is on by default; only an explicit `false`
        // turns it off.
        if params.optimize_curve == Some(false) {
            args.push("-n".to_owned());
        }
        if let Some(threshold) = params.corner_threshold {
            args.push("-a".to_owned());
            args.push(threshold.to_string());
        }
        if let Some(tolerance) = params.tolerance {
            args.push("-O".to_owned());
            args.push(tolerance.to_string());
        }

        // Read the bitmap from stdin.
        args.push("-".to_owned());
        args
    }
}

impl Tracer for PotraceCommand {
    fn trace(&self, image: &[u8], params: &TraceParameters) -> Result<String> {
        let bitmap = to_pgm(image)?;

        let mut child = Command::new(&self.program)
            .args(Self::args(params))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn {}", self.program.display()))?;

        // Scope the stdin handle so it closes once the bitmap is written.
        {
            let mut stdin = child.stdin.take().context("potrace stdin unavailable")?;
            stdin.write_all(&bitmap).context("failed to pipe bitmap")?;
        }

        let output = child.wait_with_output().context("potrace did not exit")?;
        if !output.status.success() {
            bail!(
                "potrace failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8(output.stdout).context("potrace produced non-utf8 output")?)
    }
}

/// Decode any supported raster format and re-encode as binary PGM.
fn to_pgm(raw: &[u8]) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory(raw).context("failed to decode raster image")?;
    let luma = decoded.to_luma8();

    let mut out = Vec::new();
    PnmEncoder::new(&mut out)
        .with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary))
        .write_image(
            luma.as_raw(),
            luma.width(),
            luma.height(),
            ExtendedColorType::L8,
        )
        .context("failed to encode grayscale bitmap")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TurnPolicy;

    #[test]
    fn unset_parameters_are_omitted() {
        let args = PotraceCommand::args(&TraceParameters::default());
        assert_eq!(args, vec!["--svg", "-o", "-", "-"]);
    }

    #[test]
    fn set_parameters_become_flags() {
        let params = TraceParameters {
            turn_policy: Some(TurnPolicy::Majority),
            speckle_size: Some(4),
            optimize_curve: Some(false),
            corner_threshold: Some(0.8),
            tolerance: Some(0.5),
        };
        let args = PotraceCommand::args(&params);
        assert_eq!(
            args,
            vec![
                "--svg", "-o", "-", "-z", "majority", "-t", "4", "-n", "-a", "0.8", "-O", "0.5",
                "-"
            ]
        );
    }

    #[test]
    fn explicit_curve_optimization_on_adds_nothing() {
        let params = TraceParameters {
            optimize_curve: Some(true),
            ..Default::default()
        };
        assert_eq!(PotraceCommand::args(&params), vec!["--svg", "-o", "-", "-"]);
    }
}
