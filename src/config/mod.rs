//! Configuration for `coarse.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[trace]`   | Tracer parameters (turn policy, speckle size...) |
//! | `[rough]`   | Sketch renderer options; presence enables the    |
//! |             | sketch transform                                 |
//! | `[display]` | Target width and display color                   |
//!
//! CLI flags override file values field by field; a missing file yields the
//! defaults. Unset trace fields are omitted from the tracer call so the
//! tracer's own defaults apply.

mod rough;
mod trace;

pub use rough::RoughOptions;
pub use trace::{TraceParameters, TurnPolicy};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = "coarse.toml";

/// Root configuration structure representing coarse.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoarseConfig {
    pub trace: TraceParameters,
    /// Presence of `[rough]` enables the sketch transform.
    pub rough: Option<RoughOptions>,
    pub display: DisplayConfig,
}

/// `[display]` section: output sizing and coloring.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Target display width; height follows the traced aspect ratio.
    pub width: f64,
    /// Optional display color; traced paths are filled with `currentColor`.
    pub color: Option<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            color: None,
        }
    }
}

impl CoarseConfig {
    /// Load configuration from `path`, or from `coarse.toml` in the current
    /// directory when no path is given. A missing default file is fine; a
    /// missing explicit path is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Path::new(DEFAULT_CONFIG).to_path_buf(), false),
        };

        if !path.exists() {
            if required {
                bail!("config file not found: {}", path.display());
            }
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_missing_default_gives_defaults() {
        let config = CoarseConfig::load(None).unwrap();
        assert!(config.rough.is_none());
        assert_eq!(config.display.width, 300.0);
    }

    #[test]
    fn load_explicit_missing_fails() {
        assert!(CoarseConfig::load(Some(Path::new("/nonexistent/coarse.toml"))).is_err());
    }

    #[test]
    fn parse_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[trace]
turn_policy = "majority"
speckle_size = 4

[rough]
roughness = 1.5
seed = 7

[display]
width = 480
color = "lightgrey"
"#
        )
        .unwrap();

        let config = CoarseConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.trace.turn_policy, Some(TurnPolicy::Majority));
        assert_eq!(config.trace.speckle_size, Some(4));
        assert_eq!(config.trace.corner_threshold, None);
        let rough = config.rough.unwrap();
        assert_eq!(rough.roughness, Some(1.5));
        assert_eq!(rough.seed, Some(7));
        assert_eq!(config.display.width, 480.0);
        assert_eq!(config.display.color.as_deref(), Some("lightgrey"));
    }
}
