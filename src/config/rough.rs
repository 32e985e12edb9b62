//! `[rough]` section: sketch renderer options.
//!
//! These are passed through to the renderer unchanged; the engine itself
//! only cares whether the section is present (transform) or absent (display
//! the normalized trace directly). Options a renderer does not understand
//! are ignored, not errors.

use clap::Args;
use serde::{Deserialize, Serialize};

/// Passthrough style/behavior options for the sketch renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Args)]
#[serde(default, deny_unknown_fields)]
pub struct RoughOptions {
    /// How rough the sketched strokes look (1.0 is a natural hand)
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roughness: Option<f64>,

    /// How much straight segments bow outward
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bowing: Option<f64>,

    /// Seed for reproducible sketch output
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl RoughOptions {
    /// Merge CLI values over file values, field by field.
    pub fn merged_over(&self, base: &Self) -> Self {
        Self {
            roughness: self.roughness.or(base.roughness),
            bowing: self.bowing.or(base.bowing),
            seed: self.seed.or(base.seed),
        }
    }

    pub fn roughness(&self) -> f64 {
        self.roughness.unwrap_or(1.0)
    }

    pub fn bowing(&self) -> f64 {
        self.bowing.unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_options_are_omitted_from_toml() {
        let options = RoughOptions {
            seed: Some(7),
            ..Default::default()
        };
        assert_eq!(toml::to_string(&options).unwrap().trim(), "seed = 7");
    }
}
