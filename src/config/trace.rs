//! `[trace]` section: tracer parameters.
//!
//! Every field is optional. An unset field is omitted from the tracer
//! invocation entirely, letting the tracer apply its own default (turn
//! policy: minority, speckle size: 2, curve optimization: on, corner
//! threshold: 1, tolerance: 0.2). A new trace is issued whenever any field
//! changes.

use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

/// How the tracer resolves ambiguities in path decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TurnPolicy {
    Black,
    White,
    Left,
    Right,
    Minority,
    Majority,
}

impl TurnPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
            Self::Left => "left",
            Self::Right => "right",
            Self::Minority => "minority",
            Self::Majority => "majority",
        }
    }
}

/// Tracer parameter set, immutable per tracing request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Args)]
#[serde(default, deny_unknown_fields)]
pub struct TraceParameters {
    /// Ambiguity resolution in path decomposition
    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn_policy: Option<TurnPolicy>,

    /// Suppress speckles of up to this size
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speckle_size: Option<u32>,

    /// Turn curve optimization on or off
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimize_curve: Option<bool>,

    /// Corner threshold parameter
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_threshold: Option<f64>,

    /// Curve optimization tolerance
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
}

impl TraceParameters {
    /// Merge CLI values over file values, field by field.
    pub fn merged_over(&self, base: &Self) -> Self {
        Self {
            turn_policy: self.turn_policy.or(base.turn_policy),
            speckle_size: self.speckle_size.or(base.speckle_size),
            optimize_curve: self.optimize_curve.or(base.optimize_curve),
            corner_threshold: self.corner_threshold.or(base.corner_threshold),
            tolerance: self.tolerance.or(base.tolerance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_overrides() {
        let file = TraceParameters {
            turn_policy: Some(TurnPolicy::Black),
            speckle_size: Some(2),
            ..Default::default()
        };
        let cli = TraceParameters {
            turn_policy: Some(TurnPolicy::Left),
            tolerance: Some(0.5),
            ..Default::default()
        };

        let merged = cli.merged_over(&file);
        assert_eq!(merged.turn_policy, Some(TurnPolicy::Left));
        assert_eq!(merged.speckle_size, Some(2));
        assert_eq!(merged.tolerance, Some(0.5));
        assert_eq!(merged.optimize_curve, None);
    }

    #[test]
    fn unset_fields_are_omitted_from_toml() {
        let params = TraceParameters {
            speckle_size: Some(4),
            ..Default::default()
        };
        assert_eq!(toml::to_string(&params).unwrap().trim(), "speckle_size = 4");
    }
}
