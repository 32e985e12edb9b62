//! The per-primitive renderer seam.

use anyhow::Result;

use super::{Shape, SketchSettings};
use crate::config::RoughOptions;
use crate::vector::Element;

/// Renders a single shape into its sketched replacement element.
///
/// Synchronous from the engine's point of view. The returned element fully
/// defines the replacement's geometry and paint; the engine merges the
/// original's pass-through attributes on top.
pub trait SketchRenderer: Send + Sync {
    fn render(
        &self,
        shape: &Shape,
        settings: &SketchSettings,
        options: &RoughOptions,
    ) -> Result<Element>;
}
