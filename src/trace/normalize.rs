//! Geometric normalization of traced documents.
//!
//! Tracers emit documents in their native output scale. Before display the
//! declared size becomes the viewBox and the document is rescaled to the
//! caller's target width, preserving aspect ratio. This pins a stable
//! coordinate frame regardless of the tracer's scale.

use anyhow::{Context, Result};

use crate::sketch::extract::leading_float;
use crate::vector::Document;

/// Set `viewBox="0 0 w h"` from the declared size, then rescale the
/// declared width/height to `target_width` x `target_width * h / w`.
pub fn normalize(doc: &mut Document, target_width: f64) -> Result<()> {
    let width = dimension(doc, "width").context("traced document has no usable width")?;
    let height = dimension(doc, "height").context("traced document has no usable height")?;

    doc.root
        .set_attr("viewBox", format!("0 0 {} {}", fmt(width), fmt(height)));
    doc.root.set_attr("width", fmt(target_width));
    doc.root
        .set_attr("height", fmt(target_width * height / width));
    Ok(())
}

/// Recolor a normalized document: the root carries the display color and
/// the top-level children inherit it through `currentColor`.
pub fn apply_color(doc: &mut Document, color: &str) {
    doc.root.set_attr("style", format!("color:{color}"));
    for node in &mut doc.root.children {
        if let crate::vector::Node::Element(child) = node {
            child.set_attr("fill", "currentColor");
        }
    }
}

fn dimension(doc: &Document, name: &str) -> Option<f64> {
    let value = leading_float(doc.root.attr(name)?);
    (value.is_finite() && value > 0.0).then_some(value)
}

fn fmt(v: f64) -> String {
    let s = format!("{v:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_owned()
}
