//! Per-kind geometry extraction.
//!
//! Each primitive kind has one handler mapping its attributes to a [`Shape`]
//! variant the renderer understands. Malformed or missing numeric text
//! extracts as NaN and is deliberately propagated: broken input surfaces as
//! visibly degenerate geometry instead of a silently wrong shape.

use crate::vector::{Element, PrimitiveKind};

/// Renderer-facing shape description.
///
/// Radii are already doubled: the renderer works in full-extent measures
/// (diameters), the source attributes in center-to-edge ones.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        cx: f64,
        cy: f64,
        diameter: f64,
    },
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        width: f64,
        height: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Polygon(Vec<[f64; 2]>),
    LinearPath(Vec<[f64; 2]>),
    /// Raw path data, forwarded to the renderer unmodified.
    Path(String),
}

/// Extract the renderer arguments for a primitive of the given kind.
pub fn extract_shape(kind: PrimitiveKind, el: &Element) -> Shape {
    match kind {
        PrimitiveKind::Circle => Shape::Circle {
            cx: num(el, "cx"),
            cy: num(el, "cy"),
            diameter: diam(el, "r"),
        },
        PrimitiveKind::Rect => Shape::Rectangle {
            x: num(el, "x"),
            y: num(el, "y"),
            width: num(el, "width"),
            height: num(el, "height"),
        },
        PrimitiveKind::Ellipse => Shape::Ellipse {
            cx: num(el, "cx"),
            cy: num(el, "cy"),
            width: diam(el, "rx"),
            height: diam(el, "ry"),
        },
        PrimitiveKind::Line => Shape::Line {
            x1: num(el, "x1"),
            y1: num(el, "y1"),
            x2: num(el, "x2"),
            y2: num(el, "y2"),
        },
        PrimitiveKind::Polygon => Shape::Polygon(coords(el, "points")),
        PrimitiveKind::Polyline => Shape::LinearPath(coords(el, "points")),
        PrimitiveKind::Path => Shape::Path(el.attr("d").unwrap_or_default().to_owned()),
    }
}

/// Numeric attribute; missing or malformed text extracts as NaN.
fn num(el: &Element, name: &str) -> f64 {
    el.attr(name).map_or(f64::NAN, leading_float)
}

/// Center-to-edge measure doubled to a full extent.
fn diam(el: &Element, name: &str) -> f64 {
    2.0 * num(el, name)
}

/// Whitespace-separated, comma-paired coordinate list. Empty tokens are
/// discarded; a missing pair half extracts as NaN.
fn coords(el: &Element, name: &str) -> Vec<[f64; 2]> {
    el.attr(name)
        .unwrap_or_default()
        .split_whitespace()
        .map(|pair| {
            let mut halves = pair.split(',');
            let mut next = || halves.next().map_or(f64::NAN, leading_float);
            [next(), next()]
        })
        .collect()
}

/// Parse the longest leading base-10 float, NaN when none.
///
/// Tolerates unit suffixes ("600pt" -> 600) the way tracer output and
/// hand-written documents carry them.
pub(crate) fn leading_float(v: &str) -> f64 {
    let v = v.trim();
    let end = v
        .find(|c: char| !c.is_ascii_digit() && !"+-.eE".contains(c))
        .unwrap_or(v.len());
    v[..end].parse().unwrap_or(f64::NAN)
}
