//! Geometry vs pass-through attribute classification.
//!
//! When a primitive is replaced by its sketched equivalent, every attribute
//! not in this table is copied verbatim onto the replacement. Geometry and
//! paint attributes are never copied: the replacement's size, position and
//! styling come only from the renderer's output, so copying them would apply
//! the original geometry twice.

/// Attributes that must not be transferred to a replacement shape.
const GEOMETRY_ATTRS: &[&str] = &[
    "cx",
    "cy",
    "d",
    "fill",
    "height",
    "points",
    "r",
    "rx",
    "ry",
    "stroke-width",
    "stroke",
    "width",
    "x",
    "x1",
    "x2",
    "y",
    "y1",
    "y2",
];

/// Check whether an attribute is geometry-defining (not copied to replacements).
pub fn is_geometry_attr(name: &str) -> bool {
    GEOMETRY_ATTRS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_attrs_denied() {
        for name in GEOMETRY_ATTRS {
            assert!(is_geometry_attr(name), "{name} should be geometry");
        }
    }

    #[test]
    fn passthrough_attrs_allowed() {
        for name in ["id", "class", "transform", "data-label", "opacity"] {
            assert!(!is_geometry_attr(name), "{name} should pass through");
        }
    }
}
