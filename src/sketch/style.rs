//! Presentation settings extraction.

use super::extract::leading_float;
use crate::vector::Element;

/// Normalized presentation settings handed to the renderer.
///
/// Derived from a primitive's attributes, never stored independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SketchSettings {
    pub stroke: Option<String>,
    pub fill: Option<String>,
    /// Absent when the attribute is missing or percentage-valued:
    /// a percentage is relative to an ambient dimension the renderer
    /// does not know about, so it is dropped rather than mis-parsed.
    pub stroke_width: Option<f64>,
}

/// Extract stroke color, fill color and stroke width from a primitive.
pub fn extract_settings(el: &Element) -> SketchSettings {
    let stroke_width = el
        .attr("stroke-width")
        .filter(|v| !v.contains('%'))
        .map(leading_float);

    SketchSettings {
        stroke: el.attr("stroke").map(str::to_owned),
        fill: el.attr("fill").map(str::to_owned),
        stroke_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_with(attrs: &[(&str, &str)]) -> Element {
        let mut el = Element::new("rect");
        for (name, value) in attrs {
            el.set_attr(*name, *value);
        }
        el
    }

    #[test]
    fn copies_colors_verbatim() {
        let settings = extract_settings(&rect_with(&[("stroke", "#f00"), ("fill", "none")]));
        assert_eq!(settings.stroke.as_deref(), Some("#f00"));
        assert_eq!(settings.fill.as_deref(), Some("none"));
    }

    #[test]
    fn numeric_stroke_width() {
        let settings = extract_settings(&rect_with(&[("stroke-width", "3")]));
        assert_eq!(settings.stroke_width, Some(3.0));
    }

    #[test]
    fn unit_suffix_stroke_width_parses() {
        let settings = extract_settings(&rect_with(&[("stroke-width", "3px")]));
        assert_eq!(settings.stroke_width, Some(3.0));
    }

    #[test]
    fn percentage_stroke_width_dropped() {
        let settings = extract_settings(&rect_with(&[("stroke-width", "50%")]));
        assert_eq!(settings.stroke_width, None);
    }

    #[test]
    fn absent_attributes_stay_absent() {
        let settings = extract_settings(&rect_with(&[]));
        assert_eq!(settings, SketchSettings::default());
    }
}
