use anyhow::{Result, bail};
use parking_lot::Mutex;

use super::{Shape, SketchRenderer, SketchSettings, sketch_document};
use crate::config::RoughOptions;
use crate::vector::{Element, parse_document};

/// Records every render call and returns a marker element.
#[derive(Default)]
struct StubRenderer {
    calls: Mutex<Vec<(Shape, SketchSettings)>>,
    fail: bool,
}

fn shape_label(shape: &Shape) -> &'static str {
    match shape {
        Shape::Circle { .. } => "circle",
        Shape::Rectangle { .. } => "rectangle",
        Shape::Ellipse { .. } => "ellipse",
        Shape::Line { .. } => "line",
        Shape::Polygon(_) => "polygon",
        Shape::LinearPath(_) => "linear-path",
        Shape::Path(_) => "path",
    }
}

impl SketchRenderer for StubRenderer {
    fn render(
        &self,
        shape: &Shape,
        settings: &SketchSettings,
        _options: &RoughOptions,
    ) -> Result<Element> {
        if self.fail {
            bail!("renderer exploded");
        }
        self.calls.lock().push((shape.clone(), settings.clone()));
        let mut el = Element::new("g");
        el.set_attr("data-sketch", shape_label(shape));
        Ok(el)
    }
}

fn transform(svg: &str) -> (crate::vector::Document, StubRenderer, usize) {
    let mut doc = parse_document(svg).unwrap();
    let renderer = StubRenderer::default();
    let replaced = sketch_document(&mut doc, &renderer, &RoughOptions::default()).unwrap();
    (doc, renderer, replaced)
}

#[test]
fn one_replacement_per_primitive_in_document_order() {
    let (doc, renderer, replaced) = transform(
        r#"<svg><circle cx="1" cy="1" r="1"/><g><rect x="0" y="0" width="1" height="1"/></g><line x1="0" y1="0" x2="1" y2="1"/></svg>"#,
    );

    assert_eq!(replaced, 3);
    let labels: Vec<_> = renderer
        .calls
        .lock()
        .iter()
        .map(|(shape, _)| shape_label(shape))
        .collect();
    assert_eq!(labels, vec!["circle", "rectangle", "line"]);

    // Replacements sit at the original positions.
    let top: Vec<_> = doc.root.child_elements().map(Element::name).collect();
    assert_eq!(top, vec!["g", "g", "g"]);
    let first = doc.root.child_elements().next().unwrap();
    assert_eq!(first.attr("data-sketch"), Some("circle"));
    let nested_group = doc.root.child_elements().nth(1).unwrap();
    let nested = nested_group.child_elements().next().unwrap();
    assert_eq!(nested.attr("data-sketch"), Some("rectangle"));
}

#[test]
fn passthrough_attributes_are_copied() {
    let (doc, _, _) = transform(
        r#"<svg><circle cx="1" cy="1" r="1" id="dot" class="big" data-label="x" opacity="0.5"/></svg>"#,
    );

    let replacement = doc.root.child_elements().next().unwrap();
    assert_eq!(replacement.attr("id"), Some("dot"));
    assert_eq!(replacement.attr("class"), Some("big"));
    assert_eq!(replacement.attr("data-label"), Some("x"));
    assert_eq!(replacement.attr("opacity"), Some("0.5"));
}

#[test]
fn geometry_attributes_are_never_copied() {
    let (doc, _, _) = transform(
        r##"<svg><circle cx="1" cy="1" r="1" stroke="#f00" fill="#0f0" stroke-width="2"/></svg>"##,
    );

    let replacement = doc.root.child_elements().next().unwrap();
    for name in ["cx", "cy", "r", "stroke", "fill", "stroke-width"] {
        assert_eq!(replacement.attr(name), None, "{name} must not be copied");
    }
    // The marker written by the renderer survives the merge.
    assert_eq!(replacement.attr("data-sketch"), Some("circle"));
}

#[test]
fn unsupported_kinds_are_skipped() {
    let (doc, _, replaced) =
        transform(r#"<svg><text x="0" y="0">hi</text><circle cx="1" cy="1" r="1"/></svg>"#);

    assert_eq!(replaced, 1);
    let first = doc.root.child_elements().next().unwrap();
    assert_eq!(first.name(), "text");
    assert_eq!(first.attr("x"), Some("0"));
}

#[test]
fn settings_reach_the_renderer() {
    let (_, renderer, _) = transform(
        r#"<svg><rect x="0" y="0" width="1" height="1" stroke="blue" stroke-width="50%"/></svg>"#,
    );

    let calls = renderer.calls.lock();
    let (_, settings) = &calls[0];
    assert_eq!(settings.stroke.as_deref(), Some("blue"));
    assert_eq!(settings.stroke_width, None);
}

#[test]
fn renderer_failure_propagates() {
    let mut doc = parse_document(r#"<svg><circle cx="1" cy="1" r="1"/></svg>"#).unwrap();
    let renderer = StubRenderer {
        fail: true,
        ..Default::default()
    };

    let err = sketch_document(&mut doc, &renderer, &RoughOptions::default()).unwrap_err();
    assert!(err.to_string().contains("circle"));
}

#[test]
fn polyline_extracts_as_linear_path() {
    let (_, renderer, _) = transform(r#"<svg><polyline points="10,20  30,40 "/></svg>"#);

    let calls = renderer.calls.lock();
    assert_eq!(
        calls[0].0,
        Shape::LinearPath(vec![[10.0, 20.0], [30.0, 40.0]])
    );
}
