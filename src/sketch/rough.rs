//! Builtin jittered-stroke renderer.
//!
//! Produces a `<g>` of `<path>` children per shape: an optional plain fill
//! path underneath, and a double-pass wobbled stroke path on top. Straight
//! segments become perturbed cubics, round shapes a smoothed chain through
//! radially jittered samples. Raw path data is forwarded untouched.
//!
//! NaN coordinates are not filtered here: they format as literal `NaN` path
//! tokens, keeping malformed input visibly broken.

use anyhow::Result;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Shape, SketchRenderer, SketchSettings};
use crate::config::RoughOptions;
use crate::vector::{Element, Node};

/// Samples per ellipse revolution.
const ELLIPSE_STEPS: usize = 16;
/// Wobble passes per stroke; two passes give the pencil-retrace look.
const STROKE_PASSES: usize = 2;

/// The builtin sketch renderer.
pub struct RoughSketch {
    rng: Mutex<StdRng>,
}

impl RoughSketch {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn from_options(options: &RoughOptions) -> Self {
        Self::new(options.seed)
    }
}

impl SketchRenderer for RoughSketch {
    fn render(
        &self,
        shape: &Shape,
        settings: &SketchSettings,
        options: &RoughOptions,
    ) -> Result<Element> {
        let mut rng = self.rng.lock();
        let roughness = options.roughness();
        let bowing = options.bowing();

        let (stroke_d, fill_d) = match shape {
            Shape::Circle { cx, cy, diameter } => {
                let rx = diameter / 2.0;
                (
                    wobble_ellipse(&mut rng, *cx, *cy, rx, rx, roughness),
                    Some(ellipse_outline(*cx, *cy, rx, rx)),
                )
            }
            Shape::Ellipse {
                cx,
                cy,
                width,
                height,
            } => {
                let (rx, ry) = (width / 2.0, height / 2.0);
                (
                    wobble_ellipse(&mut rng, *cx, *cy, rx, ry, roughness),
                    Some(ellipse_outline(*cx, *cy, rx, ry)),
                )
            }
            Shape::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                let corners = [
                    [*x, *y],
                    [x + width, *y],
                    [x + width, y + height],
                    [*x, y + height],
                ];
                (
                    wobble_loop(&mut rng, &corners, roughness, bowing),
                    Some(polygon_outline(&corners)),
                )
            }
            Shape::Line { x1, y1, x2, y2 } => {
                let mut d = String::new();
                wobble_line(&mut rng, [*x1, *y1], [*x2, *y2], roughness, bowing, &mut d);
                (d, None)
            }
            Shape::Polygon(points) => (
                wobble_loop(&mut rng, points, roughness, bowing),
                Some(polygon_outline(points)),
            ),
            Shape::LinearPath(points) => (wobble_chain(&mut rng, points, roughness, bowing), None),
            Shape::Path(d) => (d.clone(), None),
        };

        Ok(assemble(stroke_d, fill_d, settings))
    }
}

/// Build the replacement `<g>` from stroke/fill path data and settings.
fn assemble(stroke_d: String, fill_d: Option<String>, settings: &SketchSettings) -> Element {
    let mut g = Element::new("g");

    let fill = settings.fill.as_deref().filter(|f| *f != "none");
    if let (Some(fill), Some(d)) = (fill, fill_d) {
        let mut fill_path = Element::new("path");
        fill_path.set_attr("d", d);
        fill_path.set_attr("fill", fill);
        fill_path.set_attr("stroke", "none");
        g.push(Node::Element(fill_path));
    }

    let mut stroke_path = Element::new("path");
    stroke_path.set_attr("d", stroke_d);
    stroke_path.set_attr("fill", "none");
    // Without an explicit stroke the replacement inherits the ambient
    // color, so a display color set on the root still takes effect.
    stroke_path.set_attr(
        "stroke",
        settings.stroke.as_deref().unwrap_or("currentColor"),
    );
    stroke_path.set_attr("stroke-width", fmt(settings.stroke_width.unwrap_or(1.0)));
    g.push(Node::Element(stroke_path));

    g
}

/// Random offset in `[-r, r]`; zero roughness gives clean strokes.
fn jitter(rng: &mut StdRng, r: f64) -> f64 {
    if r <= 0.0 || r.is_nan() {
        return 0.0;
    }
    rng.gen_range(-r..r)
}

/// Append a double-pass wobbled cubic for the segment `a -> b`.
fn wobble_line(rng: &mut StdRng, a: [f64; 2], b: [f64; 2], roughness: f64, bowing: f64, d: &mut String) {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let len = (dx * dx + dy * dy).sqrt();
    // Perpendicular unit vector for bowing displacement.
    let (px, py) = if len > 0.0 {
        (-dy / len, dx / len)
    } else {
        (0.0, 0.0)
    };
    // Scale the wobble with segment length so short edges stay tight.
    let amp = roughness * (len / 100.0).clamp(0.4, 2.0);

    for _ in 0..STROKE_PASSES {
        let bow = bowing * jitter(rng, len / 32.0 + 0.1);
        let (c1x, c1y) = (
            a[0] + dx * 0.35 + px * bow + jitter(rng, amp),
            a[1] + dy * 0.35 + py * bow + jitter(rng, amp),
        );
        let (c2x, c2y) = (
            a[0] + dx * 0.65 + px * bow + jitter(rng, amp),
            a[1] + dy * 0.65 + py * bow + jitter(rng, amp),
        );
        d.push_str(&format!(
            "M{} {}C{} {}, {} {}, {} {}",
            fmt(a[0] + jitter(rng, amp)),
            fmt(a[1] + jitter(rng, amp)),
            fmt(c1x),
            fmt(c1y),
            fmt(c2x),
            fmt(c2y),
            fmt(b[0] + jitter(rng, amp)),
            fmt(b[1] + jitter(rng, amp)),
        ));
    }
}

/// Wobbled open chain through consecutive points.
fn wobble_chain(rng: &mut StdRng, points: &[[f64; 2]], roughness: f64, bowing: f64) -> String {
    let mut d = String::new();
    for pair in points.windows(2) {
        wobble_line(rng, pair[0], pair[1], roughness, bowing, &mut d);
    }
    d
}

/// Wobbled closed loop: every edge plus the closing one.
fn wobble_loop(rng: &mut StdRng, points: &[[f64; 2]], roughness: f64, bowing: f64) -> String {
    let mut d = wobble_chain(rng, points, roughness, bowing);
    if points.len() > 2 {
        wobble_line(
            rng,
            points[points.len() - 1],
            points[0],
            roughness,
            bowing,
            &mut d,
        );
    }
    d
}

/// Smoothed closed chain through radially jittered ellipse samples.
fn wobble_ellipse(rng: &mut StdRng, cx: f64, cy: f64, rx: f64, ry: f64, roughness: f64) -> String {
    let amp = roughness * ((rx + ry) / 40.0).clamp(0.3, 2.0);
    let mut d = String::new();

    for _ in 0..STROKE_PASSES {
        let points: Vec<[f64; 2]> = (0..ELLIPSE_STEPS)
            .map(|i| {
                let theta = (i as f64) / (ELLIPSE_STEPS as f64) * std::f64::consts::TAU;
                [
                    cx + (rx + jitter(rng, amp)) * theta.cos(),
                    cy + (ry + jitter(rng, amp)) * theta.sin(),
                ]
            })
            .collect();

        // Quadratic chain through midpoints, using samples as controls.
        let mid = |a: [f64; 2], b: [f64; 2]| [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0];
        let first_mid = mid(points[0], points[1]);
        d.push_str(&format!("M{} {}", fmt(first_mid[0]), fmt(first_mid[1])));
        for i in 1..=ELLIPSE_STEPS {
            let control = points[i % ELLIPSE_STEPS];
            let next = points[(i + 1) % ELLIPSE_STEPS];
            let m = mid(control, next);
            d.push_str(&format!(
                "Q{} {} {} {}",
                fmt(control[0]),
                fmt(control[1]),
                fmt(m[0]),
                fmt(m[1]),
            ));
        }
        d.push('Z');
    }
    d
}

/// Clean ellipse outline (two arcs) used for fills.
fn ellipse_outline(cx: f64, cy: f64, rx: f64, ry: f64) -> String {
    format!(
        "M{} {}A{} {} 0 1 0 {} {}A{} {} 0 1 0 {} {}Z",
        fmt(cx - rx),
        fmt(cy),
        fmt(rx),
        fmt(ry),
        fmt(cx + rx),
        fmt(cy),
        fmt(rx),
        fmt(ry),
        fmt(cx - rx),
        fmt(cy),
    )
}

/// Clean polygon outline used for fills.
fn polygon_outline(points: &[[f64; 2]]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{command}{} {}", fmt(p[0]), fmt(p[1])));
    }
    if !points.is_empty() {
        d.push('Z');
    }
    d
}

/// Compact coordinate formatting; NaN stays NaN by policy.
fn fmt(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_owned();
    }
    let s = format!("{v:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_owned()
}
