//! Sketch transform engine.
//!
//! Rewrites each supported primitive of a vector document into a rough,
//! hand-sketched equivalent produced by a [`SketchRenderer`], preserving
//! document order and pass-through attributes.
//!
//! ```text
//! Document ──► extract shape ──► extract style ──► renderer ──► replacement
//!                  │                                                │
//!                  └── unsupported kind: node left untouched ◄──────┘
//! ```
//!
//! # Modules
//!
//! - [`extract`]: per-kind geometry extraction into [`Shape`] variants
//! - [`style`]: stroke/fill/stroke-width extraction
//! - [`renderer`]: the external renderer seam
//! - [`rough`]: builtin jittered-stroke renderer

pub mod extract;
pub mod renderer;
pub mod rough;
pub mod style;

#[cfg(test)]
mod tests;

pub use extract::{Shape, extract_shape};
pub use renderer::SketchRenderer;
pub use rough::RoughSketch;
pub use style::{SketchSettings, extract_settings};

use thiserror::Error;

use crate::config::RoughOptions;
use crate::vector::{Document, Element, Node, PrimitiveKind, is_geometry_attr};

/// Errors from the sketch transform.
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("sketch renderer failed for <{kind}>: {source}")]
    Renderer {
        kind: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

/// Replace every supported primitive in `doc` with the renderer's sketched
/// equivalent, in place and in document order. Returns the replacement count.
///
/// A renderer failure aborts the transform and propagates; partially
/// transformed output is never reported as success.
pub fn sketch_document(
    doc: &mut Document,
    renderer: &dyn SketchRenderer,
    options: &RoughOptions,
) -> Result<usize, SketchError> {
    let mut replaced = 0;
    sketch_children(&mut doc.root, renderer, options, &mut replaced)?;
    Ok(replaced)
}

fn sketch_children(
    el: &mut Element,
    renderer: &dyn SketchRenderer,
    options: &RoughOptions,
    replaced: &mut usize,
) -> Result<(), SketchError> {
    for node in &mut el.children {
        let Node::Element(child) = node else { continue };

        match PrimitiveKind::from_name(child.name()) {
            Some(kind) => {
                let shape = extract_shape(kind, child);
                let settings = extract_settings(child);
                let mut replacement = renderer
                    .render(&shape, &settings, options)
                    .map_err(|source| SketchError::Renderer {
                        kind: kind.name(),
                        source,
                    })?;

                // Geometry and paint come only from the renderer's output;
                // everything else is carried over from the original.
                for (name, value) in child.attrs() {
                    if !is_geometry_attr(name) {
                        replacement.set_attr(name, value);
                    }
                }

                *node = Node::Element(replacement);
                *replaced += 1;
            }
            // Not a primitive: descend, groups may hold primitives.
            None => sketch_children(child, renderer, options, replaced)?,
        }
    }
    Ok(())
}
