//! SVG document model.
//!
//! A minimal ordered element tree for vector documents, parsed from and
//! serialized to SVG text with quick-xml events. Unlike usvg-style
//! normalization, the tree keeps primitives (`circle`, `rect`, ...) and their
//! attributes exactly as written, which the sketch transform dispatches on.
//!
//! # Modules
//!
//! - [`element`]: `Document` / `Element` / `Node` tree types
//! - [`parse`]: SVG text -> `Document` (quick-xml reader)
//! - [`write`]: `Document` -> SVG text (quick-xml writer)
//! - [`primitive`]: the closed set of primitive kinds
//! - [`attrs`]: geometry vs pass-through attribute classification

mod attrs;
mod element;
mod parse;
mod primitive;
mod write;

pub use attrs::is_geometry_attr;
pub use element::{Document, Element, Node};
pub use parse::{ParseError, parse_document};
pub use primitive::PrimitiveKind;
