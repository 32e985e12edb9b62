//! Trace pipeline: raster image -> vector document -> display surface.
//!
//! The coordinator is an actor owning one display instance. On every
//! parameter change it clears the mount, invokes the tracer on a blocking
//! task and tags the request with a generation number; completions carrying
//! a stale generation are discarded (last-request-wins, not
//! last-completion-wins). Fresh results flow through the optional sketch
//! transform, geometric normalization and onto the display surface.
//!
//! ```text
//! Retrace ──► [tracer, spawn_blocking] ──► TraceDone{generation}
//!                                              │ stale? discard
//!                                              ▼
//!                         sketch transform ─► normalize ─► mount
//! ```
//!
//! # Modules
//!
//! - [`coordinator`]: the actor, its messages and lifecycle states
//! - [`tracer`]: the external tracer seam
//! - [`potrace`]: tracer backed by the `potrace` executable
//! - [`normalize`]: viewBox + aspect-preserving rescale
//! - [`display`]: display surface seam and file-backed implementation
//! - [`watch`]: retrace when the source image changes on disk

pub mod coordinator;
pub mod display;
pub mod normalize;
pub mod potrace;
pub mod tracer;
pub mod watch;


pub use coordinator::{CoordinatorHandle, TraceCoordinator, TracePhase, TraceStatus};
pub use display::{DisplaySurface, FileSurface};
pub use normalize::{apply_color, normalize};
pub use potrace::PotraceCommand;
pub use tracer::Tracer;
