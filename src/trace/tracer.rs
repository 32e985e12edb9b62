//! The external tracer seam.

use anyhow::Result;

use crate::config::TraceParameters;

/// Converts a raster image into a vector document of path outlines.
///
/// Implementations are blocking; the coordinator lifts calls onto a
/// blocking task and consumes completion as a message. A hung tracer leaves
/// its instance tracing indefinitely: retry and timeout policy belong to
/// the implementation, not the coordinator.
pub trait Tracer: Send + Sync {
    fn trace(&self, image: &[u8], params: &TraceParameters) -> Result<String>;
}
