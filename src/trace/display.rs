//! Display surface seam.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::debug;

/// Where a normalized document ends up being shown.
///
/// The coordinator keeps at most one live mount per instance and calls
/// `unmount` before every new `mount` and on every exit path, including
/// disposal mid-trace.
pub trait DisplaySurface: Send {
    fn mount(&mut self, svg: &str) -> Result<()>;
    fn unmount(&mut self);
}

/// File-backed surface: mounting writes the document to a path.
///
/// The written file is an artifact rather than a live resource, so
/// unmounting only forgets the mount; a later mount overwrites in place.
pub struct FileSurface {
    path: PathBuf,
    mounted: bool,
}

impl FileSurface {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            mounted: false,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl DisplaySurface for FileSurface {
    fn mount(&mut self, svg: &str) -> Result<()> {
        std::fs::write(&self.path, svg)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        self.mounted = true;
        debug!("trace"; "mounted {} ({} bytes)", self.path.display(), svg.len());
        Ok(())
    }

    fn unmount(&mut self) {
        self.mounted = false;
    }
}
