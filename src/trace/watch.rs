//! Retrace when the source image changes on disk.
//!
//! Watcher-first: notify events buffer in a sync channel and are bridged
//! onto the async loop by a dedicated thread. A small debouncer coalesces
//! editor write bursts into a single retrace; supersession in the
//! coordinator covers saves that land while a trace is still running.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use notify::{RecursiveMode, Watcher};

use super::coordinator::{CoordinatorHandle, TracePhase};
use crate::config::TraceParameters;
use crate::log;
use crate::logger::watch_status;

const DEBOUNCE_MS: u64 = 300;
/// Sleep horizon while no change is pending.
const IDLE_MS: u64 = 3_600_000;

/// Watch `path` and feed retraces into the coordinator until ctrl-c.
pub async fn watch_image(
    path: &Path,
    params: TraceParameters,
    handle: &mut CoordinatorHandle,
) -> Result<()> {
    let (notify_tx, notify_rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = notify_tx.send(res);
    })
    .context("failed to create file watcher")?;

    // Watch the parent directory: editors replace files on save, which
    // would detach a watch on the file itself.
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    watcher
        .watch(dir.unwrap_or(Path::new(".")), RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", path.display()))?;

    // Sync -> async bridge (notify does not support async callbacks).
    let (async_tx, mut async_rx) = tokio::sync::mpsc::channel::<notify::Event>(64);
    std::thread::spawn(move || {
        while let Ok(result) = notify_rx.recv() {
            match result {
                Ok(event) => {
                    if async_tx.blocking_send(event).is_err() {
                        break; // Receiver dropped
                    }
                }
                Err(e) => log!("watch"; "notify error: {}", e),
            }
        }
    });

    log!("watch"; "watching {} (ctrl-c to stop)", path.display());
    let mut debouncer = Debouncer::new();

    loop {
        tokio::select! {
            biased;
            _ = tokio::signal::ctrl_c() => break,
            maybe = async_rx.recv() => match maybe {
                Some(event) => debouncer.add_event(&event, path),
                None => break,
            },
            _ = tokio::time::sleep(debouncer.sleep_duration()) => {
                if debouncer.take_ready() {
                    retrace_now(path, &params, handle).await?;
                }
            }
        }
    }
    Ok(())
}

/// Re-read the image and push it through the coordinator, reporting the
/// settled outcome on the watch status line.
async fn retrace_now(
    path: &Path,
    params: &TraceParameters,
    handle: &mut CoordinatorHandle,
) -> Result<()> {
    let image = match std::fs::read(path) {
        Ok(bytes) => Arc::new(bytes),
        Err(e) => {
            watch_status().lock().error("read failed", &e.to_string());
            return Ok(());
        }
    };

    handle.retrace(image, params.clone()).await?;
    let status = handle.wait_settled().await;
    match status.phase {
        TracePhase::Displayed => {
            watch_status()
                .lock()
                .success(&format!("retraced {}", path.display()));
        }
        _ => {
            let detail = status.error.unwrap_or_default();
            watch_status().lock().error("trace failed", &detail);
        }
    }
    Ok(())
}

/// Pure debouncer: only timing and relevance filtering.
pub(super) struct Debouncer {
    pub(super) dirty: bool,
    pub(super) last_event: Option<Instant>,
}

impl Debouncer {
    pub(super) fn new() -> Self {
        Self {
            dirty: false,
            last_event: None,
        }
    }

    /// Record a notify event if it touches the watched file.
    pub(super) fn add_event(&mut self, event: &notify::Event, target: &Path) {
        use notify::EventKind;

        match event.kind {
            EventKind::Create(_) => {}
            EventKind::Modify(modify) => {
                // Metadata-only changes (mtime/chmod noise) would retrace
                // in a loop.
                if matches!(modify, notify::event::ModifyKind::Metadata(_)) {
                    return;
                }
            }
            _ => return,
        }

        let touches_target = event
            .paths
            .iter()
            .any(|p| p.file_name() == target.file_name());
        if touches_target {
            self.dirty = true;
            self.last_event = Some(Instant::now());
        }
    }

    /// How long the event loop may sleep before re-checking readiness.
    pub(super) fn sleep_duration(&self) -> Duration {
        match (self.dirty, self.last_event) {
            (true, Some(last)) => {
                let window = Duration::from_millis(DEBOUNCE_MS);
                window.saturating_sub(last.elapsed())
            }
            _ => Duration::from_millis(IDLE_MS),
        }
    }

    /// True once the debounce window elapsed; resets the pending change.
    pub(super) fn take_ready(&mut self) -> bool {
        let ready = self.dirty
            && self
                .last_event
                .is_some_and(|last| last.elapsed() >= Duration::from_millis(DEBOUNCE_MS));
        if ready {
            self.dirty = false;
            self.last_event = None;
        }
        ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn event(paths: Vec<&str>, kind: notify::EventKind) -> notify::Event {
        notify::Event {
            kind,
            paths: paths.into_iter().map(PathBuf::from).collect(),
            attrs: Default::default(),
        }
    }

    fn modify_kind() -> notify::EventKind {
        notify::EventKind::Modify(notify::event::ModifyKind::Data(
            notify::event::DataChange::Any,
        ))
    }

    #[test]
    fn empty_debouncer_is_idle() {
        let mut debouncer = Debouncer::new();
        assert!(!debouncer.take_ready());
        assert!(debouncer.sleep_duration() > Duration::from_secs(60));
    }

    #[test]
    fn relevant_change_arms_the_debouncer() {
        let mut debouncer = Debouncer::new();
        debouncer.add_event(
            &event(vec!["/tmp/lena.jpg"], modify_kind()),
            Path::new("/tmp/lena.jpg"),
        );
        assert!(debouncer.dirty);
        assert!(debouncer.sleep_duration() <= Duration::from_millis(DEBOUNCE_MS));
    }

    #[test]
    fn other_files_are_ignored() {
        let mut debouncer = Debouncer::new();
        debouncer.add_event(
            &event(vec!["/tmp/other.jpg"], modify_kind()),
            Path::new("/tmp/lena.jpg"),
        );
        assert!(!debouncer.dirty);
    }

    #[test]
    fn metadata_changes_are_ignored() {
        let mut debouncer = Debouncer::new();
        debouncer.add_event(
            &event(
                vec!["/tmp/lena.jpg"],
                notify::EventKind::Modify(notify::event::ModifyKind::Metadata(
                    notify::event::MetadataKind::Any,
                )),
            ),
            Path::new("/tmp/lena.jpg"),
        );
        assert!(!debouncer.dirty);
    }

    #[test]
    fn burst_coalesces_into_one_ready() {
        let mut debouncer = Debouncer::new();
        let target = Path::new("/tmp/lena.jpg");
        for _ in 0..5 {
            debouncer.add_event(&event(vec!["/tmp/lena.jpg"], modify_kind()), target);
        }
        // Window not elapsed yet.
        assert!(!debouncer.take_ready());

        // Simulate the window having passed.
        debouncer.last_event = Some(Instant::now() - Duration::from_millis(DEBOUNCE_MS + 50));
        assert!(debouncer.take_ready());
        assert!(!debouncer.take_ready());
    }
}
