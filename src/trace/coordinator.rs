//! Trace Coordinator - the per-display-instance actor.
//!
//! One coordinator owns one display surface. Requests and completions both
//! arrive as messages, so overlapping asynchronous work is serialized
//! through a single state machine:
//!
//! ```text
//! Idle ──Retrace──► Tracing ──TraceDone──► Ready ──► [Transforming] ──► Displayed
//!   ▲                                        │
//!   └────────────── failure ◄────────────────┘        any state ──► Disposed
//! ```
//!
//! Every `Retrace` bumps a generation counter; a completion carrying any
//! other generation is discarded. Only the most recently requested trace
//! can ever become visible, even when completions arrive out of order.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{mpsc, watch};

use super::display::DisplaySurface;
use super::normalize::{apply_color, normalize};
use super::tracer::Tracer;
use crate::config::{RoughOptions, TraceParameters};
use crate::sketch::{SketchRenderer, sketch_document};
use crate::vector::parse_document;
use crate::{debug, log};

const CHANNEL_BUFFER: usize = 32;

/// A tracing request: image identity plus the parameter set.
#[derive(Clone)]
pub struct TraceRequest {
    pub image: Arc<Vec<u8>>,
    pub params: TraceParameters,
}

impl fmt::Debug for TraceRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceRequest")
            .field("image_bytes", &self.image.len())
            .field("params", &self.params)
            .finish()
    }
}

/// Messages to the coordinator.
#[derive(Debug)]
pub enum TraceMsg {
    /// Parameters or image identity changed: supersede any in-flight work.
    Retrace(TraceRequest),
    /// A tracer call finished; stale generations are discarded.
    TraceDone {
        generation: u64,
        result: Result<String, String>,
    },
    /// Tear down the instance and release the mount.
    Dispose,
}

/// Lifecycle phase of a display instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracePhase {
    Idle,
    Tracing,
    Ready,
    Transforming,
    Displayed,
    Disposed,
}

/// Observable coordinator state, published on every phase change.
#[derive(Debug, Clone)]
pub struct TraceStatus {
    pub generation: u64,
    pub phase: TracePhase,
    /// Set when the generation failed and the display was cleared.
    pub error: Option<String>,
}

impl TraceStatus {
    fn initial() -> Self {
        Self {
            generation: 0,
            phase: TracePhase::Idle,
            error: None,
        }
    }

    /// A settled status: nothing is in flight for the current generation.
    pub fn is_settled(&self) -> bool {
        match self.phase {
            TracePhase::Displayed | TracePhase::Disposed => true,
            TracePhase::Idle => self.generation > 0,
            _ => false,
        }
    }
}

/// Caller-side handle: issue requests, observe phases, dispose.
#[derive(Clone)]
pub struct CoordinatorHandle {
    tx: mpsc::Sender<TraceMsg>,
    status_rx: watch::Receiver<TraceStatus>,
    /// Requests issued through this handle. Generations are assigned in
    /// request order, so the coordinator's generation reaching this count
    /// means the latest request from here has been picked up.
    requests: u64,
}

impl CoordinatorHandle {
    /// Request a (re)trace; supersedes any in-flight request.
    pub async fn retrace(&mut self, image: Arc<Vec<u8>>, params: TraceParameters) -> Result<()> {
        self.tx
            .send(TraceMsg::Retrace(TraceRequest { image, params }))
            .await
            .map_err(|_| anyhow::anyhow!("trace coordinator is gone"))?;
        self.requests += 1;
        Ok(())
    }

    /// Tear the instance down. Safe mid-trace.
    pub async fn dispose(&self) {
        let _ = self.tx.send(TraceMsg::Dispose).await;
    }

    /// Wait until the latest request issued through this handle settles
    /// (displayed, failed, or the instance was disposed) and return its
    /// status. A still-published status from an earlier generation does
    /// not count as settled.
    pub async fn wait_settled(&mut self) -> TraceStatus {
        loop {
            let status = self.status_rx.borrow_and_update().clone();
            if status.phase == TracePhase::Disposed
                || (status.generation >= self.requests && status.is_settled())
            {
                return status;
            }
            if self.status_rx.changed().await.is_err() {
                return self.status_rx.borrow().clone();
            }
        }
    }
}

/// The actor. Owns the display surface, the tracer and the optional
/// sketch renderer.
pub struct TraceCoordinator<D: DisplaySurface> {
    rx: mpsc::Receiver<TraceMsg>,
    /// Weak self-sender: completions keep the channel open only while a
    /// trace is in flight, so dropping every handle disposes the instance.
    self_tx: mpsc::WeakSender<TraceMsg>,
    status_tx: watch::Sender<TraceStatus>,
    tracer: Arc<dyn Tracer>,
    renderer: Option<Arc<dyn SketchRenderer>>,
    rough: RoughOptions,
    color: Option<String>,
    display: D,
    target_width: f64,
    generation: u64,
    phase: TracePhase,
}

impl<D: DisplaySurface + 'static> TraceCoordinator<D> {
    pub fn new(tracer: Arc<dyn Tracer>, display: D, target_width: f64) -> (Self, CoordinatorHandle) {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER);
        let (status_tx, status_rx) = watch::channel(TraceStatus::initial());
        let coordinator = Self {
            rx,
            self_tx: tx.downgrade(),
            status_tx,
            tracer,
            renderer: None,
            rough: RoughOptions::default(),
            color: None,
            display,
            target_width,
            generation: 0,
            phase: TracePhase::Idle,
        };
        (
            coordinator,
            CoordinatorHandle {
                tx,
                status_rx,
                requests: 0,
            },
        )
    }

    /// Enable the sketch transform stage.
    pub fn with_renderer(mut self, renderer: Arc<dyn SketchRenderer>, rough: RoughOptions) -> Self {
        self.renderer = Some(renderer);
        self.rough = rough;
        self
    }

    /// Set the display color applied after normalization.
    pub fn with_color(mut self, color: String) -> Self {
        self.color = Some(color);
        self
    }

    /// Run the actor loop until disposal or until all handles are dropped.
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                TraceMsg::Retrace(request) => self.start_trace(request),
                TraceMsg::TraceDone { generation, result } => {
                    self.finish_trace(generation, result)
                }
                TraceMsg::Dispose => break,
            }
        }
        // Release the mount on every exit path, disposal mid-trace included.
        self.display.unmount();
        self.set_phase(TracePhase::Disposed, None);
        debug!("trace"; "coordinator disposed at generation {}", self.generation);
    }

    fn start_trace(&mut self, request: TraceRequest) {
        self.generation += 1;
        let generation = self.generation;

        // Stale output must not stay visible while new work is in flight.
        self.display.unmount();
        self.set_phase(TracePhase::Tracing, None);
        debug!("trace"; "request #{generation} ({} bytes)", request.image.len());

        let tracer = Arc::clone(&self.tracer);
        // Hold a strong sender for the duration of the call so the
        // completion can be delivered.
        let Some(tx) = self.self_tx.upgrade() else {
            return;
        };
        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || {
                tracer
                    .trace(&request.image, &request.params)
                    .map_err(|e| format!("{e:#}"))
            })
            .await
            .unwrap_or_else(|e| Err(format!("tracer task panicked: {e}")));

            // The coordinator may be gone already; nothing to deliver then.
            let _ = tx.send(TraceMsg::TraceDone { generation, result }).await;
        });
    }

    fn finish_trace(&mut self, generation: u64, result: Result<String, String>) {
        if generation != self.generation {
            // Superseded by a newer request: expected, not an error.
            debug!("trace"; "discarding superseded result #{generation}");
            return;
        }

        let outcome = result.and_then(|svg| self.present(&svg).map_err(|e| format!("{e:#}")));
        match outcome {
            Ok(()) => self.set_phase(TracePhase::Displayed, None),
            Err(error) => {
                log!("error"; "trace #{generation} failed: {error}");
                self.display.unmount();
                self.set_phase(TracePhase::Idle, Some(error));
            }
        }
    }

    /// Ready -> [Transforming] -> mounted.
    fn present(&mut self, svg: &str) -> Result<()> {
        self.set_phase(TracePhase::Ready, None);
        let mut doc = parse_document(svg)?;

        if let Some(renderer) = self.renderer.clone() {
            self.set_phase(TracePhase::Transforming, None);
            let replaced = sketch_document(&mut doc, renderer.as_ref(), &self.rough)?;
            debug!("trace"; "sketched {replaced} primitives");
        }

        normalize(&mut doc, self.target_width)?;
        if let Some(color) = &self.color {
            apply_color(&mut doc, color);
        }

        let rendered = doc.to_svg_string()?;
        // One live mount per instance: tear down before creating.
        self.display.unmount();
        self.display.mount(&rendered)?;
        Ok(())
    }

    fn set_phase(&mut self, phase: TracePhase, error: Option<String>) {
        if self.phase != phase {
            debug!("trace"; "phase {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
        let _ = self.status_tx.send(TraceStatus {
            generation: self.generation,
            phase,
            error,
        });
    }
}
