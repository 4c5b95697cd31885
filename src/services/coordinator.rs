//! Single-flight recompute coordinator.
//!
//! Serializes regeneration of the displayed image and coalesces bursts of
//! trigger events into at most one follow-up run. Requests are
//! level-triggered: each worker run snapshots the *current* source,
//! viewport and parameters at its own start, never values captured at
//! request time, so an arbitrary burst collapses to exactly one extra run
//! carrying the freshest state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::error::PreviewError;
use crate::models::{PreviewFrame, SourceImage, ViewportSize};
use crate::services::param_store::ParameterStore;
use crate::services::quantizer::Quantizer;
use crate::services::resize_cache::{ResizeCache, ResizeKernel};
use crate::services::sink::PresentationSink;

/// Status published with the "no image" sentinel.
pub const NO_FILE_STATUS: &str = "No file loaded";

/// Status published before CPU work starts.
pub const PROCESSING_STATUS: &str = "Processing...";

/// Scheduling state, owned solely by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    /// No work in flight.
    Idle,
    /// One worker run executing.
    Running,
    /// A run is executing and at least one more request arrived during it.
    RunningStale,
}

/// Document state owned exclusively by the coordinator between
/// "file opened" and "file closed".
struct DocState {
    source: Option<Arc<SourceImage>>,
    viewport: Option<ViewportSize>,
}

struct CoordinatorInner {
    state: Mutex<RunState>,
    idle: Notify,
    doc: Mutex<DocState>,
    params: Arc<ParameterStore>,
    resize_cache: ResizeCache,
    quantizer: Arc<dyn Quantizer>,
    sink: Arc<dyn PresentationSink>,
    shutdown: AtomicBool,
}

/// Single-flight scheduler for preview regeneration.
///
/// At most one transform invocation is in flight at any instant; every
/// trigger eventually causes the published image to reflect parameters no
/// older than the trigger. Cheap to clone; clones share one scheduler.
#[derive(Clone)]
pub struct RecomputeCoordinator {
    inner: Arc<CoordinatorInner>,
}

impl RecomputeCoordinator {
    pub fn new(
        params: Arc<ParameterStore>,
        resize_kernel: Arc<dyn ResizeKernel>,
        quantizer: Arc<dyn Quantizer>,
        sink: Arc<dyn PresentationSink>,
    ) -> Self {
        Self {
            inner: Arc::new(CoordinatorInner {
                state: Mutex::new(RunState::Idle),
                idle: Notify::new(),
                doc: Mutex::new(DocState {
                    source: None,
                    viewport: None,
                }),
                params,
                resize_cache: ResizeCache::new(resize_kernel),
                quantizer,
                sink,
                shutdown: AtomicBool::new(false),
            }),
        }
    }

    /// Replace (or clear) the source image. Invalidates the cached
    /// rendition; callers follow up with [`request_recompute`].
    ///
    /// [`request_recompute`]: Self::request_recompute
    pub fn set_source(&self, source: Option<Arc<SourceImage>>) {
        let mut doc = self.inner.doc.lock().expect("document lock poisoned");
        doc.source = source;
        drop(doc);
        self.inner.resize_cache.invalidate();
    }

    /// Record a viewport change. Zero-area viewports (mid-layout events)
    /// are ignored.
    pub fn set_viewport(&self, viewport: ViewportSize) {
        if viewport.is_empty() {
            return;
        }
        let mut doc = self.inner.doc.lock().expect("document lock poisoned");
        doc.viewport = Some(viewport);
    }

    /// Request a preview regeneration. Fire-and-forget: returns
    /// immediately, callable concurrently from any trigger source, and
    /// must run inside a tokio runtime (the worker is spawned onto it).
    ///
    /// Consumers observe the result through the presentation sink.
    pub fn request_recompute(&self) {
        if self.inner.shutdown.load(Ordering::SeqCst) {
            return;
        }

        let mut state = self
            .inner
            .state
            .lock()
            .expect("coordinator state lock poisoned");
        match *state {
            RunState::Idle => {
                *state = RunState::Running;
                drop(state);
                tokio::spawn(CoordinatorInner::drive(Arc::clone(&self.inner)));
            }
            RunState::Running => {
                // Flag only; the running worker picks this up on completion.
                *state = RunState::RunningStale;
            }
            RunState::RunningStale => {}
        }
    }

    /// Wait until no run is in flight and none is pending.
    ///
    /// Hosts use this to flush before teardown; tests synchronize on it.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            {
                let state = self
                    .inner
                    .state
                    .lock()
                    .expect("coordinator state lock poisoned");
                if *state == RunState::Idle {
                    return;
                }
            }
            notified.await;
        }
    }

    /// Stop scheduling new runs. An in-flight run completes normally; any
    /// pending follow-up is dropped.
    pub fn shutdown(&self) {
        self.inner.shutdown.store(true, Ordering::SeqCst);
    }
}

impl CoordinatorInner {
    /// Worker drive loop: one run at a time, re-running while the stale
    /// flag is set. A loop rather than a recursive self-call, so stack
    /// depth stays flat under pathological input bursts.
    async fn drive(inner: Arc<CoordinatorInner>) {
        loop {
            let worker = Arc::clone(&inner);
            match tokio::task::spawn_blocking(move || worker.run_once()).await {
                Ok(Ok(())) => {}
                Ok(Err(error)) => {
                    // Recoverable: previous frame stays published, the
                    // state machine advances so later requests still run.
                    tracing::warn!(error = %error, "Preview recompute failed");
                }
                Err(error) => {
                    tracing::error!(error = %error, "Recompute worker panicked");
                }
            }

            let mut state = inner.state.lock().expect("coordinator state lock poisoned");
            match *state {
                RunState::RunningStale if !inner.shutdown.load(Ordering::SeqCst) => {
                    // Coalesced requests arrived during the run: clear the
                    // flag and go again with a fresh snapshot.
                    *state = RunState::Running;
                }
                _ => {
                    *state = RunState::Idle;
                    drop(state);
                    inner.idle.notify_waiters();
                    return;
                }
            }
        }
    }

    /// One worker run, executed on a blocking thread.
    fn run_once(&self) -> Result<(), PreviewError> {
        // Snapshot at run start, not at request time.
        let (source, viewport) = {
            let doc = self.doc.lock().expect("document lock poisoned");
            (doc.source.clone(), doc.viewport)
        };
        let params = self.params.snapshot();

        let Some(source) = source else {
            self.sink.publish(PreviewFrame::empty(NO_FILE_STATUS));
            return Ok(());
        };

        // Best-effort progress feedback before the CPU work.
        self.sink.publish_status(PROCESSING_STATUS);

        // Until the host reports a layout, preview at source resolution.
        let viewport = viewport.unwrap_or_else(|| {
            let (width, height) = source.dimensions();
            ViewportSize::new(width, height)
        });

        let thumb = self.resize_cache.get(&source, viewport)?;

        let display = match params {
            Some(params) => {
                tracing::debug!(
                    colorspace = %params.colorspace,
                    levels = ?params.levels,
                    viewport = %viewport,
                    "Quantizing preview"
                );
                let quantized =
                    self.quantizer
                        .quantize((*thumb).clone(), params.colorspace, params.levels)?;
                Arc::new(quantized)
            }
            None => thumb,
        };

        self.sink.publish(PreviewFrame::new(display, source.name()));
        Ok(())
    }
}
