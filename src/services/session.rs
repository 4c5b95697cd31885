//! UI boundary facade.
//!
//! Translates the host's discrete events (file opened, viewport resized,
//! parameters edited) into state updates followed by a recompute request.

use std::path::Path;
use std::sync::Arc;

use crate::error::PreviewError;
use crate::models::{Colorspace, ViewportSize};
use crate::services::coordinator::RecomputeCoordinator;
use crate::services::loader::ImageLoader;
use crate::services::param_store::ParameterStore;
use crate::services::quantizer::Quantizer;
use crate::services::resize_cache::ResizeKernel;
use crate::services::sink::PresentationSink;

/// One open preview document: coordinator, parameter store and loader
/// wired together. Constructed once per document, discarded on close.
pub struct PreviewSession {
    coordinator: RecomputeCoordinator,
    params: Arc<ParameterStore>,
    loader: Arc<dyn ImageLoader>,
}

impl PreviewSession {
    pub fn new(
        loader: Arc<dyn ImageLoader>,
        resize_kernel: Arc<dyn ResizeKernel>,
        quantizer: Arc<dyn Quantizer>,
        sink: Arc<dyn PresentationSink>,
    ) -> Self {
        let params = Arc::new(ParameterStore::new());
        let coordinator =
            RecomputeCoordinator::new(Arc::clone(&params), resize_kernel, quantizer, sink);
        Self {
            coordinator,
            params,
            loader,
        }
    }

    /// Load a file and make it the current source.
    ///
    /// On failure nothing changes: the previous source (if any) stays
    /// loaded and no recompute is scheduled.
    pub fn on_file_opened(&self, path: &Path) -> Result<(), PreviewError> {
        let source = self.loader.load(path)?;
        self.coordinator.set_source(Some(Arc::new(source)));
        self.coordinator.request_recompute();
        Ok(())
    }

    /// Clear the current source; the sink receives the "no image"
    /// sentinel on the next run.
    pub fn on_file_closed(&self) {
        self.coordinator.set_source(None);
        self.coordinator.request_recompute();
    }

    pub fn on_viewport_resized(&self, width: u32, height: u32) {
        self.coordinator.set_viewport(ViewportSize::new(width, height));
        self.coordinator.request_recompute();
    }

    /// Validate and store three level text fields.
    ///
    /// A rejected edit returns false, keeps the last-good triple and does
    /// not schedule a doomed recompute.
    pub fn on_levels_edited(&self, a: &str, b: &str, c: &str) -> bool {
        if self.params.try_set_levels([a, b, c]) {
            self.coordinator.request_recompute();
            true
        } else {
            false
        }
    }

    pub fn on_colorspace_selected(&self, colorspace: Colorspace) {
        self.params.set_colorspace(colorspace);
        self.coordinator.request_recompute();
    }

    pub fn request_recompute(&self) {
        self.coordinator.request_recompute();
    }

    /// See [`RecomputeCoordinator::wait_idle`].
    pub async fn wait_idle(&self) {
        self.coordinator.wait_idle().await;
    }

    /// See [`RecomputeCoordinator::shutdown`].
    pub fn shutdown(&self) {
        self.coordinator.shutdown();
    }
}
