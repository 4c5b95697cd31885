//! Viewport-sized rendition of the source image, memoized on
//! `(source identity, viewport dimensions)`.

use std::sync::{Arc, Mutex};

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::PreviewError;
use crate::models::{SourceId, SourceImage, ViewportSize};

/// Resize strategy collaborator.
///
/// The output must fill the requested viewport exactly; aspect handling
/// (letterboxing, cropping, stretching) is the kernel's concern.
pub trait ResizeKernel: Send + Sync {
    fn resize(&self, source: &RgbaImage, viewport: ViewportSize) -> RgbaImage;
}

/// Built-in kernel: exact-fit Lanczos3 resampling.
pub struct LanczosKernel;

impl ResizeKernel for LanczosKernel {
    fn resize(&self, source: &RgbaImage, viewport: ViewportSize) -> RgbaImage {
        imageops::resize(source, viewport.width, viewport.height, FilterType::Lanczos3)
    }
}

struct CachedThumb {
    source_id: SourceId,
    viewport: ViewportSize,
    image: Arc<RgbaImage>,
}

/// Memoizing cache over a [`ResizeKernel`].
///
/// A change in either the source identity or the viewport invalidates the
/// cached rendition; a hit never invokes the kernel. The coordinator's
/// single-flight discipline guarantees `get` is never invoked concurrently
/// for the same source, so the internal lock only protects against
/// `invalidate` from the orchestrating context.
pub struct ResizeCache {
    kernel: Arc<dyn ResizeKernel>,
    cached: Mutex<Option<CachedThumb>>,
}

impl ResizeCache {
    pub fn new(kernel: Arc<dyn ResizeKernel>) -> Self {
        Self {
            kernel,
            cached: Mutex::new(None),
        }
    }

    /// Return the viewport-sized rendition of `source`, recomputing only
    /// when the cached one no longer matches `(source.id(), viewport)`.
    pub fn get(
        &self,
        source: &SourceImage,
        viewport: ViewportSize,
    ) -> Result<Arc<RgbaImage>, PreviewError> {
        {
            let cached = self.cached.lock().expect("resize cache lock poisoned");
            if let Some(thumb) = cached.as_ref() {
                if thumb.source_id == source.id() && thumb.viewport == viewport {
                    return Ok(Arc::clone(&thumb.image));
                }
            }
        }

        let image = self.kernel.resize(source.pixels(), viewport);
        let (width, height) = image.dimensions();
        if width != viewport.width || height != viewport.height {
            return Err(PreviewError::ResizeContract {
                expected_width: viewport.width,
                expected_height: viewport.height,
                actual_width: width,
                actual_height: height,
            });
        }

        tracing::debug!(
            source_id = ?source.id(),
            viewport = %viewport,
            "Recomputed preview rendition"
        );

        let image = Arc::new(image);
        let mut cached = self.cached.lock().expect("resize cache lock poisoned");
        *cached = Some(CachedThumb {
            source_id: source.id(),
            viewport,
            image: Arc::clone(&image),
        });
        Ok(image)
    }

    /// Drop the cached rendition (file closed or replaced).
    pub fn invalidate(&self) {
        let mut cached = self.cached.lock().expect("resize cache lock poisoned");
        *cached = None;
    }
}
