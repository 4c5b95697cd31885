use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use image::RgbaImage;

static NEXT_SOURCE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of a loaded source image.
///
/// Allocated from a process-wide counter, so re-opening the same file
/// yields a fresh identity and invalidates anything cached against the
/// old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(u64);

impl SourceId {
    pub fn allocate() -> Self {
        Self(NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Full-resolution source image, immutable once constructed.
///
/// Owned by the coordinator between "file opened" and "file closed";
/// replaced wholesale when a new file is opened.
pub struct SourceImage {
    id: SourceId,
    name: String,
    pixels: RgbaImage,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, pixels: RgbaImage) -> Self {
        Self {
            id: SourceId::allocate(),
            name: name.into(),
            pixels,
        }
    }

    pub fn id(&self) -> SourceId {
        self.id
    }

    /// File name shown in the status line after a successful run.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

/// A finished preview handed to the presentation sink.
///
/// `image == None` is the "no image" sentinel published when no file is
/// loaded. The sink receives an independently owned handle, never a
/// mutable reference into coordinator state.
#[derive(Clone)]
pub struct PreviewFrame {
    pub image: Option<Arc<RgbaImage>>,
    pub status: String,
    /// When this frame was generated
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl PreviewFrame {
    pub fn new(image: Arc<RgbaImage>, status: impl Into<String>) -> Self {
        Self {
            image: Some(image),
            status: status.into(),
            generated_at: chrono::Utc::now(),
        }
    }

    /// The "no image" sentinel frame.
    pub fn empty(status: impl Into<String>) -> Self {
        Self {
            image: None,
            status: status.into(),
            generated_at: chrono::Utc::now(),
        }
    }
}
