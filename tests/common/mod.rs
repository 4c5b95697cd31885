//! Common test infrastructure for crushview integration tests.
//!
//! Each test file compiles its own copy of this module, so items may appear
//! unused from the perspective of a single test file even though they're
//! used elsewhere.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};

use image::{Rgba, RgbaImage};

use crushview::error::TransformError;
use crushview::models::{Colorspace, PreviewFrame, ViewportSize};
use crushview::services::{LanczosKernel, PresentationSink, Quantizer, ResizeKernel};

/// Sink that records every publish for later assertions.
pub struct RecordingSink {
    frames: Mutex<Vec<PreviewFrame>>,
    statuses: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            frames: Mutex::new(Vec::new()),
            statuses: Mutex::new(Vec::new()),
        })
    }

    pub fn frames(&self) -> Vec<PreviewFrame> {
        self.frames.lock().unwrap().clone()
    }

    pub fn last_frame(&self) -> Option<PreviewFrame> {
        self.frames.lock().unwrap().last().cloned()
    }

    /// Status-only updates ("Processing...") seen so far.
    pub fn statuses(&self) -> Vec<String> {
        self.statuses.lock().unwrap().clone()
    }
}

impl PresentationSink for RecordingSink {
    fn publish(&self, frame: PreviewFrame) {
        self.frames.lock().unwrap().push(frame);
    }

    fn publish_status(&self, status: &str) {
        self.statuses.lock().unwrap().push(status.to_string());
    }
}

/// Resize kernel that counts invocations, delegating to Lanczos.
pub struct TrackingKernel {
    inner: LanczosKernel,
    calls: AtomicUsize,
}

impl TrackingKernel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: LanczosKernel,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ResizeKernel for TrackingKernel {
    fn resize(&self, source: &RgbaImage, viewport: ViewportSize) -> RgbaImage {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resize(source, viewport)
    }
}

/// Quantize one channel value to `n` discrete levels.
pub fn quantize_channel(value: u8, n: u32) -> u8 {
    if n <= 1 {
        return 0;
    }
    let index = ((value as u32 * n) / 256).min(n - 1);
    (index * 255 / (n - 1)) as u8
}

/// Reference RGB level quantizer used as the transform collaborator in
/// tests. Counts invocations, records the parameters each run saw, and
/// can be gated so a run blocks until the test releases it.
pub struct LevelQuantizer {
    calls: AtomicUsize,
    seen: Mutex<Vec<[u32; 3]>>,
    gate: Mutex<Option<mpsc::Receiver<()>>>,
}

/// Handle that releases one gated quantizer run per call.
pub struct Gate {
    sender: mpsc::Sender<()>,
}

impl Gate {
    pub fn release(&self) {
        // recv also unblocks when the sender is dropped at test end
        let _ = self.sender.send(());
    }
}

impl LevelQuantizer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            gate: Mutex::new(None),
        })
    }

    /// A quantizer whose every invocation blocks until [`Gate::release`].
    pub fn gated() -> (Arc<Self>, Gate) {
        let (sender, receiver) = mpsc::channel();
        let quantizer = Arc::new(Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            gate: Mutex::new(Some(receiver)),
        });
        (quantizer, Gate { sender })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Level triples in the order runs observed them.
    pub fn seen(&self) -> Vec<[u32; 3]> {
        self.seen.lock().unwrap().clone()
    }
}

impl Quantizer for LevelQuantizer {
    fn quantize(
        &self,
        mut image: RgbaImage,
        colorspace: Colorspace,
        levels: [u32; 3],
    ) -> Result<RgbaImage, TransformError> {
        if colorspace != Colorspace::Rgb {
            return Err(TransformError::UnsupportedColorspace(colorspace));
        }
        if levels.iter().any(|&n| n == 0) {
            return Err(TransformError::InvalidLevels(levels));
        }

        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(levels);

        {
            let gate = self.gate.lock().unwrap();
            if let Some(receiver) = gate.as_ref() {
                let _ = receiver.recv();
            }
        }

        for pixel in image.pixels_mut() {
            let Rgba([r, g, b, a]) = *pixel;
            *pixel = Rgba([
                quantize_channel(r, levels[0]),
                quantize_channel(g, levels[1]),
                quantize_channel(b, levels[2]),
                a,
            ]);
        }
        Ok(image)
    }
}

/// Quantizer that fails a configurable number of times, then succeeds by
/// passing the image through unchanged.
pub struct FlakyQuantizer {
    fail_remaining: AtomicIsize,
    calls: AtomicUsize,
}

impl FlakyQuantizer {
    pub fn failing(times: isize) -> Arc<Self> {
        Arc::new(Self {
            fail_remaining: AtomicIsize::new(times),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Quantizer for FlakyQuantizer {
    fn quantize(
        &self,
        image: RgbaImage,
        _colorspace: Colorspace,
        levels: [u32; 3],
    ) -> Result<RgbaImage, TransformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_remaining.fetch_sub(1, Ordering::SeqCst) > 0 {
            return Err(TransformError::InvalidLevels(levels));
        }
        Ok(image)
    }
}

/// Write a solid-color PNG fixture and return its path.
pub fn solid_png(
    dir: &tempfile::TempDir,
    name: &str,
    width: u32,
    height: u32,
    rgba: [u8; 4],
) -> PathBuf {
    let path = dir.path().join(name);
    let image = RgbaImage::from_pixel(width, height, Rgba(rgba));
    image.save(&path).expect("failed to write PNG fixture");
    path
}
