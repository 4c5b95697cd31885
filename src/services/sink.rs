//! Presentation sink: the write-only boundary towards the display layer.

use tokio::sync::watch;

use crate::models::PreviewFrame;

/// Status line shown before any file has been opened.
pub const GREETING_STATUS: &str = "Open an image file to begin";

/// Receives finished frames and status updates.
///
/// Publishes may arrive from a worker thread, not only the orchestrating
/// context. The coordinator serializes them and orders them by freshness,
/// so "last publish wins" is the only requirement on implementations.
pub trait PresentationSink: Send + Sync {
    /// Publish a finished frame (or the "no image" sentinel).
    fn publish(&self, frame: PreviewFrame);

    /// Update the status line only, keeping the current image.
    fn publish_status(&self, status: &str);
}

/// Built-in sink backed by a `tokio::sync::watch` channel.
///
/// Display layers subscribe with [`FrameChannel::subscribe`] and always
/// observe the most recent frame; intermediate frames overwritten during
/// a burst are never surfaced.
pub struct FrameChannel {
    sender: watch::Sender<PreviewFrame>,
}

impl FrameChannel {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(PreviewFrame::empty(GREETING_STATUS));
        Self { sender }
    }

    pub fn subscribe(&self) -> watch::Receiver<PreviewFrame> {
        self.sender.subscribe()
    }
}

impl Default for FrameChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationSink for FrameChannel {
    fn publish(&self, frame: PreviewFrame) {
        // send_replace never fails, even with no subscribers
        self.sender.send_replace(frame);
    }

    fn publish_status(&self, status: &str) {
        self.sender.send_modify(|frame| {
            frame.status = status.to_string();
        });
    }
}
