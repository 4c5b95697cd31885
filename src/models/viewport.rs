use serde::{Deserialize, Serialize};
use std::fmt;

/// Viewport dimensions reported by the host on layout/resize events.
///
/// Compared by value: two resize events carrying the same dimensions are
/// indistinguishable to the preview core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero-area viewport cannot hold a preview; such resize events are
    /// ignored by the coordinator.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for ViewportSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
