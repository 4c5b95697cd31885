use std::path::PathBuf;

use thiserror::Error;

use crate::models::Colorspace;

/// Error surface of the quantization collaborator (the "transform library").
///
/// The coordinator treats these as recoverable: a failed run is logged,
/// the previously published frame stays on screen, and the state machine
/// keeps accepting requests.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("invalid level counts: {0:?}")]
    InvalidLevels([u32; 3]),

    #[error("unsupported colorspace: {0}")]
    UnsupportedColorspace(Colorspace),
}

/// Errors produced by the preview core.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("transform failed: {0}")]
    Transform(#[from] TransformError),

    #[error(
        "resize kernel returned {actual_width}x{actual_height}, expected {expected_width}x{expected_height}"
    )]
    ResizeContract {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}
