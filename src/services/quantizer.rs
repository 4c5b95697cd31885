//! Contract of the quantization collaborator (the "transform library").
//!
//! The numeric colorspace-conversion and level-quantization math lives
//! outside this crate; the coordinator only needs a deterministic,
//! CPU-bound function it can run on a worker thread.

use image::RgbaImage;

use crate::error::TransformError;
use crate::models::Colorspace;

/// Per-channel level quantization in a chosen colorspace.
///
/// Implementations must be stateless and deterministic. The coordinator
/// hands over an owned buffer (mutate in place and return it, or replace
/// it) and guarantees single-flight invocation, so implementations need
/// no internal locking.
pub trait Quantizer: Send + Sync {
    fn quantize(
        &self,
        image: RgbaImage,
        colorspace: Colorspace,
        levels: [u32; 3],
    ) -> Result<RgbaImage, TransformError>;
}
