pub mod colorspace;
pub mod image;
pub mod viewport;

pub use colorspace::{Colorspace, TransformParams};
pub use image::{PreviewFrame, SourceId, SourceImage};
pub use viewport::ViewportSize;
