pub mod coordinator;
pub mod loader;
pub mod param_store;
pub mod quantizer;
pub mod resize_cache;
pub mod session;
pub mod sink;

pub use coordinator::RecomputeCoordinator;
pub use loader::{FsImageLoader, ImageLoader};
pub use param_store::ParameterStore;
pub use quantizer::Quantizer;
pub use resize_cache::{LanczosKernel, ResizeCache, ResizeKernel};
pub use session::PreviewSession;
pub use sink::{FrameChannel, PresentationSink};
