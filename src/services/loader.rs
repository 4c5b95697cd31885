//! File-loading collaborator.

use std::path::Path;

use crate::error::PreviewError;
use crate::models::SourceImage;

/// Decodes a file into a [`SourceImage`].
///
/// A failed load must leave the caller's state untouched; the session
/// only replaces the current source after a successful decode.
pub trait ImageLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<SourceImage, PreviewError>;
}

/// Built-in loader over the `image` crate's format auto-detection.
pub struct FsImageLoader;

impl ImageLoader for FsImageLoader {
    fn load(&self, path: &Path) -> Result<SourceImage, PreviewError> {
        let decoded = image::open(path).map_err(|source| PreviewError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        tracing::debug!(path = %path.display(), name = %name, "Loaded source image");
        Ok(SourceImage::new(name, decoded.to_rgba8()))
    }
}
