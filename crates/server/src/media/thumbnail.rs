//! Thumbnail generation for stored images.
//!
//! A thumbnail lives next to its source and is named by convention: the
//! source stem plus [`THUMB_SUFFIX`] before the extension. No registry is
//! kept; the name is the only link between the two files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use image::DynamicImage;
use image::imageops::FilterType;
use tokio::sync::Semaphore;
use tracing::debug;

/// Thumbnail dimensions (width, height).
pub const THUMBNAIL_SIZE: (u32, u32) = (75, 75);

/// Suffix inserted before a file's extension to name its thumbnail.
pub const THUMB_SUFFIX: &str = "_thumb";

/// Maximum concurrent thumbnail generations.
/// Prevents CPU exhaustion from many simultaneous uploads.
const MAX_CONCURRENT_PROCESSING: usize = 4;

/// Derive the thumbnail filename for a source file.
///
/// The suffix goes between the stem and the extension: `photo.jpg` becomes
/// `photo_thumb.jpg`, extensionless `photo` becomes `photo_thumb`.
pub fn thumb_filename(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}{THUMB_SUFFIX}.{ext}"),
        None => format!("{stem}{THUMB_SUFFIX}"),
    };

    match path.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

/// Check whether a path names a thumbnail by the suffix convention.
pub fn is_thumbnail(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(THUMB_SUFFIX))
}

/// Thumbnail generation service.
///
/// Decoding and resizing are CPU-bound, so generation runs on blocking
/// threads behind a small semaphore.
#[derive(Clone)]
pub struct ThumbnailService {
    /// Semaphore limiting concurrent image processing.
    semaphore: Arc<Semaphore>,
}

impl ThumbnailService {
    /// Create a new thumbnail service.
    pub fn new() -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(MAX_CONCURRENT_PROCESSING)),
        }
    }

    /// Generate the thumbnail for a stored image, saving it alongside the
    /// original. Returns the thumbnail path.
    ///
    /// An unreadable or corrupt image is an error; there is no fallback
    /// thumbnail.
    pub async fn create(&self, source: &Path) -> Result<PathBuf> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| anyhow::anyhow!("thumbnail semaphore closed"))?;

        let source = source.to_path_buf();
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            generate(&source)
        })
        .await
        .context("thumbnail task panicked")?
    }
}

impl Default for ThumbnailService {
    fn default() -> Self {
        Self::new()
    }
}

/// Open, normalize, fit-and-crop, and save the thumbnail for `source`.
///
/// The output format follows the thumbnail's extension, i.e. the source's.
pub fn generate(source: &Path) -> Result<PathBuf> {
    let image = image::open(source)
        .with_context(|| format!("failed to open image {}", source.display()))?;

    // Keep 8-bit grayscale and RGB as-is; everything else (palette-decoded
    // RGBA, 16-bit, CMYK-derived) is normalized to RGB so any output format
    // can encode it.
    let image = match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => image,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    };

    let (width, height) = THUMBNAIL_SIZE;
    let thumbnail = image.resize_to_fill(width, height, FilterType::Lanczos3);

    let dest = thumb_filename(source);
    thumbnail
        .save(&dest)
        .with_context(|| format!("failed to save thumbnail {}", dest.display()))?;

    debug!(source = %source.display(), thumb = %dest.display(), "thumbnail created");
    Ok(dest)
}
