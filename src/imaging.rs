//! Image normalization for display and transient persistence for analysis.
//!
//! Uploaded and captured photos arrive as in-memory buffers; bundled examples are
//! filesystem paths. Both are rescaled to a fixed display width for rendering, and
//! buffers are written to a scoped temp file when the model gateway needs a path.

use crate::error::Result;
use image::imageops::FilterType;
use image::{GenericImageView, ImageFormat};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Fixed width for displayed label images, in pixels.
pub const DISPLAY_WIDTH: u32 = 300;

/// A reference to image bytes, either a bundled file or an upload/capture buffer.
#[derive(Debug, Clone)]
pub enum ImageData {
    /// Path to a bundled example image.
    Path(PathBuf),
    /// Raw bytes from an upload or camera capture.
    Bytes(Vec<u8>),
}

impl ImageData {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }
}

/// Rescale an image to [`DISPLAY_WIDTH`], preserving aspect ratio, and re-encode
/// it as PNG.
///
/// The source buffer is borrowed, so the caller's copy stays consumable by later
/// stages. Decode failures propagate as [`crate::LabelwiseError::ImageDecode`].
pub fn resize_for_display(source: &ImageData) -> Result<Vec<u8>> {
    let img = match source {
        ImageData::Path(path) => image::open(path)?,
        ImageData::Bytes(bytes) => image::load_from_memory(bytes)?,
    };

    let (width, height) = img.dimensions();
    let new_height =
        ((DISPLAY_WIDTH as f64 * height as f64 / width as f64).round() as u32).max(1);

    debug!(width, height, new_height, "Resizing image for display");

    let resized = img.resize_exact(DISPLAY_WIDTH, new_height, FilterType::Lanczos3);

    let mut buf = Cursor::new(Vec::new());
    resized.write_to(&mut buf, ImageFormat::Png)?;

    Ok(buf.into_inner())
}

/// A transient image file backing one analysis call.
///
/// The file is created uniquely named in the working directory with a `.jpg`
/// suffix (the gateway only needs a readable path, not a matching encoding) and
/// is deleted when the guard drops, whether analysis succeeded or failed.
pub struct TempImage {
    file: NamedTempFile,
}

impl TempImage {
    /// Write raw upload/capture bytes to a fresh temp file.
    pub fn persist(bytes: &[u8]) -> Result<Self> {
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile_in(".")?;
        file.write_all(bytes)?;
        file.flush()?;

        debug!(path = %file.path().display(), "Persisted image to temp file");

        Ok(Self { file })
    }

    /// Path of the temp file, valid until this guard drops.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
