//! Pure Rust image processing backend — zero external dependencies.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Probe format + dimensions | `image::ImageReader::with_guessed_format` |
//! | Decode (JPEG, GIF, PNG) | `image` crate (pure Rust decoders) |
//! | Resize | `image::imageops::resize` with `Nearest` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//!
//! The format check goes by file content, not extension: a `.jpg` file
//! containing something else is rejected at the probe stage. Only JPEG,
//! GIF, and PNG decoders are compiled in; everything else is an
//! [`UnsupportedFormat`](BackendError::UnsupportedFormat) before any
//! decode work happens.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::ThumbnailParams;
use image::imageops::FilterType;
use image::{ImageEncoder, ImageFormat, ImageReader};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Formats with compiled-in decoders. Anything else is skipped.
const SUPPORTED_FORMATS: &[ImageFormat] =
    &[ImageFormat::Jpeg, ImageFormat::Gif, ImageFormat::Png];

/// Pure Rust backend using the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Open a source image, sniffing the format from its leading bytes.
///
/// Errors for unreadable files and for any format outside the supported
/// set, before a single pixel is decoded.
fn open_supported(path: &Path) -> Result<ImageReader<BufReader<File>>, BackendError> {
    let reader = ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?;
    match reader.format() {
        Some(format) if SUPPORTED_FORMATS.contains(&format) => Ok(reader),
        _ => Err(BackendError::UnsupportedFormat),
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = open_supported(path)?
            .into_dimensions()
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(Dimensions { width, height })
    }

    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError> {
        let decoded = open_supported(&params.source)?
            .decode()
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        // Truecolor output regardless of source color model (palette GIFs,
        // grayscale PNGs, ...): JPEG encoding wants RGB8.
        let scaled = image::imageops::resize(
            &decoded.to_rgb8(),
            params.width,
            params.height,
            FilterType::Nearest,
        );

        let mut encoded = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(
            std::io::Cursor::new(&mut encoded),
            params.quality.value() as u8,
        )
        .write_image(
            scaled.as_raw(),
            params.width,
            params.height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| BackendError::Encode(e.to_string()))?;

        // Temp-then-rename: a concurrent reader never sees a partial file,
        // and two writers racing on one key both land a complete thumbnail.
        crate::cache::atomic_write(&params.output, &encoded).map_err(BackendError::Io)
    }
}
