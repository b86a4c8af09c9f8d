//! Shared test utilities for the ord-gallery test suite.
//!
//! Synthetic image creation (no fixture files to ship) and a one-liner for
//! a `StyleConfig` whose cache lives inside a test's temp directory.

use image::RgbImage;
use std::path::Path;

use crate::config::StyleConfig;

/// Stock-default style with its cache rooted under `dir`.
pub fn style_with_cache_dir(dir: &Path) -> StyleConfig {
    StyleConfig {
        cache_dir: crate::config::normalize_dir(&dir.join("cache").to_string_lossy()),
        ..StyleConfig::default()
    }
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Write a small valid JPEG with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    image::DynamicImage::ImageRgb8(gradient(width, height))
        .save_with_format(path, image::ImageFormat::Jpeg)
        .unwrap();
}

/// Write a small valid PNG with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    image::DynamicImage::ImageRgb8(gradient(width, height))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// Write a small valid GIF with the given dimensions.
pub fn create_test_gif(path: &Path, width: u32, height: u32) {
    image::DynamicImage::ImageRgb8(gradient(width, height))
        .save_with_format(path, image::ImageFormat::Gif)
        .unwrap();
}
