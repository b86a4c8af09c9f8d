//! One thumbnail request, end to end.
//!
//! [`Thumbnailer`] ties the cache modules and the imaging backend into a
//! single call per (source, style) pair:
//!
//! 1. derive the content-addressed cache path,
//! 2. reuse the cached file when it is not stale (no decode work at all),
//! 3. otherwise probe, scale-to-fit, resize, and encode.
//!
//! Every per-image failure — unsupported format, corrupt file, I/O error
//! on write — collapses to [`Outcome::Skipped`]. Nothing a single image
//! does can abort a gallery render; a skipped image simply vanishes from
//! the output.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cache;
use crate::config::StyleConfig;
use crate::imaging::{ImageBackend, RustBackend, ThumbnailParams, scale_to_fit};

/// Result of one thumbnail request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Generated on this request.
    Fresh(PathBuf),
    /// Reused from cache without decoding.
    Cached(PathBuf),
    /// Source unusable or write failed; excluded from output.
    Skipped,
}

impl Outcome {
    /// The cache path, unless the image was skipped.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Outcome::Fresh(path) | Outcome::Cached(path) => Some(path),
            Outcome::Skipped => None,
        }
    }
}

/// Thumbnail request orchestrator, generic over the imaging backend.
pub struct Thumbnailer<B: ImageBackend = RustBackend> {
    backend: B,
}

impl Thumbnailer<RustBackend> {
    pub fn new() -> Self {
        Self {
            backend: RustBackend::new(),
        }
    }
}

impl Default for Thumbnailer<RustBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ImageBackend> Thumbnailer<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Produce (or reuse) the thumbnail for one source under one style.
    pub fn thumbnail(&self, source: &Path, style: &StyleConfig) -> Outcome {
        let cache_path = cache::derive_cache_path(source, style);
        if !cache::needs_regeneration(&cache_path, source) {
            return Outcome::Cached(cache_path);
        }

        // Fan-out subdirectory is created lazily, per first key in it.
        if let Some(parent) = cache_path.parent()
            && fs::create_dir_all(parent).is_err()
        {
            return Outcome::Skipped;
        }

        let Ok(dims) = self.backend.identify(source) else {
            return Outcome::Skipped;
        };
        let (width, height) = scale_to_fit((dims.width, dims.height), &style.constraints);

        let params = ThumbnailParams {
            source: source.to_path_buf(),
            output: cache_path.clone(),
            width,
            height,
            quality: style.quality,
        };
        match self.backend.thumbnail(&params) {
            Ok(()) => Outcome::Fresh(cache_path),
            Err(_) => Outcome::Skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::test_helpers::style_with_cache_dir;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, "source bytes").unwrap();
    }

    #[test]
    fn fresh_generation_scales_to_fit() {
        let tmp = TempDir::new().unwrap();
        let style = style_with_cache_dir(tmp.path()); // {y: 200}
        let source = tmp.path().join("photo.jpg");
        touch(&source);

        let thumbnailer = Thumbnailer::with_backend(MockBackend::with_dimensions(1000, 500));
        let outcome = thumbnailer.thumbnail(&source, &style);

        let Outcome::Fresh(path) = outcome else {
            panic!("expected fresh generation, got {outcome:?}");
        };
        assert!(path.exists());

        let ops = thumbnailer.backend.get_operations();
        assert!(matches!(
            &ops[1],
            RecordedOp::Thumbnail {
                width: 400,
                height: 200,
                quality: 75,
                ..
            }
        ));
    }

    #[test]
    fn second_request_short_circuits_on_cache() {
        let tmp = TempDir::new().unwrap();
        let style = style_with_cache_dir(tmp.path());
        let source = tmp.path().join("photo.jpg");
        touch(&source);

        let thumbnailer = Thumbnailer::with_backend(MockBackend::with_dimensions(1000, 500));
        let first = thumbnailer.thumbnail(&source, &style);
        let second = thumbnailer.thumbnail(&source, &style);

        assert!(matches!(first, Outcome::Fresh(_)));
        assert_eq!(second, Outcome::Cached(first.path().unwrap().to_path_buf()));
        // Identify + thumbnail from the first call only; the second did no work.
        assert_eq!(thumbnailer.backend.get_operations().len(), 2);
    }

    #[test]
    fn touched_source_regenerates() {
        let tmp = TempDir::new().unwrap();
        let style = style_with_cache_dir(tmp.path());
        let source = tmp.path().join("photo.jpg");
        touch(&source);

        let thumbnailer = Thumbnailer::with_backend(MockBackend::with_dimensions(1000, 500));
        let first = thumbnailer.thumbnail(&source, &style);

        // Backdate the cached file so the source is strictly newer.
        let past = SystemTime::now() - Duration::from_secs(3600);
        fs::File::options()
            .write(true)
            .open(first.path().unwrap())
            .unwrap()
            .set_modified(past)
            .unwrap();

        let second = thumbnailer.thumbnail(&source, &style);
        assert!(matches!(second, Outcome::Fresh(_)));
        assert_eq!(thumbnailer.backend.get_operations().len(), 4);
    }

    #[test]
    fn unreadable_source_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let style = style_with_cache_dir(tmp.path());
        let source = tmp.path().join("not-an-image.txt");
        touch(&source);

        let thumbnailer = Thumbnailer::with_backend(MockBackend::failing());
        assert_eq!(thumbnailer.thumbnail(&source, &style), Outcome::Skipped);
    }

    #[test]
    fn backend_write_failure_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let style = style_with_cache_dir(tmp.path());
        let source = tmp.path().join("photo.jpg");
        touch(&source);

        let backend = MockBackend {
            fail_thumbnail: true,
            ..MockBackend::with_dimensions(1000, 500)
        };
        let thumbnailer = Thumbnailer::with_backend(backend);
        assert_eq!(thumbnailer.thumbnail(&source, &style), Outcome::Skipped);
    }

    #[test]
    fn fanout_subdirectory_is_created_lazily() {
        let tmp = TempDir::new().unwrap();
        let style = style_with_cache_dir(tmp.path());
        let source = tmp.path().join("photo.jpg");
        touch(&source);

        let cache_path = crate::cache::derive_cache_path(&source, &style);
        assert!(!cache_path.parent().unwrap().exists());

        let thumbnailer = Thumbnailer::with_backend(MockBackend::with_dimensions(100, 100));
        thumbnailer.thumbnail(&source, &style);
        assert!(cache_path.parent().unwrap().is_dir());
    }
}
