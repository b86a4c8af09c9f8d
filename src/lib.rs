//! # ord-gallery
//!
//! A deterministic, cache-backed image-thumbnailing subsystem for
//! page-rendering pipelines. Given a directory of source images and a
//! named style, it produces scale-to-fit JPEG thumbnails, persists them
//! under content-derived cache keys, and emits the gallery markup that
//! references them. The host embeds the library, resolves styles once at
//! startup, and runs a pure text transform per document.
//!
//! ```no_run
//! use ord_gallery::{StyleTable, Thumbnailer, shortcode};
//!
//! # fn main() -> Result<(), ord_gallery::ConfigError> {
//! let styles = StyleTable::from_toml_str(r#"
//!     [default]
//!     thumbnail_size = { y = 200 }
//!     cache_dir = "cache/ord-gallery"
//! "#)?;
//! let thumbnailer = Thumbnailer::new();
//!
//! let page = "# Trip\n\n%pico_ord_gallery photos/trip%\n";
//! let html = shortcode::expand(page, &styles, &thumbnailer);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Style resolution — raw options → validated, immutable [`StyleTable`] |
//! | [`cache`] | Content-addressed cache keys, on-disk layout, mtime staleness, atomic writes |
//! | [`imaging`] | Scale-to-fit math and the decode/resize/encode backend |
//! | [`thumbnail`] | One request end to end: derive → staleness check → generate |
//! | [`gallery`] | Directory listing, parallel thumbnailing, Maud markup composition |
//! | [`shortcode`] | `%pico_ord_gallery <dir> [style]%` scanning and substitution |
//! | [`naming`] | Caption derivation from filenames |
//!
//! # Design Decisions
//!
//! ## Content-derived keys, mtime staleness
//!
//! Cache keys hash the style's size constraints and the source *path*
//! (SHA-256), so a moved source gets a fresh entry rather than inheriting
//! a stale one. Invalidation is a plain mtime comparison — cheap, no
//! stored checksums — and encoding quality is deliberately excluded from
//! the key for compatibility with existing caches (see [`cache`]).
//!
//! ## Failures disappear, they don't break pages
//!
//! Only configuration resolution can fail loudly, and only at startup.
//! After that, a corrupt or unsupported image is silently dropped from
//! its gallery, and a missing directory collapses the shortcode to
//! nothing. A reader never sees a broken-image placeholder.
//!
//! ## Maud Over Template Engines
//!
//! Markup is composed with [Maud](https://maud.lambda.xyz/): compile-time
//! checked, type-safe, and escape-by-default, so filename-derived
//! captions cannot inject markup.
//!
//! ## Parallel by default, ordered output
//!
//! Thumbnails within a gallery are generated on rayon's pool; the
//! composed markup still follows directory-iteration order, and cache
//! writes go through temp-file-then-rename so concurrent renders of the
//! same page cannot tear each other's files.

pub mod cache;
pub mod config;
pub mod gallery;
pub mod imaging;
pub mod naming;
pub mod shortcode;
pub mod thumbnail;

pub use config::{ConfigError, RawStyleOptions, StyleConfig, StyleTable};
pub use thumbnail::{Outcome, Thumbnailer};

#[cfg(test)]
pub(crate) mod test_helpers;
