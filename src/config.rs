//! Style configuration: loading, merging, validation.
//!
//! The host hands us a mapping from style name to raw options (TOML-shaped;
//! any serde source works). Resolution turns that into an immutable
//! [`StyleTable`] of fully-populated [`StyleConfig`] values, one per style
//! plus the implicit `"default"`, before the first thumbnail request is
//! served.
//!
//! ## Recognized options
//!
//! ```toml
//! [default]
//! thumbnail_size = { y = 200 }        # axis ("x"/"y") → pixel bound
//! gallery_class = "ord-gallery"
//! gallery_item_class = "ord-gallery-item"
//! thumbnail_quality = 75              # JPEG quality, (0, 100]
//! cache_dir = "cache/ord-gallery"
//!
//! [wide]
//! thumbnail_size = { x = 640 }
//! cache_dir = "cache/ord-gallery-wide"
//! ```
//!
//! Options are sparse — a style only names what it overrides. Unrecognized
//! keys are ignored, not rejected. A user-supplied `default` style is
//! resolved first; every other style then layers over that result, so
//! shared tweaks belong in `default`.
//!
//! Resolution is the only fatal surface of the crate: an uncreatable or
//! unwritable cache directory, or a non-positive size constraint, aborts
//! host initialization. Everything after init degrades per-image.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::imaging::Quality;

/// Name of the implicit style used when no (or an unknown) style is requested.
pub const DEFAULT_STYLE: &str = "default";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("cache directory '{0}' is not writable")]
    CacheDirNotWritable(String),
}

/// Raw per-style options as supplied by the host configuration.
///
/// Every field is optional; unknown keys are silently ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStyleOptions {
    /// Axis name → pixel bound, e.g. `{ y = 200 }` or `{ x = 100, y = 200 }`.
    pub thumbnail_size: Option<BTreeMap<String, i64>>,
    /// CSS class for the gallery container element.
    pub gallery_class: Option<String>,
    /// CSS class for each gallery item element.
    pub gallery_item_class: Option<String>,
    /// JPEG encoding quality. Non-positive values fall back to the default
    /// style's quality rather than erroring.
    pub thumbnail_quality: Option<i64>,
    /// Cache directory for this style's thumbnails.
    pub cache_dir: Option<String>,
}

/// A fully-resolved style. Immutable once the table is built.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    /// Axis → positive pixel bound. `BTreeMap` keeps axis order canonical
    /// (sorted), which the cache key derivation depends on.
    pub constraints: BTreeMap<String, u32>,
    /// Normalized cache directory, always with one trailing `/`.
    pub cache_dir: String,
    pub gallery_class: String,
    pub gallery_item_class: String,
    pub quality: Quality,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            constraints: BTreeMap::from([("y".to_string(), 200)]),
            cache_dir: "cache/ord-gallery/".to_string(),
            gallery_class: "ord-gallery".to_string(),
            gallery_item_class: "ord-gallery-item".to_string(),
            quality: Quality::default(),
        }
    }
}

/// Normalize a directory token: trim surrounding whitespace and slashes,
/// append exactly one trailing `/`. A leading `/` survives so absolute
/// paths stay absolute.
pub(crate) fn normalize_dir(raw: &str) -> String {
    let trimmed = raw.trim();
    let absolute = trimmed.starts_with('/');
    let core = trimmed.trim_matches(|c: char| c == '/' || c.is_whitespace());
    if core.is_empty() {
        return "/".to_string();
    }
    if absolute {
        format!("/{core}/")
    } else {
        format!("{core}/")
    }
}

/// Resolve one style's raw options over a base configuration.
///
/// The base is the stock default for the `default` style itself, and the
/// resolved `default` for every other style.
fn resolve_style(raw: &RawStyleOptions, base: &StyleConfig) -> Result<StyleConfig, ConfigError> {
    let mut style = base.clone();

    if let Some(sizes) = &raw.thumbnail_size {
        let mut constraints = BTreeMap::new();
        for (axis, bound) in sizes {
            let bound = u32::try_from(*bound).ok().filter(|b| *b > 0).ok_or_else(|| {
                ConfigError::Validation(format!(
                    "thumbnail_size.{axis} must be a positive pixel bound, got {bound}"
                ))
            })?;
            constraints.insert(axis.clone(), bound);
        }
        style.constraints = constraints;
    }
    if let Some(class) = &raw.gallery_class {
        style.gallery_class = class.clone();
    }
    if let Some(class) = &raw.gallery_item_class {
        style.gallery_item_class = class.clone();
    }
    if let Some(quality) = raw.thumbnail_quality {
        // Non-positive input keeps the base quality (which for named
        // styles is whatever the default style resolved to).
        if quality > 0 {
            style.quality = Quality::new(quality as u32);
        }
    }
    if let Some(dir) = &raw.cache_dir {
        style.cache_dir = normalize_dir(dir);
    }

    Ok(style)
}

/// Create a style's cache directory tree and verify it is writable.
///
/// Failure here is fatal to host initialization — a style whose cache
/// cannot receive files must never serve thumbnail requests.
fn init_cache_dir(style: &StyleConfig) -> Result<(), ConfigError> {
    let dir = Path::new(&style.cache_dir);
    fs::create_dir_all(dir)?;
    tempfile::tempfile_in(dir)
        .map_err(|_| ConfigError::CacheDirNotWritable(style.cache_dir.clone()))?;
    Ok(())
}

/// All resolved styles, indexed by name. Always contains `"default"`.
#[derive(Debug, Clone)]
pub struct StyleTable {
    styles: BTreeMap<String, StyleConfig>,
}

impl StyleTable {
    /// Resolve a host-supplied style mapping into a table.
    ///
    /// The `default` entry (if present) resolves over stock defaults
    /// first; remaining styles resolve over that result. Each style's
    /// cache directory is created and write-checked eagerly.
    pub fn resolve(raw: &BTreeMap<String, RawStyleOptions>) -> Result<Self, ConfigError> {
        let stock = StyleConfig::default();
        let default = match raw.get(DEFAULT_STYLE) {
            Some(options) => resolve_style(options, &stock)?,
            None => stock,
        };
        init_cache_dir(&default)?;

        let mut styles = BTreeMap::new();
        for (name, options) in raw {
            if name == DEFAULT_STYLE {
                continue;
            }
            let style = resolve_style(options, &default)?;
            init_cache_dir(&style)?;
            styles.insert(name.clone(), style);
        }
        styles.insert(DEFAULT_STYLE.to_string(), default);
        Ok(Self { styles })
    }

    /// Resolve a table straight from TOML text (one table per style name).
    pub fn from_toml_str(toml_text: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, RawStyleOptions> = toml::from_str(toml_text)?;
        Self::resolve(&raw)
    }

    /// Look up a style by name. Unknown names silently fall back to
    /// `"default"` — a misspelled style token renders, just unstyled.
    pub fn get(&self, name: &str) -> &StyleConfig {
        self.styles
            .get(name)
            .unwrap_or_else(|| &self.styles[DEFAULT_STYLE])
    }

    /// Whether a style with this exact name was configured.
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }
}
