//! Gallery markup composition.
//!
//! Renders one gallery: enumerate a directory, thumbnail every regular
//! file, and wrap the survivors in container/item markup. Images are
//! processed in parallel with [rayon](https://docs.rs/rayon) — thumbnail
//! generation is embarrassingly parallel — while the composed markup keeps
//! directory-iteration order (rayon's indexed collect preserves it).
//!
//! Directory entries come back in filesystem iteration order, which is
//! not sorted and not stable across filesystems. The markup order simply
//! mirrors whatever `read_dir` yields.
//!
//! Failure policy: anything that cannot become a thumbnail — subdirectory,
//! text file, corrupt image — is left out of the markup entirely. No
//! broken-image placeholder, no error text. A missing directory, or one
//! where every entry was skipped, renders to the empty string so the
//! host's shortcode vanishes from the page.
//!
//! HTML is generated with [maud](https://maud.lambda.xyz/): type-safe
//! templates with automatic escaping, so captions and class names can
//! never break out of their attributes.

use maud::html;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{StyleConfig, normalize_dir};
use crate::imaging::ImageBackend;
use crate::naming::caption_from_filename;
use crate::thumbnail::Thumbnailer;

/// One surviving gallery entry, ready for markup.
struct GalleryItem {
    source: PathBuf,
    thumb: PathBuf,
    caption: String,
}

/// Render the gallery markup for a directory token.
///
/// Returns an empty string when the token does not name a directory or
/// when no image survives thumbnailing.
pub fn render<B: ImageBackend>(
    dir_token: &str,
    style: &StyleConfig,
    thumbnailer: &Thumbnailer<B>,
) -> String {
    let dir = normalize_dir(dir_token);
    let dir_path = Path::new(&dir);
    if !dir_path.is_dir() {
        return String::new();
    }
    let Ok(entries) = fs::read_dir(dir_path) else {
        return String::new();
    };

    let files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();

    let items: Vec<GalleryItem> = files
        .par_iter()
        .filter_map(|source| {
            let thumb = thumbnailer.thumbnail(source, style).path()?.to_path_buf();
            let caption = source
                .file_name()
                .map(|name| caption_from_filename(&name.to_string_lossy()))
                .unwrap_or_default();
            Some(GalleryItem {
                source: source.clone(),
                thumb,
                caption,
            })
        })
        .collect();

    if items.is_empty() {
        return String::new();
    }
    compose(style, &items)
}

/// Turn a filesystem path into a site URL with exactly one leading `/`.
///
/// Relative paths (gallery dirs and cache dirs under the site root) get
/// the prefix; absolute paths already carry theirs.
fn web_path(path: &Path) -> String {
    if path.is_absolute() {
        path.display().to_string()
    } else {
        format!("/{}", path.display())
    }
}

/// Wrap items in the container element.
///
/// The fragment is substituted into markdown before parsing, so it is
/// padded with blank lines to form its own block.
fn compose(style: &StyleConfig, items: &[GalleryItem]) -> String {
    let markup = html! {
        div class=(style.gallery_class) {
            "\n"
            @for item in items {
                span class=(style.gallery_item_class) {
                    a href=(web_path(&item.source)) {
                        img src=(web_path(&item.thumb)) alt=(item.caption);
                    }
                }
                "\n"
            }
        }
    };
    format!("\n\n{}\n\n", markup.into_string())
}
