//! Caption derivation from image filenames.
//!
//! Gallery items have no metadata sidecar; the filename is the only source
//! of a human-readable caption. The rules are deliberately small:
//!
//! - One trailing `.extension` (ASCII alphanumeric) is stripped.
//! - Runs of `-` and `_` collapse to a single space.
//!
//! So `sunset_over-bay.JPG` becomes "sunset over bay".

/// Derive a display caption from a filename.
///
/// ```
/// # use ord_gallery::naming::caption_from_filename;
/// assert_eq!(caption_from_filename("sunset_over-bay.JPG"), "sunset over bay");
/// assert_eq!(caption_from_filename("IMG_0042.jpeg"), "IMG 0042");
/// ```
pub fn caption_from_filename(filename: &str) -> String {
    let stem = strip_extension(filename);

    let mut caption = String::with_capacity(stem.len());
    let mut in_separator = false;
    for c in stem.chars() {
        if c == '-' || c == '_' {
            if !in_separator {
                caption.push(' ');
                in_separator = true;
            }
        } else {
            caption.push(c);
            in_separator = false;
        }
    }
    caption
}

/// Strip one final `.extension` where the extension is non-empty ASCII
/// alphanumeric. Anything else (no dot, empty or non-alphanumeric suffix)
/// is left alone.
fn strip_extension(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            stem
        }
        _ => filename,
    }
}
