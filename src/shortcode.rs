//! Gallery shortcode scanning and substitution.
//!
//! The host hands over mutable document text before markdown parsing;
//! every `%pico_ord_gallery <directory> [style]%` marker is replaced with
//! rendered gallery markup, or with nothing when the gallery cannot be
//! rendered. The transform is pure text-in, text-out — all state (the
//! style table, the thumbnailer) arrives as explicit parameters.
//!
//! Payload grammar: whitespace-separated tokens. The first is the gallery
//! directory. The second, when present *and* naming a configured style,
//! selects that style; otherwise the default applies. Any further tokens
//! are ignored.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::config::{DEFAULT_STYLE, StyleTable};
use crate::gallery;
use crate::imaging::ImageBackend;
use crate::thumbnail::Thumbnailer;

static GALLERY_SHORTCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%pico_ord_gallery (.+?)%").expect("shortcode pattern compiles"));

/// Replace every gallery shortcode in `text` with rendered markup.
pub fn expand<B: ImageBackend>(
    text: &str,
    styles: &StyleTable,
    thumbnailer: &Thumbnailer<B>,
) -> String {
    GALLERY_SHORTCODE
        .replace_all(text, |caps: &Captures<'_>| {
            let mut tokens = caps[1].split_whitespace();
            let Some(dir_token) = tokens.next() else {
                return String::new();
            };
            let style_name = tokens
                .next()
                .filter(|token| styles.contains(token))
                .unwrap_or(DEFAULT_STYLE);
            gallery::render(dir_token, styles.get(style_name), thumbnailer)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use std::fs;
    use tempfile::TempDir;

    /// Style table with a `default` and a `wide` style, caches under `tmp`.
    fn styles_in(tmp: &TempDir) -> StyleTable {
        let toml_text = format!(
            r#"
            [default]
            cache_dir = "{default_dir}"

            [wide]
            cache_dir = "{wide_dir}"
            thumbnail_size = {{ x = 640 }}
            "#,
            default_dir = tmp.path().join("cache-default").display(),
            wide_dir = tmp.path().join("cache-wide").display(),
        );
        StyleTable::from_toml_str(&toml_text).unwrap()
    }

    fn gallery_with_one_image(tmp: &TempDir) -> String {
        let gallery = tmp.path().join("gallery");
        fs::create_dir(&gallery).unwrap();
        fs::write(gallery.join("photo.jpg"), "fake image").unwrap();
        gallery.to_string_lossy().into_owned()
    }

    fn mock_thumbnailer() -> Thumbnailer<MockBackend> {
        Thumbnailer::with_backend(MockBackend::with_dimensions(1000, 500))
    }

    #[test]
    fn shortcode_is_replaced_with_markup() {
        let tmp = TempDir::new().unwrap();
        let styles = styles_in(&tmp);
        let dir = gallery_with_one_image(&tmp);

        let text = format!("Intro.\n\n%pico_ord_gallery {dir}%\n\nOutro.");
        let expanded = expand(&text, &styles, &mock_thumbnailer());

        assert!(!expanded.contains("%pico_ord_gallery"));
        assert!(expanded.contains("<div class=\"ord-gallery\">"));
        assert!(expanded.starts_with("Intro."));
        assert!(expanded.ends_with("Outro."));
    }

    #[test]
    fn known_style_token_selects_style() {
        let tmp = TempDir::new().unwrap();
        let styles = styles_in(&tmp);
        let dir = gallery_with_one_image(&tmp);

        let text = format!("%pico_ord_gallery {dir} wide%");
        let expanded = expand(&text, &styles, &mock_thumbnailer());

        // The wide style's x:640 constraint keys into the wide cache dir.
        assert!(expanded.contains("cache-wide"));
    }

    #[test]
    fn unknown_style_token_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let styles = styles_in(&tmp);
        let dir = gallery_with_one_image(&tmp);

        let text = format!("%pico_ord_gallery {dir} no-such-style%");
        let expanded = expand(&text, &styles, &mock_thumbnailer());

        assert!(expanded.contains("cache-default"));
    }

    #[test]
    fn extra_payload_tokens_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let styles = styles_in(&tmp);
        let dir = gallery_with_one_image(&tmp);

        let text = format!("%pico_ord_gallery {dir} wide trailing junk%");
        let expanded = expand(&text, &styles, &mock_thumbnailer());
        assert!(expanded.contains("cache-wide"));
    }

    #[test]
    fn missing_directory_vanishes() {
        let tmp = TempDir::new().unwrap();
        let styles = styles_in(&tmp);

        let text = "before %pico_ord_gallery /no/such/dir% after";
        let expanded = expand(text, &styles, &mock_thumbnailer());
        assert_eq!(expanded, "before  after");
    }

    #[test]
    fn multiple_shortcodes_are_all_expanded() {
        let tmp = TempDir::new().unwrap();
        let styles = styles_in(&tmp);
        let dir = gallery_with_one_image(&tmp);

        let text = format!(
            "%pico_ord_gallery {dir}%\nmiddle\n%pico_ord_gallery /no/such/dir%"
        );
        let expanded = expand(&text, &styles, &mock_thumbnailer());

        assert_eq!(expanded.matches("<div").count(), 1);
        assert!(!expanded.contains("%pico_ord_gallery"));
    }

    #[test]
    fn text_without_shortcodes_is_untouched() {
        let tmp = TempDir::new().unwrap();
        let styles = styles_in(&tmp);

        let text = "# Just a page\n\nNo galleries here.";
        assert_eq!(expand(text, &styles, &mock_thumbnailer()), text);
    }
}
