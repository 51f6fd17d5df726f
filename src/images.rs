//! Image-wikilink rewriting.
//!
//! Converts every `![[path|suffix]]` token into a block-level `<img>`
//! wrapped in `<div class="md-img-block">`. Wrapping in a block container is
//! what lets the dialect preprocessor guarantee spacing between an image and
//! a following list. Tokens that do not fit the syntax pass through
//! unchanged.

use crate::properties::escape_html;
use crate::types::ImageReference;

/// Rewrite all image wikilinks in `body`.
///
/// `base_path` is the document's directory (for relative paths) and `local`
/// says whether the document came from the filesystem, in which case
/// resolved paths become `file://` URLs.
pub fn rewrite_images(body: &str, base_path: &str, local: bool) -> String {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(start) = rest.find("![[") {
        let after = &rest[start + 3..];
        // The inner text may not contain `]`; the token must close with `]]`.
        let token = after.find(']').and_then(|close| {
            if close > 0 && after[close + 1..].starts_with(']') {
                Some(&after[..close])
            } else {
                None
            }
        });

        match token {
            Some(inner) => {
                out.push_str(&rest[..start]);
                let image = resolve_image(inner, base_path, local);
                out.push_str(&render_image(&image));
                rest = &rest[start + 3 + inner.len() + 2..];
            }
            None => {
                // Not a well-formed token; emit up to and including `![[`
                // and keep scanning.
                out.push_str(&rest[..start + 3]);
                rest = &rest[start + 3..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Resolve the inner text of one wikilink into an [`ImageReference`].
pub fn resolve_image(inner: &str, base_path: &str, local: bool) -> ImageReference {
    let (raw_path, suffix) = match inner.split_once('|') {
        Some((p, s)) => (p.trim(), Some(s.trim())),
        None => (inner.trim(), None),
    };

    let mut resolved = if is_absolute(raw_path) {
        raw_path.to_string()
    } else {
        format!("{base_path}/{raw_path}")
    };

    if local {
        let mut abs = resolved.replace('\\', "/");
        if !abs.starts_with('/') {
            abs.insert(0, '/');
        }
        resolved = format!("file://{}", abs.replace(' ', "%20"));
    }

    let mut alt = raw_path.rsplit('/').next().unwrap_or(raw_path).to_string();
    let mut width = None;
    let mut height = None;

    if let Some(suffix) = suffix.filter(|s| !s.is_empty()) {
        match parse_dimensions(suffix) {
            Some((w, h)) => {
                width = Some(w);
                height = Some(h);
            }
            None => alt = suffix.to_string(),
        }
    }

    ImageReference {
        raw_path: raw_path.to_string(),
        size_or_alias: suffix.filter(|s| !s.is_empty()).map(str::to_string),
        resolved_src: resolved,
        alt_text: alt,
        width,
        height,
    }
}

fn render_image(image: &ImageReference) -> String {
    let mut size = String::new();
    if let (Some(w), Some(h)) = (image.width, image.height) {
        size = format!(" width=\"{w}\" height=\"{h}\"");
    }
    format!(
        "<div class=\"md-img-block\"><img src=\"{}\" alt=\"{}\"{size} /></div>",
        escape_html(&image.resolved_src),
        escape_html(&image.alt_text),
    )
}

/// Absolute means a leading `/`, optionally preceded by an ASCII-alphabetic
/// scheme and `:` (`https://…`, `file:/…`, `C:/…`).
fn is_absolute(path: &str) -> bool {
    if path.starts_with('/') {
        return true;
    }
    let Some(colon) = path.find(':') else {
        return false;
    };
    let scheme = &path[..colon];
    !scheme.is_empty()
        && scheme.chars().all(|c| c.is_ascii_alphabetic())
        && path[colon + 1..].starts_with('/')
}

/// Match a `WxH` suffix: decimal digits on both sides of a single `x`.
fn parse_dimensions(suffix: &str) -> Option<(u32, u32)> {
    let (w, h) = suffix.split_once('x')?;
    if w.is_empty() || h.is_empty() {
        return None;
    }
    if !w.bytes().all(|b| b.is_ascii_digit()) || !h.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((w.parse().ok()?, h.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn relative_path_gets_base_prefix() {
        let out = rewrite_images("![[x.png]]", "/vault", false);
        assert_eq!(
            out,
            "<div class=\"md-img-block\"><img src=\"/vault/x.png\" alt=\"x.png\" /></div>"
        );
    }

    #[test]
    fn absolute_url_is_untouched() {
        let img = resolve_image("https://cdn.example.com/x.png", "/vault", false);
        assert_eq!(img.resolved_src, "https://cdn.example.com/x.png");
        assert_eq!(img.alt_text, "x.png");
    }

    #[test]
    fn dimensions_suffix_sets_width_height_keeps_alt() {
        let img = resolve_image("x.png|300x200", "/vault", false);
        assert_eq!(img.width, Some(300));
        assert_eq!(img.height, Some(200));
        assert_eq!(img.alt_text, "x.png");

        let out = rewrite_images("![[x.png|300x200]]", "/vault", false);
        assert!(out.contains("width=\"300\" height=\"200\""));
        assert!(out.contains("alt=\"x.png\""));
    }

    #[test]
    fn non_dimension_suffix_overrides_alt() {
        let img = resolve_image("shots/x.png|A nice view", "/vault", false);
        assert_eq!(img.alt_text, "A nice view");
        assert!(img.width.is_none());
    }

    #[test]
    fn malformed_dimensions_are_alt_text() {
        let img = resolve_image("x.png|300x", "/vault", false);
        assert_eq!(img.alt_text, "300x");
        let img = resolve_image("x.png|axb", "/vault", false);
        assert_eq!(img.alt_text, "axb");
    }

    #[test]
    fn local_file_url_conversion() {
        let img = resolve_image("pics\\my shot.png", "/vault/sub", true);
        assert_eq!(img.resolved_src, "file:///vault/sub/pics/my%20shot.png");
    }

    #[test]
    fn local_conversion_adds_leading_slash() {
        let img = resolve_image("x.png", "", true);
        assert_eq!(img.resolved_src, "file:///x.png");
    }

    #[test]
    fn default_alt_is_last_segment() {
        let img = resolve_image("a/b/c.gif", "/v", false);
        assert_eq!(img.alt_text, "c.gif");
    }

    #[test]
    fn unterminated_token_passes_through() {
        assert_eq!(rewrite_images("look ![[x.png", "/v", false), "look ![[x.png");
        assert_eq!(rewrite_images("![[", "/v", false), "![[");
    }

    #[test]
    fn multiple_tokens_in_one_body() {
        let out = rewrite_images("a ![[x.png]] b ![[y.png]] c", "/v", false);
        assert_eq!(out.matches("md-img-block").count(), 2);
        assert!(out.contains("/v/x.png"));
        assert!(out.contains("/v/y.png"));
    }

    #[test]
    fn drive_letter_path_is_absolute() {
        let img = resolve_image("C:/shots/x.png", "/v", false);
        assert_eq!(img.resolved_src, "C:/shots/x.png");
    }
}
