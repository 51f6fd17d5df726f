//! Post-render enhancement.
//!
//! Three passes over the rendered HTML, in fixed order: `#tag` spans,
//! `==highlight==` marks, `^block-id` spans. Each pass walks the serialized
//! HTML and applies its substitution only inside text segments — never
//! inside `<...>` markup — so attribute values and tag names containing
//! `#`, `=` or `^` sequences are left alone.

/// Apply all three enhancement passes to a rendered HTML fragment.
pub fn enhance(html: &str) -> String {
    let html = map_text_segments(html, tag_pass);
    let html = map_text_segments(&html, highlight_pass);
    map_text_segments(&html, blockref_pass)
}

/// Run `transform` over every text segment of `html`, copying markup
/// (anything between `<` and `>`) through untouched.
fn map_text_segments(html: &str, transform: impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        out.push_str(&transform(&rest[..open]));
        match rest[open..].find('>') {
            Some(close) => {
                out.push_str(&rest[open..open + close + 1]);
                rest = &rest[open + close + 1..];
            }
            None => {
                // Dangling `<` with no close; emit as-is and stop.
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }

    out.push_str(&transform(rest));
    out
}

fn is_word_start(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// `#word` preceded by segment start or whitespace becomes a tag span. The
/// preceding whitespace is preserved in place.
fn tag_pass(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let at_boundary = i == 0 || chars[i - 1].is_whitespace();
        if chars[i] == '#' && at_boundary && chars.get(i + 1).copied().is_some_and(is_word_start)
        {
            let mut end = i + 2;
            while end < chars.len() && is_word_char(chars[end]) {
                end += 1;
            }
            let tag: String = chars[i..end].iter().collect();
            out.push_str(&format!("<span class=\"md-tag\">{tag}</span>"));
            i = end;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }

    out
}

/// `==text==` (text being one or more non-`=` characters) becomes a
/// highlighted mark.
fn highlight_pass(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("==") {
        let after = &rest[start + 2..];
        let run_len = after.find('=').unwrap_or(after.len());
        if run_len > 0 && after[run_len..].starts_with("==") {
            out.push_str(&rest[..start]);
            out.push_str(&format!(
                "<mark class=\"md-highlight\">{}</mark>",
                &after[..run_len]
            ));
            rest = &after[run_len + 2..];
        } else {
            // No closing `==`; emit one `=` and rescan from the next.
            out.push_str(&rest[..start + 1]);
            rest = &rest[start + 1..];
        }
    }

    out.push_str(rest);
    out
}

/// `^block-id` becomes a block reference span, caret included.
fn blockref_pass(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '^' && chars.get(i + 1).copied().is_some_and(is_word_start) {
            let mut end = i + 2;
            while end < chars.len() && is_word_char(chars[end]) {
                end += 1;
            }
            let id: String = chars[i..end].iter().collect();
            out.push_str(&format!("<span class=\"md-blockref\">{id}</span>"));
            i = end;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }

    out
}
