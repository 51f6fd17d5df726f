//! Callout rewriting.
//!
//! Scans for blockquote-prefixed `> [!kind] Title` openers at column 0 and
//! collects the `> ` continuation lines that follow. Each block becomes a
//! `<div class="callout callout-{kind}">` container; the body is passed back
//! through the base markdown renderer, so callouts can hold arbitrary nested
//! markdown. Nested callouts inside a callout are rendered as plain
//! blockquotes (single pass, same as the consumed syntax).

use crate::markdown::MarkdownRender;
use crate::properties::escape_html;
use crate::types::Callout;

/// Rewrite all callout blocks in `body`, rendering their contents through
/// `renderer`.
pub fn rewrite_callouts(body: &str, renderer: &dyn MarkdownRender) -> String {
    let lines: Vec<&str> = body.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut idx = 0;

    while idx < lines.len() {
        match parse_callout(&lines[idx..]) {
            Some((callout, consumed)) => {
                out.push(render_callout(&callout, renderer));
                idx += consumed;
            }
            None => {
                out.push(lines[idx].to_string());
                idx += 1;
            }
        }
    }

    out.join("\n")
}

/// Try to parse a callout block starting at `lines[0]`.
///
/// Returns the callout and the number of source lines consumed.
fn parse_callout(lines: &[&str]) -> Option<(Callout, usize)> {
    let opener = lines[0].strip_prefix("> [!")?;
    let kind_end = opener.find(']')?;
    let kind = &opener[..kind_end];
    if kind.is_empty()
        || !kind
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return None;
    }

    let title = opener[kind_end + 1..].trim();

    // Continuation lines require the `> ` prefix with the space; a bare `>`
    // line ends the block.
    let mut consumed = 1;
    let mut body_lines = Vec::new();
    for line in &lines[1..] {
        if line.starts_with("> ") {
            body_lines.push(strip_quote_prefix(line).to_string());
            consumed += 1;
        } else {
            break;
        }
    }

    Some((
        Callout {
            kind: kind.to_lowercase(),
            title: (!title.is_empty()).then(|| title.to_string()),
            body_lines,
        },
        consumed,
    ))
}

fn strip_quote_prefix(line: &str) -> &str {
    line.strip_prefix("> ")
        .or_else(|| line.strip_prefix('>'))
        .unwrap_or(line)
}

fn render_callout(callout: &Callout, renderer: &dyn MarkdownRender) -> String {
    let title = match &callout.title {
        Some(t) => format!("<div class=\"callout-title\">{}</div>", escape_html(t)),
        None => String::new(),
    };
    let body = renderer.render(&callout.body_lines.join("\n"));
    format!(
        "<div class=\"callout callout-{}\">{title}{body}</div>",
        callout.kind,
    )
}
