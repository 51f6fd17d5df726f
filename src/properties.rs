//! Properties panel renderer.
//!
//! Turns parsed front matter into a collapsible "Properties" panel: a
//! toggleable header plus a two-column table, one row per field in insertion
//! order. Values are HTML-escaped and plain `http(s)://` URLs become anchors
//! opening in a new context with `rel="noopener"`.

use crate::types::{FieldValue, FrontMatter};

/// Render the properties panel fragment. The panel starts collapsed; the
/// host drives [`PanelState`] transitions from pointer/keyboard activation.
pub fn render_properties(front_matter: &FrontMatter) -> String {
    let mut html = String::from(
        "<div class=\"md-frontmatter md-frontmatter-collapsed\">\
         <div class=\"md-frontmatter-title\" tabindex=\"0\" role=\"button\" aria-expanded=\"false\">\
         Properties <span class=\"md-frontmatter-toggle\">\u{25BC}</span></div>\
         <div class=\"md-frontmatter-content\"><table class=\"md-frontmatter-table\">",
    );

    for (key, value) in &front_matter.fields {
        let rendered = match value {
            FieldValue::Scalar(s) => linkify(s),
            FieldValue::List(items) => {
                let linked: Vec<String> = items.iter().map(|s| linkify(s)).collect();
                linked.join(", ")
            }
        };
        html.push_str(&format!(
            "<tr><td class=\"md-frontmatter-key\">{}</td><td>{}</td></tr>",
            escape_html(key),
            rendered,
        ));
    }

    html.push_str("</table></div></div>");
    html
}

/// Escape the text and wrap any `http://`/`https://` run (delimited by
/// whitespace, `,` or `;`) in an anchor.
fn linkify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = find_url_start(rest) {
        out.push_str(&escape_html(&rest[..start]));
        let tail = &rest[start..];
        let end = tail
            .find(|c: char| c.is_whitespace() || c == ',' || c == ';')
            .unwrap_or(tail.len());
        let url = escape_html(&tail[..end]);
        out.push_str(&format!(
            "<a href=\"{url}\" target=\"_blank\" rel=\"noopener\">{url}</a>"
        ));
        rest = &tail[end..];
    }

    out.push_str(&escape_html(rest));
    out
}

fn find_url_start(text: &str) -> Option<usize> {
    let http = text.find("http://");
    let https = text.find("https://");
    match (http, https) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Escape HTML special characters to prevent XSS.
pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Collapse state of the properties panel. Toggling is a pure UI affordance
/// driven by the host; the rendered fragment always starts collapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Collapsed,
    Expanded,
}

impl PanelState {
    pub fn toggle(self) -> Self {
        match self {
            PanelState::Collapsed => PanelState::Expanded,
            PanelState::Expanded => PanelState::Collapsed,
        }
    }

    /// Value for the header's `aria-expanded` attribute.
    pub fn aria_expanded(self) -> &'static str {
        match self {
            PanelState::Collapsed => "false",
            PanelState::Expanded => "true",
        }
    }

    /// Toggle marker glyph shown next to the header text.
    pub fn marker(self) -> &'static str {
        match self {
            PanelState::Collapsed => "\u{25BC}",
            PanelState::Expanded => "\u{25B2}",
        }
    }
}
