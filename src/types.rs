use serde::{Deserialize, Serialize};

/// Parsed front matter from the top of a document.
///
/// Field order is insertion order, which is what the properties panel
/// displays. `raw_block` is the exact delimited region (including both
/// `---` lines) and is used only to remove the block from the body — it is
/// never re-parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    /// Ordered `key -> value` pairs. A repeated key overwrites its value in
    /// place, keeping the original position.
    pub fields: Vec<(String, FieldValue)>,
    /// The matched delimited region, delimiters included.
    pub raw_block: String,
}

impl FrontMatter {
    /// Look up a field by key.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// A front matter field value: a scalar string or an ordered list of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

/// An image wikilink (`![[path|suffix]]`) resolved against the page context.
///
/// Built transiently by the image rewriter; not persisted anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageReference {
    /// The path as written inside the wikilink, before resolution.
    pub raw_path: String,
    /// The text after the first `|`, if any (either `WxH` or an alt override).
    pub size_or_alias: Option<String>,
    /// The final `src` attribute value.
    pub resolved_src: String,
    /// The `alt` attribute value (defaults to the last path segment).
    pub alt_text: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A callout block (`> [!kind] title` plus `> ` continuation lines).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callout {
    /// Lowercased type tag, used as the CSS class suffix.
    pub kind: String,
    /// Trimmed title text from the opening line; `None` when empty.
    pub title: Option<String>,
    /// Continuation lines with their `> ` prefix stripped.
    pub body_lines: Vec<String>,
}

/// The fully assembled output of one render pass.
///
/// Created once per document load and never mutated afterwards; the host
/// replaces the page content wholesale with [`RenderedDocument::to_page_html`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    /// Display title derived from the document's file name.
    pub title: String,
    /// Properties panel fragment; empty string when there is no front matter.
    pub properties_html: String,
    /// Body fragment after base rendering and post-render enhancement.
    pub body_html: String,
}

/// Transport protocol the document was loaded over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    File,
    Http,
    Https,
    Other,
}

impl Protocol {
    /// Whether the document is being viewed directly from the local
    /// filesystem (image paths then need `file://` URL conversion).
    pub fn is_local(self) -> bool {
        matches!(self, Protocol::File)
    }
}

/// Host-provided view of the loaded resource: its path, transport and
/// declared content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContext {
    /// Path component of the document location, e.g. `/notes/My%20Note.md`.
    pub path: String,
    pub protocol: Protocol,
    /// Declared content type, if the host knows one.
    pub content_type: Option<String>,
}

impl PageContext {
    pub fn new(path: impl Into<String>, protocol: Protocol) -> Self {
        Self {
            path: path.into(),
            protocol,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Whether the resource should be treated as markdown: declared
    /// `text/markdown`, or a `.md`/`.markdown` extension.
    pub fn is_markdown(&self) -> bool {
        if self.content_type.as_deref() == Some("text/markdown") {
            return true;
        }
        self.path.ends_with(".md") || self.path.ends_with(".markdown")
    }

    /// Directory part of `path`, used to resolve relative image links.
    /// Empty string when the path has no `/`.
    pub fn base_path(&self) -> &str {
        match self.path.rfind('/') {
            Some(idx) => &self.path[..idx],
            None => "",
        }
    }

    /// Display title: the percent-decoded base name with its final
    /// extension stripped. Undecodable names fall back to the raw basename.
    pub fn title(&self) -> String {
        let base = self.path.rsplit('/').next().unwrap_or("");
        let decoded = match urlencoding::decode(base) {
            Ok(s) => s.into_owned(),
            Err(_) => base.to_string(),
        };
        match decoded.rfind('.') {
            // Strip `.ext` only when there is a name before the dot and the
            // extension itself is non-empty.
            Some(idx) if idx > 0 && idx + 1 < decoded.len() => decoded[..idx].to_string(),
            _ => decoded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn front_matter_get() {
        let fm = FrontMatter {
            fields: vec![
                ("title".into(), FieldValue::Scalar("Hello".into())),
                ("tags".into(), FieldValue::List(vec!["a".into()])),
            ],
            raw_block: String::new(),
        };
        assert_eq!(fm.get("title"), Some(&FieldValue::Scalar("Hello".into())));
        assert!(fm.get("missing").is_none());
    }

    #[test]
    fn markdown_detection() {
        let by_ext = PageContext::new("/notes/a.md", Protocol::Https);
        assert!(by_ext.is_markdown());

        let by_long_ext = PageContext::new("/notes/a.markdown", Protocol::File);
        assert!(by_long_ext.is_markdown());

        let by_type = PageContext::new("/raw/a", Protocol::Http).with_content_type("text/markdown");
        assert!(by_type.is_markdown());

        let neither =
            PageContext::new("/index.html", Protocol::Http).with_content_type("text/html");
        assert!(!neither.is_markdown());
    }

    #[test]
    fn base_path_splits_on_last_slash() {
        let ctx = PageContext::new("/vault/daily/2026-02-10.md", Protocol::File);
        assert_eq!(ctx.base_path(), "/vault/daily");

        let bare = PageContext::new("note.md", Protocol::File);
        assert_eq!(bare.base_path(), "");
    }

    #[test]
    fn title_decodes_and_strips_extension() {
        let ctx = PageContext::new("/vault/My%20Note.md", Protocol::File);
        assert_eq!(ctx.title(), "My Note");
    }

    #[test]
    fn title_without_extension_is_unchanged() {
        let ctx = PageContext::new("/vault/README", Protocol::Https);
        assert_eq!(ctx.title(), "README");
    }

    #[test]
    fn title_keeps_leading_dot_names() {
        let ctx = PageContext::new("/vault/.hidden", Protocol::File);
        assert_eq!(ctx.title(), ".hidden");
    }
}
