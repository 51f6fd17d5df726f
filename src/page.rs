//! Page assembly and the one-shot render handle.
//!
//! [`render_document`] drives the whole pipeline once over a raw document:
//! front matter → properties panel → image rewriting → dialect
//! preprocessing → callouts → base render → post-render enhancement →
//! assembly. [`RenderHandle`] wraps it in an explicit {unrendered, rendered}
//! state machine: the pipeline is not idempotent (re-running it would treat
//! rendered HTML as raw markdown), so re-entry is rejected rather than left
//! to call-site discipline.

use crate::callouts::rewrite_callouts;
use crate::enhance::enhance;
use crate::error::{Diagnostic, ViewError};
use crate::frontmatter;
use crate::images::rewrite_images;
use crate::markdown::MarkdownRender;
use crate::preprocess::preprocess;
use crate::properties::{escape_html, render_properties};
use crate::types::{PageContext, RenderedDocument};

/// A rendered document plus the non-fatal findings collected along the way.
#[derive(Debug, Clone)]
pub struct RenderResult {
    pub doc: RenderedDocument,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run the full pipeline over `source` once.
///
/// This function never panics; malformed dialect syntax passes through to
/// the output as literal text.
pub fn render_document(
    source: &str,
    ctx: &PageContext,
    renderer: &dyn MarkdownRender,
) -> RenderResult {
    let mut diagnostics = Vec::new();

    let normalized = source.replace("\r\n", "\n");

    let (front_matter, body) = frontmatter::extract(&normalized, &mut diagnostics);
    let properties_html = match &front_matter {
        Some(fm) => render_properties(fm),
        None => String::new(),
    };

    let body = rewrite_images(&body, ctx.base_path(), ctx.protocol.is_local());
    let body = preprocess(&body);
    let body = rewrite_callouts(&body, renderer);

    tracing::debug!(bytes = body.len(), "handing body to base renderer");
    let body_html = renderer.render(&body);
    let body_html = enhance(&body_html);

    RenderResult {
        doc: RenderedDocument {
            title: ctx.title(),
            properties_html,
            body_html,
        },
        diagnostics,
    }
}

impl RenderedDocument {
    /// Assemble the final page body: title block, optional properties panel,
    /// body container. The host replaces the page content wholesale with
    /// this markup.
    pub fn to_page_html(&self) -> String {
        format!(
            "<div class=\"md-main-title\">{}</div>{}<div class=\"markdown-preview-view\">{}</div>",
            escape_html(&self.title),
            self.properties_html,
            self.body_html,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenderState {
    Unrendered,
    Rendered,
}

/// One-shot render gate for a single loaded page.
#[derive(Debug)]
pub struct RenderHandle {
    ctx: PageContext,
    state: RenderState,
}

impl RenderHandle {
    /// Create a handle for a loaded resource. Fails when the resource is not
    /// identified as markdown by content type or extension.
    pub fn new(ctx: PageContext) -> Result<Self, ViewError> {
        if !ctx.is_markdown() {
            tracing::debug!(path = %ctx.path, content_type = ?ctx.content_type, "not a markdown resource");
            return Err(ViewError::NotMarkdown {
                path: ctx.path.clone(),
                content_type: ctx.content_type.clone(),
            });
        }
        Ok(Self {
            ctx,
            state: RenderState::Unrendered,
        })
    }

    pub fn is_rendered(&self) -> bool {
        self.state == RenderState::Rendered
    }

    /// Render `source` exactly once. A missing renderer is fatal (the page
    /// stays unrendered); a second call is rejected.
    pub fn render(
        &mut self,
        source: &str,
        renderer: Option<&dyn MarkdownRender>,
    ) -> Result<RenderResult, ViewError> {
        if self.state == RenderState::Rendered {
            return Err(ViewError::AlreadyRendered);
        }
        let renderer = match renderer {
            Some(r) => r,
            None => {
                tracing::warn!(path = %self.ctx.path, "base markdown renderer unavailable");
                return Err(ViewError::RendererUnavailable);
            }
        };

        let result = render_document(source, &self.ctx, renderer);
        self.state = RenderState::Rendered;
        tracing::debug!(path = %self.ctx.path, title = %result.doc.title, "document rendered");
        Ok(result)
    }
}

/// Stylesheet for the emitted markup. The host appends this to the page
/// head; the pipeline itself never touches the DOM.
pub const VIEWER_CSS: &str = r#"
body {
  background: linear-gradient(135deg, #f8fafc 0%, #f3f0ff 100%);
}
.md-main-title {
  font-family: 'Segoe UI', 'Arial', sans-serif;
  font-size: 2.2em;
  font-weight: bold;
  color: #4c1d95;
  background: #fff;
  box-shadow: 0 2px 16px #7c3aed11;
  border-radius: 12px;
  padding: 1.2em 1.5em 0.8em 1.5em;
  margin: 2em auto 1.5em auto;
  max-width: 900px;
}
.markdown-preview-view {
  font-family: 'Segoe UI', 'Arial', 'Inter', 'Helvetica Neue', sans-serif;
  background: #fff;
  color: #222;
  padding: 2.5em 2em 2em 2em;
  margin: 0 auto 3em auto;
  border-radius: 16px;
  box-shadow: 0 4px 32px #7c3aed0a;
  min-height: 80vh;
  max-width: 900px;
  line-height: 1.7;
  font-size: 1.08em;
}
.markdown-preview-view h1, .markdown-preview-view h2, .markdown-preview-view h3 {
  font-weight: 700;
  color: #4c1d95;
  margin-top: 2em;
  margin-bottom: 0.7em;
}
.markdown-preview-view pre, .markdown-preview-view code {
  background: #f3f0ff;
  color: #3b0764;
  border-radius: 6px;
  padding: 0.2em 0.4em;
}
.markdown-preview-view pre {
  padding: 1em;
  overflow-x: auto;
  margin: 1.5em 0;
}
.markdown-preview-view blockquote {
  border-left: 4px solid #a78bfa;
  background: #f3f0ff;
  color: #4c1d95;
  margin: 1.5em 0;
  padding: 0.7em 1.2em;
  border-radius: 8px;
  font-style: italic;
}
.markdown-preview-view table {
  border-collapse: collapse;
  width: 100%;
  margin: 1.5em 0;
}
.markdown-preview-view th, .markdown-preview-view td {
  border: 1px solid #e5e7eb;
  padding: 0.7em 1.2em;
  text-align: left;
}
.markdown-preview-view img {
  max-width: 100%;
  border-radius: 8px;
  margin: 1.2em 0;
}
.md-img-block {
  margin: 1.2em 0;
}
.markdown-preview-view .callout {
  border-left: 6px solid #7c3aed;
  background: #f6f6ff;
  padding: 1.2em 1.2em 1.2em 1.5em;
  margin: 2em 0;
  border-radius: 10px;
}
.markdown-preview-view .callout-title {
  font-weight: bold;
  color: #7c3aed;
  margin-bottom: 0.5em;
  font-size: 1.08em;
}
.markdown-preview-view .md-tag {
  display: inline-block;
  background: #ede9fe;
  color: #7c3aed;
  border-radius: 6px;
  padding: 0.1em 0.7em;
  margin: 0 0.2em;
  font-size: 0.97em;
  font-weight: 500;
}
.markdown-preview-view .md-highlight {
  background: #fef08a;
  color: #92400e;
  border-radius: 4px;
  padding: 0.1em 0.3em;
}
.markdown-preview-view .md-blockref {
  color: #a21caf;
  background: #f3e8ff;
  border-radius: 4px;
  padding: 0.1em 0.3em;
  font-size: 0.95em;
  margin-left: 0.2em;
}
.md-frontmatter {
  background: #fff;
  box-shadow: 0 2px 16px #7c3aed11;
  border-radius: 12px;
  padding: 1.2em 1.5em;
  margin: 0 auto 2em auto;
  max-width: 900px;
  font-size: 0.98em;
  color: #222;
}
.md-frontmatter-title {
  font-weight: bold;
  color: #7c3aed;
  font-size: 1.1em;
  margin-bottom: 0.7em;
  cursor: pointer;
  user-select: none;
}
.md-frontmatter-table {
  width: 100%;
  border-collapse: collapse;
  margin-top: 0.2em;
}
.md-frontmatter-key {
  color: #7c3aed;
  width: 120px;
  font-weight: 500;
  padding-right: 1em;
}
.md-frontmatter-table td {
  padding: 0.4em 0.7em;
  border-bottom: 1px solid #ede9fe;
}
.md-frontmatter-table tr:last-child td {
  border-bottom: none;
}
.md-frontmatter-collapsed .md-frontmatter-content {
  display: none;
}
.md-frontmatter-toggle {
  font-size: 0.8em;
  margin-left: 0.5em;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::CmarkRenderer;
    use crate::types::Protocol;
    use pretty_assertions::assert_eq;

    fn ctx(path: &str) -> PageContext {
        PageContext::new(path, Protocol::Https)
    }

    #[test]
    fn handle_rejects_non_markdown() {
        let err = RenderHandle::new(ctx("/index.html")).unwrap_err();
        assert!(matches!(err, ViewError::NotMarkdown { .. }));
    }

    #[test]
    fn handle_rejects_missing_renderer() {
        let mut handle = RenderHandle::new(ctx("/note.md")).unwrap();
        let err = handle.render("# Hi", None).unwrap_err();
        assert!(matches!(err, ViewError::RendererUnavailable));
        // Failure leaves the page unrendered; a retry with a renderer works.
        assert!(!handle.is_rendered());
        assert!(handle.render("# Hi", Some(&CmarkRenderer)).is_ok());
    }

    #[test]
    fn handle_rejects_reentry() {
        let mut handle = RenderHandle::new(ctx("/note.md")).unwrap();
        handle.render("# Hi", Some(&CmarkRenderer)).unwrap();
        assert!(handle.is_rendered());
        let err = handle.render("# Hi", Some(&CmarkRenderer)).unwrap_err();
        assert!(matches!(err, ViewError::AlreadyRendered));
    }

    #[test]
    fn page_html_contains_all_sections() {
        let mut handle = RenderHandle::new(ctx("/vault/My%20Note.md")).unwrap();
        let result = handle
            .render("---\ntitle: X\n---\n# Hi", Some(&CmarkRenderer))
            .unwrap();
        let page = result.doc.to_page_html();
        assert!(page.contains("md-main-title"));
        assert!(page.contains("My Note"));
        assert!(page.contains("md-frontmatter"));
        assert!(page.contains("markdown-preview-view"));
        assert!(page.contains("<h1>Hi</h1>"));
    }

    #[test]
    fn properties_panel_absent_without_front_matter() {
        let result = render_document("# Hi", &ctx("/note.md"), &CmarkRenderer);
        assert_eq!(result.doc.properties_html, "");
        assert!(!result.doc.to_page_html().contains("md-frontmatter"));
    }

    #[test]
    fn crlf_input_is_normalized() {
        let result = render_document(
            "---\r\ntitle: X\r\n---\r\n# Hi\r\n",
            &ctx("/note.md"),
            &CmarkRenderer,
        );
        assert!(result.doc.properties_html.contains("<td>X</td>"));
        assert!(result.doc.body_html.contains("<h1>Hi</h1>"));
    }

    #[test]
    fn viewer_css_covers_emitted_classes() {
        for class in [
            ".md-main-title",
            ".markdown-preview-view",
            ".md-img-block",
            ".callout-title",
            ".md-tag",
            ".md-highlight",
            ".md-blockref",
            ".md-frontmatter-key",
        ] {
            assert!(VIEWER_CSS.contains(class), "missing css for {class}");
        }
    }
}
