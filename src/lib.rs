//! `vault-view` — rendering pipeline for Obsidian-flavored markdown.
//!
//! Converts the dialect extensions used by Obsidian-style note vaults —
//! front matter properties, `![[image]]` wikilinks, `[[internal links]]`,
//! `> [!kind]` callouts, `#tags`, `==highlights==` and `^block-refs` — into
//! HTML a browser can display. The pipeline runs once per loaded document:
//! each stage consumes the previous stage's output, the base markdown
//! render goes through a pluggable [`MarkdownRender`] engine, and the result
//! is assembled into a [`RenderedDocument`] that replaces the page content
//! wholesale.
//!
//! # Quick start
//!
//! ```
//! use vault_view::{PageContext, Protocol};
//!
//! let ctx = PageContext::new("/vault/My%20Note.md", Protocol::Https);
//! let result = vault_view::render("---\ntitle: Hello\n---\n# Hi\n", &ctx);
//! assert_eq!(result.doc.title, "My Note");
//! assert!(result.doc.body_html.contains("<h1>Hi</h1>"));
//! ```

pub mod callouts;
pub mod enhance;
pub mod error;
pub mod frontmatter;
pub mod images;
pub mod markdown;
pub mod page;
pub mod preprocess;
pub mod properties;
pub mod types;

pub use error::{Diagnostic, Severity, ViewError};
pub use markdown::{CmarkRenderer, MarkdownRender};
pub use page::{RenderHandle, RenderResult, VIEWER_CSS, render_document};
pub use properties::PanelState;
pub use types::*;

/// Render `source` with the default `pulldown-cmark` engine.
///
/// Convenience wrapper over [`render_document`] for hosts that do not bring
/// their own renderer.
pub fn render(source: &str, ctx: &PageContext) -> RenderResult {
    render_document(source, ctx, &CmarkRenderer)
}
