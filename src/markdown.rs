//! Base markdown rendering seam.
//!
//! The pipeline only depends on a synchronous, deterministic
//! `string -> string` markdown engine. [`CmarkRenderer`] is the default,
//! backed by `pulldown-cmark` with tables, strikethrough and task lists
//! enabled.

/// A CommonMark-compatible markdown-to-HTML engine.
pub trait MarkdownRender {
    /// Render markdown to an HTML fragment. Pure and synchronous.
    fn render(&self, markdown: &str) -> String;
}

/// Default renderer backed by `pulldown-cmark`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmarkRenderer;

impl MarkdownRender for CmarkRenderer {
    fn render(&self, markdown: &str) -> String {
        let mut options = pulldown_cmark::Options::empty();
        options.insert(pulldown_cmark::Options::ENABLE_TABLES);
        options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
        options.insert(pulldown_cmark::Options::ENABLE_TASKLISTS);
        let parser = pulldown_cmark::Parser::new_ext(markdown, options);
        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, parser);
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_and_lists() {
        let html = CmarkRenderer.render("# Hi\n\n- item\n");
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("<li>item</li>"));
    }

    #[test]
    fn tables_are_enabled() {
        let html = CmarkRenderer.render("| a | b |\n| --- | --- |\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn task_lists_are_enabled() {
        let html = CmarkRenderer.render("- [x] done\n- [ ] open\n");
        assert!(html.contains("type=\"checkbox\""));
    }

    #[test]
    fn raw_html_blocks_pass_through() {
        let html = CmarkRenderer.render("<div class=\"md-img-block\"><img src=\"x\" /></div>\n");
        assert!(html.contains("md-img-block"));
    }
}
