//! Property-based tests using proptest.
//!
//! The pipeline must never panic on arbitrary input, and the text rewrite
//! stages (images, dialect preprocessing, callouts) must be stable when
//! re-applied to their own output.

use proptest::prelude::*;
use vault_view::{CmarkRenderer, PageContext, Protocol};

fn rewrite_stages(body: &str) -> String {
    let b = vault_view::images::rewrite_images(body, "/vault", false);
    let b = vault_view::preprocess::preprocess(&b);
    vault_view::callouts::rewrite_callouts(&b, &CmarkRenderer)
}

proptest! {
    /// Any random string fed to the full pipeline should never panic.
    #[test]
    fn any_document_no_panic(input in "\\PC{0,500}") {
        let ctx = PageContext::new("/vault/note.md", Protocol::Https);
        let result = vault_view::render(&input, &ctx);
        let _ = result.doc.body_html.len();
        let _ = result.diagnostics.len();
    }

    /// Local-file contexts exercise the file:// conversion path; still no panic.
    #[test]
    fn any_document_no_panic_local(input in "\\PC{0,300}") {
        let ctx = PageContext::new("/vault/note.md", Protocol::File);
        let result = vault_view::render(&input, &ctx);
        let _ = result.doc.body_html.len();
    }

    /// Stages 3-5 must not further mutate already-converted syntax.
    #[test]
    fn rewrite_stages_stable(
        page in "[A-Za-z][A-Za-z ]{0,15}[A-Za-z]",
        alias in "[A-Za-z]{1,10}",
        img in "[a-z]{1,8}",
    ) {
        let body = format!(
            "![[{img}.png|20x10]]\n- item\n\n[[{page}|{alias}]]\n\n> [!note] T\n> body\n\n- [X] task\n"
        );
        let once = rewrite_stages(&body);
        let twice = rewrite_stages(&once);
        prop_assert_eq!(&once, &twice);
    }

    /// Well-formed scalar front matter round-trips: the value comes back
    /// with quotes stripped, and the key lands in the properties panel.
    #[test]
    fn front_matter_scalar_roundtrip(
        key in "[a-z][a-z0-9-]{0,10}",
        value in "[A-Za-z0-9][A-Za-z0-9 ]{0,18}[A-Za-z0-9]",
    ) {
        let source = format!("---\n{key}: \"{value}\"\n---\nBody\n");
        let mut diagnostics = Vec::new();
        let (fm, body) = vault_view::frontmatter::extract(&source, &mut diagnostics);
        let fm = fm.expect("front matter should parse");
        prop_assert_eq!(
            fm.get(&key),
            Some(&vault_view::FieldValue::Scalar(value))
        );
        prop_assert_eq!(body.as_str(), "Body");
    }

    /// Documents without a leading `---` pass their body through untouched
    /// (modulo trimming).
    #[test]
    fn no_front_matter_body_is_original(input in "[A-Za-z0-9 \\n.,!#]{0,200}") {
        prop_assume!(!input.starts_with("---"));
        let mut diagnostics = Vec::new();
        let (fm, body) = vault_view::frontmatter::extract(&input, &mut diagnostics);
        prop_assert!(fm.is_none());
        prop_assert_eq!(body, input.trim().to_string());
    }
}
