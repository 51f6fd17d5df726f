//! Dialect preprocessing.
//!
//! Ordered text substitutions applied after image rewriting and before
//! callout rewriting:
//!
//! 1. insert a blank line between an image block's closing `</div>` and an
//!    immediately following list item, so the base renderer starts a new
//!    block;
//! 2. convert `[[page#section|alias]]` internal links to standard links;
//! 3. normalize checklist markers (lowercase the `x`).
//!
//! Every substitution is stable under re-application: running the pass on
//! its own output changes nothing.

/// Apply all dialect substitutions in order.
pub fn preprocess(body: &str) -> String {
    let body = separate_lists_after_images(body);
    let body = rewrite_internal_links(&body);
    normalize_checklists(&body)
}

/// Insert a blank line between `</div>` at end-of-line and a `- ` list item
/// on the next line.
fn separate_lists_after_images(body: &str) -> String {
    let lines: Vec<&str> = body.split('\n').collect();
    let mut out: Vec<&str> = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        out.push(line);
        if line.ends_with("</div>")
            && lines.get(i + 1).is_some_and(|next| next.starts_with("- "))
        {
            out.push("");
        }
    }

    out.join("\n")
}

/// Convert `[[page]]`, `[[page#section]]`, `[[page|alias]]` and
/// `[[page#section|alias]]` into `[text](target)` links.
///
/// Link text is the alias when given, else the page name. The target is the
/// page with spaces percent-encoded, the optional `#section` fragment, and a
/// trailing `.md`.
fn rewrite_internal_links(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(start) = rest.find("[[") {
        match parse_internal_link(&rest[start + 2..]) {
            Some(link) => {
                out.push_str(&rest[..start]);
                let text = link.alias.unwrap_or(link.page);
                let target = link.page.replace(' ', "%20");
                let section = link.section.unwrap_or("");
                out.push_str(&format!("[{text}]({target}{section}.md)"));
                rest = &rest[start + 2 + link.consumed..];
            }
            None => {
                out.push_str(&rest[..start + 2]);
                rest = &rest[start + 2..];
            }
        }
    }

    out.push_str(rest);
    out
}

struct InternalLink<'a> {
    page: &'a str,
    section: Option<&'a str>,
    alias: Option<&'a str>,
    /// Bytes consumed after the opening `[[`, closing `]]` included.
    consumed: usize,
}

/// Parse the inside of a wikilink starting right after `[[`.
///
/// The page name may not contain `]`, `|` or `#`; the section may not
/// contain `]` or `|`; the alias may not contain `]`.
fn parse_internal_link<'a>(input: &'a str) -> Option<InternalLink<'a>> {
    let page_end = input.find(['#', '|', ']'])?;
    if page_end == 0 {
        return None;
    }
    let page = &input[..page_end];
    let mut pos = page_end;

    let section = if input[pos..].starts_with('#') {
        let rest = &input[pos + 1..];
        let end = rest.find(['|', ']'])?;
        if end == 0 {
            return None;
        }
        let section = &input[pos..pos + 1 + end];
        pos += 1 + end;
        Some(section)
    } else {
        None
    };

    let alias = if input[pos..].starts_with('|') {
        let rest = &input[pos + 1..];
        let end = rest.find(']')?;
        if end == 0 {
            return None;
        }
        let alias = &input[pos + 1..pos + 1 + end];
        pos += 1 + end;
        Some(alias)
    } else {
        None
    };

    if !input[pos..].starts_with("]]") {
        return None;
    }

    Some(InternalLink {
        page,
        section,
        alias,
        consumed: pos + 2,
    })
}

/// Normalize checklist markers at column 0: `- [ ]` stays as-is, `- [x]` and
/// `- [X]` become `- [x]`.
fn normalize_checklists(body: &str) -> String {
    let lines: Vec<String> = body
        .split('\n')
        .map(|line| {
            if let Some(rest) = line.strip_prefix("- [X]") {
                format!("- [x]{rest}")
            } else {
                line.to_string()
            }
        })
        .collect();
    lines.join("\n")
}
