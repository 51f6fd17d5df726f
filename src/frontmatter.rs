//! Front-matter extraction.
//!
//! Recognizes a `---` delimited block anchored at the very start of the
//! document and parses its lines into ordered key/value pairs. This is a
//! deliberate subset of YAML: `key: value`, `key:` followed by `- item`
//! continuation lines, and inline `[a, b, c]` lists. Anything else is
//! silently ignored. Extraction is fail-soft — malformed input degrades to
//! "no front matter" and the body is rendered in full.

use crate::error::Diagnostic;
use crate::types::{FieldValue, FrontMatter};

/// Split a leading front matter block off `source`.
///
/// Returns the parsed block (if present) and the body with the block removed
/// and trimmed. `source` is expected to be CRLF-normalized by the caller.
pub fn extract(source: &str, diagnostics: &mut Vec<Diagnostic>) -> (Option<FrontMatter>, String) {
    let lines: Vec<&str> = source.split('\n').collect();

    if lines.first().copied() != Some("---") {
        return (None, source.trim().to_string());
    }

    // Find the closing `---`.
    let mut end_idx = None;
    for (i, line) in lines.iter().enumerate().skip(1) {
        if *line == "---" {
            end_idx = Some(i);
            break;
        }
    }

    let end_idx = match end_idx {
        Some(i) => i,
        None => {
            diagnostics.push(Diagnostic::warning(
                "front matter opened with `---` but never closed",
                "W001",
            ));
            return (None, source.trim().to_string());
        }
    };

    let fields = parse_fields(&lines[1..end_idx]);
    let raw_block: String = lines[..=end_idx].join("\n");
    let body = source[raw_block.len()..].trim().to_string();

    let front_matter = FrontMatter { fields, raw_block };
    tracing::debug!(fields = front_matter.fields.len(), "front matter extracted");
    (Some(front_matter), body)
}

/// Parse the lines between the delimiters into ordered fields.
fn parse_fields(lines: &[&str]) -> Vec<(String, FieldValue)> {
    let mut fields: Vec<(String, FieldValue)> = Vec::new();
    let mut current_key: Option<String> = None;

    for line in lines {
        if let Some(item) = continuation_item(line) {
            if let Some(key) = &current_key {
                push_list_item(&mut fields, key, item);
            }
            continue;
        }

        if let Some((key, value)) = key_value(line) {
            let parsed = if value.starts_with('[') {
                FieldValue::List(split_inline_list(value))
            } else if !value.is_empty() {
                FieldValue::Scalar(strip_quotes(value).to_string())
            } else {
                // Empty value anticipates `- item` continuation lines.
                FieldValue::List(Vec::new())
            };
            upsert(&mut fields, key, parsed);
            current_key = Some(key.to_string());
        }
        // Lines matching neither pattern are ignored.
    }

    fields
}

/// Match a `- item` continuation line (leading whitespace allowed) and
/// return the item with surrounding quotes stripped.
fn continuation_item<'a>(line: &'a str) -> Option<&'a str> {
    let rest = line.trim_start().strip_prefix("- ")?;
    Some(strip_quotes(rest))
}

/// Match a `key: value` line at column 0. Keys are alphanumeric plus
/// hyphen/underscore; the value is the remainder with leading space trimmed.
fn key_value<'a>(line: &'a str) -> Option<(&'a str, &'a str)> {
    let colon = line.find(':')?;
    let key = &line[..colon];
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return None;
    }
    Some((key, line[colon + 1..].trim_start()))
}

/// Split an inline `[a, "b", c]` list: brackets and quotes dropped wholesale,
/// items comma-split, trimmed, empties removed. Commas inside quoted items
/// are not handled; the consumed syntax does not use them.
fn split_inline_list(value: &str) -> Vec<String> {
    let cleaned: String = value
        .chars()
        .filter(|&c| c != '[' && c != ']' && c != '"')
        .collect();
    cleaned
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip one leading and one trailing `"`, independently.
fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

/// Set `key` to `value`, overwriting in place if the key already exists.
fn upsert(fields: &mut Vec<(String, FieldValue)>, key: &str, value: FieldValue) {
    match fields.iter_mut().find(|(k, _)| k == key) {
        Some((_, v)) => *v = value,
        None => fields.push((key.to_string(), value)),
    }
}

/// Append an item to `key`'s list. A prior scalar is promoted to a list
/// keeping the scalar as the first element.
fn push_list_item(fields: &mut Vec<(String, FieldValue)>, key: &str, item: &str) {
    match fields.iter_mut().find(|(k, _)| k == key) {
        Some((_, FieldValue::List(items))) => items.push(item.to_string()),
        Some((_, value)) => {
            if let FieldValue::Scalar(prev) = value {
                let promoted = FieldValue::List(vec![prev.clone(), item.to_string()]);
                *value = promoted;
            }
        }
        None => {
            fields.push((key.to_string(), FieldValue::List(vec![item.to_string()])));
        }
    }
}
