use serde::{Deserialize, Serialize};

/// Errors that abort a render attempt.
///
/// Everything recoverable (malformed front matter, stray wikilink syntax) is
/// reported as a [`Diagnostic`] instead and the pipeline keeps going.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ViewError {
    /// The host did not supply a base markdown renderer. Fatal: the page is
    /// left unrendered rather than partially corrupted.
    #[error("no base markdown renderer available")]
    RendererUnavailable,

    /// The resource is not identified as markdown by content type or
    /// extension.
    #[error("resource '{path}' is not markdown (content type: {content_type:?})")]
    NotMarkdown {
        path: String,
        content_type: Option<String>,
    },

    /// The render handle has already produced a document. Re-running the
    /// pipeline on rendered HTML would corrupt it, so re-entry is rejected.
    #[error("document has already been rendered")]
    AlreadyRendered,
}

/// A non-fatal finding produced while rendering.
///
/// Diagnostics never stop the pipeline: the worst case is raw or
/// partially-raw syntax showing through in the output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>, code: &str) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            code: Some(code.to_string()),
        }
    }

    pub fn info(message: impl Into<String>, code: &str) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
            code: Some(code.to_string()),
        }
    }
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}
