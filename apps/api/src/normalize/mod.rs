//! Response normalization: turns raw generative backend text into a trusted
//! `ResumeDocument`.
//!
//! Flow: extract_json_span → serde_json parse → recursive clean → work item
//! shape filter → lenient reassembly.

pub mod extract;
pub mod sanitize;

use thiserror::Error;

pub use extract::extract_json_span;
pub use sanitize::{sanitize_resume, SanitizeReport, Sanitized};

/// Longest slice of offending text kept in error messages.
const SNIPPET_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("no JSON object found in response text")]
    Extraction,

    #[error("response JSON is malformed: {source} (near: {})", snippet(.text))]
    MalformedJson {
        text: String,
        #[source]
        source: serde_json::Error,
    },
}

fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_CHARS).collect()
}

/// Runs the full pipeline over raw backend text.
pub fn normalize_response(raw: &str) -> Result<Sanitized, NormalizeError> {
    let span = extract_json_span(raw)?;
    sanitize_resume(span)
}
