//! Locates the JSON object embedded in backend text.

use crate::normalize::NormalizeError;

const FENCE: &str = "```";

/// Returns the substring most likely to be a single JSON object.
///
/// Prefers the first fenced code block whose body is a `{...}` object, then
/// falls back to the widest span from the first `{` to the last `}`.
pub fn extract_json_span(text: &str) -> Result<&str, NormalizeError> {
    fenced_object(text)
        .or_else(|| widest_brace_span(text))
        .ok_or(NormalizeError::Extraction)
}

fn fenced_object(text: &str) -> Option<&str> {
    let mut rest = text;
    while let Some(open) = rest.find(FENCE) {
        let after_open = &rest[open + FENCE.len()..];
        let close = after_open.find(FENCE)?;
        let candidate = strip_info_string(&after_open[..close]).trim();
        if candidate.starts_with('{') && candidate.ends_with('}') {
            return Some(candidate);
        }
        rest = &after_open[close + FENCE.len()..];
    }
    None
}

/// Drops a leading language tag (`json`, `JSON`, `json5`, ...) glued to the
/// opening fence. Never looks past the closing fence.
fn strip_info_string(block: &str) -> &str {
    let tag_len = block
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(block.len());
    &block[tag_len..]
}

fn widest_brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
