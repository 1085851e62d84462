//! Display helpers for resolved spans
//!
//! Converting character offsets to line/column positions, extracting context
//! around a span, and hashing document text. All offsets are char offsets.

use sha2::{Digest, Sha256};

use super::types::Document;

/// Line and column position (1-indexed for editor compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    pub line: usize,
    pub col: usize,
}

/// Convert a character offset to a 1-indexed line/column position
///
/// Offsets past the end are clamped to the end of the document.
pub fn offset_to_line_col(document: &Document, offset: usize) -> LineCol {
    let prefix = &document.chars()[..offset.min(document.char_len())];

    let line = prefix.iter().filter(|&&c| c == '\n').count() + 1;
    let line_start = prefix
        .iter()
        .rposition(|&c| c == '\n')
        .map(|i| i + 1)
        .unwrap_or(0);

    LineCol {
        line,
        col: prefix.len() - line_start + 1,
    }
}

/// Extract a span with surrounding context
///
/// Returns roughly `window` characters in total, with `...` on a side that
/// was truncated. Line breaks are flattened to spaces.
pub fn extract_context(document: &Document, start: usize, end: usize, window: usize) -> String {
    let len = document.char_len();
    let end = end.min(len);
    let start = start.min(end);

    let remaining = window.saturating_sub(end - start);
    let each_side = remaining / 2;

    let context_start = start.saturating_sub(each_side);
    let context_end = (end + each_side).min(len);

    let prefix = if context_start > 0 { "..." } else { "" };
    let suffix = if context_end < len { "..." } else { "" };
    let context = document
        .slice(context_start..context_end)
        .replace(['\r', '\n'], " ");

    format!("{}{}{}", prefix, context, suffix)
}

/// Compute SHA256 hash of a byte slice, returning hex string with prefix
pub fn compute_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    format!("sha256:{}", hex::encode(result))
}
