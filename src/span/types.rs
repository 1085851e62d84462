//! Document and span data types
//!
//! These types are the resolver's inputs and its serialized output contract.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Offset reported for both ends of an unresolved span
pub const NOT_FOUND: i64 = -1;

/// Note attached to every unresolved span
pub const UNRESOLVED_NOTE: &str = "Automatic location failed: quoted text not found in document";

/// Errors for structural misuse of the resolver
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Invalid resolver configuration: {reason}")]
    InvalidConfig { reason: String },
}

/// An immutable graded document
///
/// Keeps the original text together with a char-to-byte table so that
/// character offsets can be sliced without rescanning.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    chars: Vec<char>,
    /// Byte offset of every char, plus `text.len()` as a final entry
    byte_offsets: Vec<usize>,
}

impl Document {
    /// Create a document, rejecting empty text
    pub fn new(text: impl Into<String>) -> Result<Self, ResolveError> {
        let text = text.into();
        if text.is_empty() {
            return Err(ResolveError::InvalidInput {
                reason: "document is empty".to_string(),
            });
        }

        let mut chars = Vec::with_capacity(text.len());
        let mut byte_offsets = Vec::with_capacity(text.len() + 1);
        for (offset, c) in text.char_indices() {
            chars.push(c);
            byte_offsets.push(offset);
        }
        byte_offsets.push(text.len());

        Ok(Self {
            text,
            chars,
            byte_offsets,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.chars.len()
    }

    /// Slice by character range
    ///
    /// # Panics
    /// Panics if the range is out of bounds, like `str` slicing.
    pub fn slice(&self, range: Range<usize>) -> &str {
        &self.text[self.byte_offsets[range.start]..self.byte_offsets[range.end]]
    }

    /// Convert a byte offset on a char boundary into a character offset
    pub fn char_index(&self, byte_offset: usize) -> Option<usize> {
        self.byte_offsets.binary_search(&byte_offset).ok()
    }
}

/// Which tier produced a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Verbatim substring
    Exact,
    /// Substring after whitespace normalization
    Normalized,
    /// Best sliding window above the similarity threshold
    Fuzzy,
    /// No tier succeeded
    None,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::Exact => "exact",
            MatchMethod::Normalized => "normalized",
            MatchMethod::Fuzzy => "fuzzy",
            MatchMethod::None => "none",
        }
    }
}

/// A located character range produced by a single strategy
#[derive(Debug, Clone, PartialEq)]
pub struct SpanMatch {
    pub range: Range<usize>,
    pub method: MatchMethod,
    /// Similarity on the 0-100 scale
    pub score: f64,
}

/// Outcome of resolving one quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSpan {
    /// Matched document text, or the original quote when unresolved
    pub text: String,
    /// Character offset of the first matched char, -1 when unresolved
    pub start: i64,
    /// Character offset one past the last matched char, -1 when unresolved
    pub end: i64,
    pub method: MatchMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ResolvedSpan {
    /// Build a resolved span from a strategy match
    pub fn found(document: &Document, found: SpanMatch) -> Self {
        Self {
            text: document.slice(found.range.clone()).to_string(),
            start: found.range.start as i64,
            end: found.range.end as i64,
            method: found.method,
            score: Some(found.score),
            note: None,
        }
    }

    /// Build the sentinel span that echoes an unmatched quote
    pub fn not_found(quote: &str) -> Self {
        Self {
            text: quote.to_string(),
            start: NOT_FOUND,
            end: NOT_FOUND,
            method: MatchMethod::None,
            score: None,
            note: Some(UNRESOLVED_NOTE.to_string()),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.start != NOT_FOUND
    }

    /// Character range, if resolved
    pub fn range(&self) -> Option<Range<usize>> {
        if self.is_resolved() {
            Some(self.start as usize..self.end as usize)
        } else {
            None
        }
    }
}
