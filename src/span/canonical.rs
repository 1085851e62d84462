//! Whitespace canonicalization with a position map back to the original
//!
//! Matching happens on the canonical view; offsets always go back to the
//! original text through the translation table built alongside it.

use std::ops::Range;

/// Normalize whitespace: collapse runs of whitespace to a single space, trim
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical view of a string plus its position map
#[derive(Debug, Clone)]
pub struct Canonical {
    text: String,
    /// Original char index for every char of `text`
    positions: Vec<usize>,
}

impl Canonical {
    /// Build the normalized text and position map in one scan
    ///
    /// A collapsed space maps to the first non-whitespace char after its run,
    /// so whitespace is never a mapping target.
    pub fn new(original: &str) -> Self {
        let mut text = String::with_capacity(original.len());
        let mut positions = Vec::with_capacity(original.len());
        let mut pending_space = false;

        for (index, c) in original.chars().enumerate() {
            if c.is_whitespace() {
                pending_space = true;
                continue;
            }
            if pending_space && !text.is_empty() {
                text.push(' ');
                positions.push(index);
            }
            pending_space = false;
            text.push(c);
            positions.push(index);
        }

        Self { text, positions }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length of the normalized text in characters
    pub fn char_len(&self) -> usize {
        self.positions.len()
    }

    /// Original char index for a normalized char index
    ///
    /// The index counts every char of the normalized text, collapsed spaces
    /// included, so it is not the n-th non-whitespace char. A collapsed space
    /// maps to the first non-whitespace char after its run.
    pub fn map_back(&self, normalized_index: usize) -> Option<usize> {
        self.positions.get(normalized_index).copied()
    }

    /// Smallest original range covering a normalized range
    pub fn map_range(&self, normalized: Range<usize>) -> Option<Range<usize>> {
        if normalized.start >= normalized.end {
            return None;
        }
        let start = self.map_back(normalized.start)?;
        let last = self.map_back(normalized.end - 1)?;
        Some(start..last + 1)
    }

    /// Leftmost occurrence of an already-normalized needle, as a char range
    pub fn find(&self, needle: &str) -> Option<Range<usize>> {
        if needle.is_empty() {
            return None;
        }
        let byte_start = self.text.find(needle)?;
        let start = self.text[..byte_start].chars().count();
        Some(start..start + needle.chars().count())
    }
}

/// Original char index of the char at `normalized_index` in `normalize(original)`
///
/// `normalized_index` indexes chars of the normalized string, spaces included.
/// A collapsed space maps to the next non-whitespace char, so the result is
/// never a whitespace position. `None` when the index is past the end.
pub fn map_back(original: &str, normalized_index: usize) -> Option<usize> {
    Canonical::new(original).map_back(normalized_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_and_trims() {
        assert_eq!(normalize("  Hello \t\n world  "), "Hello world");
        assert_eq!(normalize("a\r\n\r\nb"), "a b");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn test_canonical_matches_normalize() {
        let inputs = ["Hello   world,\nhow are you?", "  lead", "trail\t", "x", "a \u{00A0} b"];
        for input in inputs {
            assert_eq!(Canonical::new(input).as_str(), normalize(input));
        }
    }

    #[test]
    fn test_map_back_skips_whitespace() {
        let original = "  ab   cd";
        let canonical = Canonical::new(original);
        assert_eq!(canonical.as_str(), "ab cd");

        assert_eq!(canonical.map_back(0), Some(2));
        assert_eq!(canonical.map_back(1), Some(3));
        // The collapsed space points at 'c'
        assert_eq!(canonical.map_back(2), Some(7));
        assert_eq!(canonical.map_back(3), Some(7));
        assert_eq!(canonical.map_back(4), Some(8));
        assert_eq!(canonical.map_back(5), None);
    }

    #[test]
    fn test_map_back_free_function() {
        assert_eq!(map_back("a\n\nb", 2), Some(3));
        assert_eq!(map_back("a\n\nb", 3), None);
        assert_eq!(map_back("", 0), None);
    }

    #[test]
    fn test_map_range_covers_collapsed_whitespace() {
        let original = "Hello   world,\nhow are you?";
        let canonical = Canonical::new(original);
        let found = canonical.find("Hello world, how").unwrap();
        assert_eq!(found, 0..16);

        let range = canonical.map_range(found).unwrap();
        let slice: String = original.chars().skip(range.start).take(range.len()).collect();
        assert_eq!(slice, "Hello   world,\nhow");
        assert_eq!(normalize(&slice), "Hello world, how");
    }

    #[test]
    fn test_find_reports_char_offsets() {
        let canonical = Canonical::new("über  alles da");
        assert_eq!(canonical.find("alles"), Some(5..10));
        assert_eq!(canonical.find(""), None);
        assert_eq!(canonical.find("missing"), None);
    }
}
