//! Case-insensitive string similarity on a 0-100 scale
//!
//! The ratio is the normalized indel distance: `200 * LCS / (|a| + |b|)`.
//! Identical strings score 100, strings with no common characters score 0.

/// Lowercase a single char without changing the char count
pub fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Case-folded chars of a string, one per input char
pub fn fold(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

/// Similarity ratio between two strings, ignoring case
pub fn ratio(a: &str, b: &str) -> f64 {
    ratio_chars(&fold(a), &fold(b))
}

/// Similarity ratio between two already-folded char slices
pub fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Length of the longest common subsequence, single-row DP
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    // Iterate the longer side in the outer loop to keep the row short
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut row = vec![0usize; inner.len() + 1];
    for &x in outer {
        let mut diagonal = 0;
        for (j, &y) in inner.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if x == y {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[inner.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings() {
        assert_eq!(ratio("credibility", "credibility"), 100.0);
        assert_eq!(ratio("", ""), 100.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(ratio("Research Shows", "research shows"), 100.0);
    }

    #[test]
    fn test_disjoint_strings() {
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert_eq!(ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_known_ratio() {
        // LCS("kitten", "sitting") = 4 ("ittn")
        let score = ratio("kitten", "sitting");
        assert!((score - 800.0 / 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_symmetry() {
        let a = "research demonstrates citations";
        let b = "Research shows that citations";
        assert_eq!(ratio(a, b), ratio(b, a));
    }

    #[test]
    fn test_fold_keeps_length() {
        // 'İ' lowercases to two chars; folding keeps one per input char
        assert_eq!(fold("İx").len(), 2);
    }
}
