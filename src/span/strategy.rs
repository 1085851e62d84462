//! Matching tiers used by the resolver
//!
//! Each strategy is a pure lookup returning an optional match. The resolver
//! tries them in order and stops at the first hit:
//!
//! 1. `ExactStrategy` - verbatim substring
//! 2. `NormalizedStrategy` - substring after whitespace normalization
//! 3. `FuzzyStrategy` - best sliding window above a similarity threshold

use std::ops::Range;

use rayon::prelude::*;

use super::canonical::{normalize, Canonical};
use super::resolver::ResolverConfig;
use super::similarity::{fold, fold_char, ratio_chars};
use super::types::{Document, MatchMethod, SpanMatch};

/// A single matching tier
pub trait Strategy: Send + Sync {
    /// Method reported for spans found by this tier
    fn method(&self) -> MatchMethod;

    /// Locate the quote in the document, if this tier can
    fn locate(&self, document: &Document, quote: &str) -> Option<SpanMatch>;
}

/// Leftmost verbatim occurrence
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactStrategy;

impl Strategy for ExactStrategy {
    fn method(&self) -> MatchMethod {
        MatchMethod::Exact
    }

    fn locate(&self, document: &Document, quote: &str) -> Option<SpanMatch> {
        if quote.is_empty() {
            return None;
        }
        let byte_start = document.as_str().find(quote)?;
        let start = document.char_index(byte_start)?;

        Some(SpanMatch {
            range: start..start + quote.chars().count(),
            method: MatchMethod::Exact,
            score: 100.0,
        })
    }
}

/// Leftmost occurrence after collapsing whitespace on both sides
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedStrategy;

impl Strategy for NormalizedStrategy {
    fn method(&self) -> MatchMethod {
        MatchMethod::Normalized
    }

    fn locate(&self, document: &Document, quote: &str) -> Option<SpanMatch> {
        let needle = normalize(quote);
        if needle.is_empty() {
            return None;
        }

        let canonical = Canonical::new(document.as_str());
        let found = canonical.find(&needle)?;
        let range = canonical.map_range(found)?;

        Some(SpanMatch {
            range,
            method: MatchMethod::Normalized,
            score: 100.0,
        })
    }
}

/// Best-scoring sliding window over the document
#[derive(Debug, Clone)]
pub struct FuzzyStrategy {
    config: ResolverConfig,
}

impl FuzzyStrategy {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Distance between consecutive window starts
    fn step(&self, quote_len: usize) -> usize {
        (quote_len / self.config.step_divisor).max(1)
    }

    /// Candidate window lengths, shortest first, without duplicates
    ///
    /// Every length lies in `1..=doc_len`, whatever the configured ratios.
    fn window_lengths(&self, quote_len: usize, doc_len: usize) -> Vec<usize> {
        let scaled = |ratio: f64| {
            let len = (quote_len as f64 * ratio).round().min(doc_len as f64);
            (len as usize).max(1)
        };

        let mut lengths = vec![
            scaled(self.config.short_window_ratio),
            quote_len.min(doc_len),
            scaled(self.config.long_window_ratio),
        ];
        lengths.sort_unstable();
        lengths.dedup();
        lengths
    }

    /// All candidate windows in tie-break order: leftmost, then shortest
    fn candidates(&self, doc_len: usize, quote_len: usize) -> Vec<Range<usize>> {
        let step = self.step(quote_len);
        let lengths = self.window_lengths(quote_len, doc_len);
        let last_start = doc_len - quote_len;

        let mut starts: Vec<usize> = (0..=last_start).step_by(step).collect();
        if starts.last() != Some(&last_start) {
            starts.push(last_start);
        }

        starts
            .into_iter()
            .flat_map(|start| {
                lengths
                    .iter()
                    .map(move |&len| start..start.saturating_add(len).min(doc_len))
            })
            .collect()
    }

    /// Nudge the edges of an accepted window toward a better fit
    ///
    /// Start first, then end, each within one step; only strict improvements
    /// are kept. Whitespace at either edge is trimmed afterwards, unless that
    /// would drop the score below the threshold.
    fn refine(
        &self,
        document: &Document,
        haystack: &[char],
        needle: &[char],
        window: Range<usize>,
        score: f64,
    ) -> (Range<usize>, f64) {
        let step = self.step(needle.len());
        let (mut start, mut end, mut best) = (window.start, window.end, score);

        let fixed_end = end;
        for candidate in start.saturating_sub(step)..=(start + step).min(fixed_end - 1) {
            let score = ratio_chars(&haystack[candidate..fixed_end], needle);
            if score > best {
                best = score;
                start = candidate;
            }
        }

        let lower = end.saturating_sub(step).max(start + 1);
        let upper = (end + step).min(haystack.len());
        for candidate in lower..=upper {
            let score = ratio_chars(&haystack[start..candidate], needle);
            if score > best {
                best = score;
                end = candidate;
            }
        }

        let chars = document.chars();
        let (mut trim_start, mut trim_end) = (start, end);
        while trim_start < trim_end && chars[trim_start].is_whitespace() {
            trim_start += 1;
        }
        while trim_end > trim_start && chars[trim_end - 1].is_whitespace() {
            trim_end -= 1;
        }
        if trim_start == trim_end {
            return (start..end, best);
        }

        let trimmed = ratio_chars(&haystack[trim_start..trim_end], needle);
        if trimmed < self.config.threshold {
            return (start..end, best);
        }
        (trim_start..trim_end, trimmed)
    }
}

impl Strategy for FuzzyStrategy {
    fn method(&self) -> MatchMethod {
        MatchMethod::Fuzzy
    }

    fn locate(&self, document: &Document, quote: &str) -> Option<SpanMatch> {
        let needle = fold(quote);
        let doc_len = document.char_len();
        if needle.is_empty() || needle.len() > doc_len {
            return None;
        }

        let haystack: Vec<char> = document.chars().iter().copied().map(fold_char).collect();
        let candidates = self.candidates(doc_len, needle.len());

        // Score in parallel, select sequentially so ties stay deterministic
        let scores: Vec<f64> = candidates
            .par_iter()
            .map(|window| ratio_chars(&haystack[window.clone()], &needle))
            .collect();

        let (index, score) = select_best(&scores)?;
        if score < self.config.threshold {
            tracing::debug!(
                best_score = score,
                threshold = self.config.threshold,
                "No window reached threshold"
            );
            return None;
        }

        let window = candidates[index].clone();
        let (range, score) = if self.config.refine_boundaries {
            self.refine(document, &haystack, &needle, window, score)
        } else {
            (window, score)
        };

        Some(SpanMatch {
            range,
            method: MatchMethod::Fuzzy,
            score,
        })
    }
}

/// Index and value of the first strictly-highest score
///
/// Candidates arrive leftmost first, then shortest first, so an earlier index
/// wins every tie.
fn select_best(scores: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &score) in scores.iter().enumerate() {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((index, score)),
        }
    }
    best
}
