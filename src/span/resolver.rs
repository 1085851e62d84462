//! Quote resolution orchestrator
//!
//! Runs the matching tiers in fixed order (exact, normalized, fuzzy) and
//! turns the first hit into a `ResolvedSpan`. A miss on every tier is a
//! normal not-found result, never an error.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::strategy::{ExactStrategy, FuzzyStrategy, NormalizedStrategy, Strategy};
use super::types::{Document, ResolveError, ResolvedSpan};

/// Tunables for the resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Minimum fuzzy similarity (0-100) to accept a window (default: 75)
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Short window length as a multiple of the quote length (default: 0.8)
    #[serde(default = "default_short_window_ratio")]
    pub short_window_ratio: f64,

    /// Long window length as a multiple of the quote length (default: 1.2)
    #[serde(default = "default_long_window_ratio")]
    pub long_window_ratio: f64,

    /// Window step is quote length divided by this (default: 4)
    #[serde(default = "default_step_divisor")]
    pub step_divisor: usize,

    /// Tighten accepted fuzzy windows to the best-fitting edges (default: true)
    #[serde(default = "default_refine_boundaries")]
    pub refine_boundaries: bool,
}

fn default_threshold() -> f64 {
    75.0
}
fn default_short_window_ratio() -> f64 {
    0.8
}
fn default_long_window_ratio() -> f64 {
    1.2
}
fn default_step_divisor() -> usize {
    4
}
fn default_refine_boundaries() -> bool {
    true
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            short_window_ratio: default_short_window_ratio(),
            long_window_ratio: default_long_window_ratio(),
            step_divisor: default_step_divisor(),
            refine_boundaries: default_refine_boundaries(),
        }
    }
}

impl ResolverConfig {
    /// Check that every tunable is in range
    pub fn validate(&self) -> Result<(), ResolveError> {
        let invalid = |reason: String| Err(ResolveError::InvalidConfig { reason });

        if !(0.0..=100.0).contains(&self.threshold) {
            return invalid(format!("threshold must be within 0-100, got {}", self.threshold));
        }
        if !(self.short_window_ratio > 0.0 && self.short_window_ratio.is_finite()) {
            return invalid(format!(
                "short_window_ratio must be positive, got {}",
                self.short_window_ratio
            ));
        }
        if !(self.long_window_ratio > 0.0 && self.long_window_ratio.is_finite()) {
            return invalid(format!(
                "long_window_ratio must be positive, got {}",
                self.long_window_ratio
            ));
        }
        if self.step_divisor == 0 {
            return invalid("step_divisor must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Resolves quotes against documents
///
/// Holds no per-call state, so one resolver can be shared across threads.
pub struct Resolver {
    strategies: Vec<Box<dyn Strategy>>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::with_strategies(Self::default_strategies(ResolverConfig::default()))
    }
}

impl Resolver {
    /// Create a resolver with the standard tiers and the given tunables
    pub fn new(config: ResolverConfig) -> Result<Self, ResolveError> {
        config.validate()?;
        Ok(Self::with_strategies(Self::default_strategies(config)))
    }

    /// Create a resolver with a custom tier list, tried in order
    pub fn with_strategies(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    fn default_strategies(config: ResolverConfig) -> Vec<Box<dyn Strategy>> {
        vec![
            Box::new(ExactStrategy),
            Box::new(NormalizedStrategy),
            Box::new(FuzzyStrategy::new(config)),
        ]
    }

    /// Resolve one quote against a document
    ///
    /// An empty quote, or one with more characters than the document, is
    /// not found without consulting any tier.
    pub fn resolve(&self, document: &Document, quote: &str) -> ResolvedSpan {
        let quote_chars = quote.chars().count();
        if quote_chars == 0 || quote_chars > document.char_len() {
            debug!(
                quote_chars,
                doc_chars = document.char_len(),
                "Quote empty or longer than document"
            );
            return ResolvedSpan::not_found(quote);
        }

        for strategy in &self.strategies {
            if let Some(found) = strategy.locate(document, quote) {
                debug!(
                    method = strategy.method().as_str(),
                    start = found.range.start,
                    end = found.range.end,
                    score = found.score,
                    "Quote resolved"
                );
                return ResolvedSpan::found(document, found);
            }
        }

        debug!(quote_chars, "Quote unresolved");
        ResolvedSpan::not_found(quote)
    }

    /// Resolve one quote against raw document text
    ///
    /// Fails only when the document is empty.
    pub fn resolve_text(&self, document: &str, quote: &str) -> Result<ResolvedSpan, ResolveError> {
        let document = Document::new(document)?;
        Ok(self.resolve(&document, quote))
    }

    /// Resolve a batch of quotes in parallel, preserving input order
    pub fn resolve_all<S>(&self, document: &Document, quotes: &[S]) -> Vec<ResolvedSpan>
    where
        S: AsRef<str> + Sync,
    {
        quotes
            .par_iter()
            .map(|quote| self.resolve(document, quote.as_ref()))
            .collect()
    }
}

/// Resolve a quote with the default configuration
pub fn resolve(document: &str, quote: &str) -> Result<ResolvedSpan, ResolveError> {
    Resolver::default().resolve_text(document, quote)
}
