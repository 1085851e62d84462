//! Attach resolved spans to a model reply
//!
//! Every highlight of every criterion is resolved independently against the
//! same document; unresolved quotes never affect their siblings.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::response::{CriterionResult, GradingResponse, Highlight};
use crate::span::{compute_hash, Document, ResolvedSpan, Resolver};

/// A model reply with located highlights and a recomputed total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingReport {
    pub criteria_results: Vec<CriterionResult>,
    /// Mean of the criterion scores
    pub total_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_feedback: Option<String>,
    /// Digest of the text the offsets refer to
    pub document_sha256: String,
    pub resolved_count: usize,
    pub unresolved_count: usize,
    /// RFC 3339 timestamp of annotation
    pub annotated_at: String,
}

/// Arithmetic mean of criterion scores, 0.0 when there are none
pub fn calculate_total_score(results: &[CriterionResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64
}

/// Overwrite a highlight with its resolution
fn apply(highlight: &mut Highlight, span: ResolvedSpan) {
    highlight.text = span.text;
    highlight.start = Some(span.start);
    highlight.end = Some(span.end);
    highlight.method = Some(span.method);
    highlight.score = span.score;
    highlight.note = span.note;
}

/// Resolve every highlight of a reply against the graded document
pub fn annotate(response: GradingResponse, document: &Document, resolver: &Resolver) -> GradingReport {
    let mut criteria_results = response.criteria_results;

    let quotes: Vec<String> = criteria_results
        .iter()
        .flat_map(|result| result.highlights.iter().map(|h| h.text.clone()))
        .collect();
    let mut spans = resolver.resolve_all(document, &quotes).into_iter();

    let mut resolved_count = 0;
    let mut unresolved_count = 0;
    for highlight in criteria_results
        .iter_mut()
        .flat_map(|result| result.highlights.iter_mut())
    {
        let Some(span) = spans.next() else { break };
        if span.is_resolved() {
            resolved_count += 1;
        } else {
            unresolved_count += 1;
        }
        apply(highlight, span);
    }

    let total_score = calculate_total_score(&criteria_results);
    info!(
        criteria = criteria_results.len(),
        resolved = resolved_count,
        unresolved = unresolved_count,
        total_score,
        "Annotated grading reply"
    );

    GradingReport {
        criteria_results,
        total_score,
        overall_feedback: response.overall_feedback,
        document_sha256: compute_hash(document.as_str().as_bytes()),
        resolved_count,
        unresolved_count,
        annotated_at: Utc::now().to_rfc3339(),
    }
}
