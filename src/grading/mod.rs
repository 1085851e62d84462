//! Boundary with the grading model
//!
//! Parses the model's JSON reply into criterion records and annotates each
//! quoted highlight with the span it refers to in the graded document.

pub mod annotate;
pub mod response;

pub use annotate::{annotate, calculate_total_score, GradingReport};
pub use response::{parse_response, CriterionResult, GradingError, GradingResponse, Highlight};
