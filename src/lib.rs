//! gradespan - Locate model-quoted passages in graded documents
//!
//! A grading model returns scores, feedback and quotes for each rubric
//! criterion. The quotes are meant to be verbatim excerpts of the graded
//! document but often are not: whitespace drifts, case shifts, words get
//! paraphrased. This crate maps each quote back to a character range of the
//! document so a UI can highlight it.
//!
//! # Modules
//!
//! - `span`: Resolution engine (canonicalizer, similarity, tiered resolver)
//! - `grading`: Model reply parsing and highlight annotation
//! - `config`: Resolver tunables from config file and environment
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Locate quotes in an essay
//! gradespan resolve --document essay.txt "research shows that citations"
//!
//! # Annotate a grading model reply
//! gradespan annotate --document essay.txt --response reply.json
//! ```

pub mod cli;
pub mod config;
pub mod grading;
pub mod span;

// Re-export main types at crate root for convenience
pub use grading::{annotate, parse_response, GradingReport, GradingResponse};
pub use span::{Document, MatchMethod, ResolveError, ResolvedSpan, Resolver, ResolverConfig};
