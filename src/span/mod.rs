//! Text-span resolution for model-supplied quotes
//!
//! Given a graded document and a quote produced by a grading model, find the
//! character range the quote refers to, even when the quote is not a verbatim
//! substring.
//!
//! # Design Principles
//!
//! - **Cheapest tier first**: exact, then whitespace-normalized, then fuzzy.
//! - **Literal output**: a resolved span's text is always a verbatim slice of
//!   the document, never the normalized or quoted text.
//! - **Honest unresolved**: below the similarity threshold the quote is
//!   echoed back with offsets of -1 and a note.
//! - **Char offsets**: offsets count Unicode scalar values, not bytes.
//!
//! # Example
//!
//! ```
//! use gradespan::span::{Document, Resolver};
//!
//! let document = Document::new("Hello   world,\nhow are you?").unwrap();
//! let span = Resolver::default().resolve(&document, "Hello world, how");
//!
//! assert_eq!(span.start, 0);
//! assert_eq!(span.text, "Hello   world,\nhow");
//! ```

pub mod canonical;
pub mod location;
pub mod resolver;
pub mod similarity;
pub mod strategy;
pub mod types;

pub use canonical::{map_back, normalize, Canonical};
pub use location::{compute_hash, extract_context, offset_to_line_col, LineCol};
pub use resolver::{resolve, Resolver, ResolverConfig};
pub use similarity::ratio;
pub use strategy::{ExactStrategy, FuzzyStrategy, NormalizedStrategy, Strategy};
pub use types::{
    Document, MatchMethod, ResolveError, ResolvedSpan, SpanMatch, NOT_FOUND, UNRESOLVED_NOTE,
};
