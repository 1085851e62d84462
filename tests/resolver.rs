//! Resolver Integration Tests
//!
//! Tests for tier behavior, offsets and the not-found contract.

use gradespan::span::{
    map_back, normalize, resolve, Canonical, Document, MatchMethod, ResolveError, Resolver,
    ResolverConfig, NOT_FOUND,
};

const ESSAY: &str = "
    This essay demonstrates the importance of structured writing and proper citation formatting.
    Research shows that citations improve credibility (Smith, 2019).

    Good essays also have clear structure with well-organized paragraphs.
    ";

fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end - start).collect()
}

#[test]
fn test_exact_match_identity() {
    let document = Document::new(ESSAY).unwrap();
    let resolver = Resolver::default();

    let quotes = [
        "This essay demonstrates the importance of structured writing",
        "(Smith, 2019)",
        "s",
        "paragraphs.",
        "\n    Research",
    ];

    for quote in quotes {
        let span = resolver.resolve(&document, quote);
        let expected_start = ESSAY[..ESSAY.find(quote).unwrap()].chars().count() as i64;

        assert_eq!(span.method, MatchMethod::Exact, "quote: {:?}", quote);
        assert_eq!(span.start, expected_start);
        assert_eq!(span.end - span.start, quote.chars().count() as i64);
        assert_eq!(span.text, quote);
    }
}

#[test]
fn test_whitespace_tolerance() {
    let text = "Hello   world,\nhow are you?";
    let span = resolve(text, "Hello world, how").unwrap();

    assert_eq!(span.method, MatchMethod::Normalized);
    assert_eq!(span.start, 0);
    assert_eq!(span.text, "Hello   world,\nhow");
    assert_eq!(span.text, char_slice(text, span.start as usize, span.end as usize));
}

#[test]
fn test_whitespace_variation_in_quote() {
    let span = resolve(ESSAY, "This essay  demonstrates   the importance").unwrap();

    assert_eq!(span.method, MatchMethod::Normalized);
    assert_eq!(span.text, "This essay demonstrates the importance");
    assert_eq!(span.start, 5);
}

#[test]
fn test_fuzzy_case_variation() {
    let span = resolve(ESSAY, "research shows that citations improve credibility").unwrap();

    assert_eq!(span.method, MatchMethod::Fuzzy);
    assert_eq!(span.text, "Research shows that citations improve credibility");
    assert_eq!(span.text, char_slice(ESSAY, span.start as usize, span.end as usize));
}

#[test]
fn test_fuzzy_paraphrase() {
    let span = resolve(ESSAY, "research demonstrates citations improve credibility").unwrap();

    assert_eq!(span.method, MatchMethod::Fuzzy);
    assert!(span.score.unwrap() >= 75.0);
    assert_eq!(span.text, "Research shows that citations improve credibility");
    assert!(span.note.is_none());
}

#[test]
fn test_rejection_of_unrelated_text() {
    let quote = "This text does not exist in the essay at all";
    let span = resolve(ESSAY, quote).unwrap();

    assert_eq!(span.start, NOT_FOUND);
    assert_eq!(span.end, NOT_FOUND);
    assert_eq!(span.method, MatchMethod::None);
    assert_eq!(span.text, quote);
    assert!(span.note.is_some());
    assert!(span.score.is_none());
}

#[test]
fn test_degenerate_inputs() {
    let resolver = Resolver::default();
    let document = Document::new("tiny").unwrap();

    for quote in ["", "   ", "a quote much longer than the document"] {
        let span = resolver.resolve(&document, quote);
        assert!(!span.is_resolved(), "quote: {:?}", quote);
        assert_eq!(span.text, quote);
        assert!(span.note.is_some());
    }

    // Longer than the document before whitespace is collapsed
    let document = Document::new("a b").unwrap();
    let span = resolver.resolve(&document, "a      b");
    assert!(!span.is_resolved());
    assert_eq!(span.start, NOT_FOUND);
}

#[test]
fn test_empty_document_is_invalid_input() {
    let result = resolve("", "quote");
    assert!(matches!(result, Err(ResolveError::InvalidInput { .. })));
}

#[test]
fn test_determinism() {
    let resolver = Resolver::default();
    let document = Document::new(ESSAY).unwrap();
    let quotes = [
        "research demonstrates citations improve credibility",
        "good essays have clear structure",
        "This text does not exist in the essay at all",
    ];

    let first = resolver.resolve_all(&document, &quotes);
    for _ in 0..5 {
        assert_eq!(resolver.resolve_all(&document, &quotes), first);
    }
    for (quote, span) in quotes.iter().zip(&first) {
        assert_eq!(&resolver.resolve(&document, quote), span);
    }
}

#[test]
fn test_multibyte_offsets_are_chars() {
    let text = "Les élèves écrivent   des essais très  soignés.";
    let span = resolve(text, "des essais très soignés").unwrap();

    assert_eq!(span.method, MatchMethod::Normalized);
    assert_eq!(span.text, "des essais très  soignés");
    assert_eq!(span.start, 22);
    assert_eq!(span.text, char_slice(text, span.start as usize, span.end as usize));
}

#[test]
fn test_resolved_text_always_matches_offsets() {
    let resolver = Resolver::default();
    let document = Document::new(ESSAY).unwrap();
    let quotes = [
        "Research shows that citations improve credibility",
        "research shows that   citations",
        "Good essays also have clear structure",
        "good essays have a clear structure and organized paragraphs",
    ];

    for span in resolver.resolve_all(&document, &quotes) {
        if let Some(range) = span.range() {
            assert_eq!(span.text, document.slice(range));
        }
    }
}

#[test]
fn test_threshold_is_configurable() {
    let quote = "research demonstrates citations improve credibility";

    let lenient = Resolver::new(ResolverConfig {
        threshold: 50.0,
        ..Default::default()
    })
    .unwrap();
    assert!(lenient.resolve_text(ESSAY, quote).unwrap().is_resolved());

    let strict = Resolver::new(ResolverConfig {
        threshold: 99.0,
        ..Default::default()
    })
    .unwrap();
    assert!(!strict.resolve_text(ESSAY, quote).unwrap().is_resolved());
}

#[test]
fn test_normalization_idempotence() {
    let samples = [
        "",
        "   ",
        "plain",
        "  leading and trailing  ",
        "tabs\tand\nnewlines\r\n mixed",
        ESSAY,
    ];
    for sample in samples {
        let once = normalize(sample);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn test_map_back_correctness() {
    let original = ESSAY;
    let canonical = Canonical::new(original);
    let needles = ["Research shows", "formatting. Research", "(Smith, 2019). Good essays"];

    for needle in needles {
        let found = canonical.find(needle).unwrap();
        let start = map_back(original, found.start).unwrap();
        let range = canonical.map_range(found.clone()).unwrap();

        assert_eq!(range.start, start);
        assert!(range.len() >= found.len());
        assert_eq!(normalize(&char_slice(original, range.start, range.end)), needle);
    }
}
