use std::fs;
use url::Url;

use crate::extractor::{ExtractError, extract};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

fn example_url(path: &str) -> Url {
    Url::parse(&format!("https://news.example.com{path}")).unwrap()
}

#[test]
fn extracts_article_with_metadata() {
    let html = fixture("article.html");
    let url = example_url("/story/quake-relief");

    let extraction = extract(&html, &url).unwrap();

    assert_eq!(extraction.metadata.title, "Quake Relief Effort Expands");
    assert_eq!(extraction.metadata.author, "Jane Doe");
    assert_eq!(extraction.metadata.published_date, "2024-03-01T10:00:00Z");
    assert_eq!(extraction.metadata.source_domain, "news.example.com");
    assert_eq!(
        extraction.metadata.source_url,
        "https://news.example.com/story/quake-relief"
    );

    assert!(extraction.text.contains("Rescue teams widened their search"));
    assert!(extraction.text.contains("aftershocks could continue"));
    // Navigation, forms, and footer chrome never reach the article text.
    assert!(!extraction.text.contains("Home"));
    assert!(!extraction.text.contains("Subscribe to our newsletter"));
    assert!(!extraction.text.contains("All rights reserved"));
    // Single-space joined, no whitespace runs.
    assert!(!extraction.text.contains("  "));
}

#[test]
fn rejects_javascript_shell() {
    let html = fixture("shell.html");
    let result = extract(&html, &example_url("/spa"));

    match result {
        Err(ExtractError::InsufficientContent(msg)) => {
            assert!(msg.contains("JavaScript-rendered"));
        }
        other => panic!("expected InsufficientContent, got {other:?}"),
    }
}

#[test]
fn falls_back_to_text_nodes_without_paragraph_tags() {
    let html = fixture("bare.html");
    let extraction = extract(&html, &example_url("/ferry")).unwrap();

    assert!(extraction.text.starts_with("Ferry crossings between the islands"));
    assert_eq!(extraction.metadata.title, "Ferry Service Restored After Storm");
}

#[test]
fn rejects_text_below_length_gate() {
    // Big enough to clear the shell check, but the prose is one short line.
    let html = format!(
        "<html><head><title>Stub</title></head><body><article><p>Too short. Really. Sorry.</p></article>{}</body></html>",
        "<!-- padding -->".repeat(40)
    );
    let result = extract(&html, &example_url("/stub"));
    assert!(matches!(result, Err(ExtractError::InsufficientContent(_))));
}

#[test]
fn rejects_prose_without_sentence_marks() {
    let html = format!(
        "<html><body><article><p>{}</p></article></body></html>",
        "headline words with no sentence terminators at all ".repeat(10)
    );
    let result = extract(&html, &example_url("/list"));
    assert!(matches!(result, Err(ExtractError::InsufficientContent(_))));
}

#[test]
fn extraction_is_idempotent() {
    let html = fixture("article.html");
    let url = example_url("/story/quake-relief");

    let first = extract(&html, &url).unwrap();
    let second = extract(&html, &url).unwrap();
    assert_eq!(first.text, second.text);
    assert_eq!(first.metadata, second.metadata);
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn extract_never_panics(
            html in ".*",
            path in "/[a-z]{1,20}"
        ) {
            let url = example_url(&path);
            let _ = extract(&html, &url);
        }
    }
}
