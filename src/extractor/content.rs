//! Content-container selection and text collection.
//!
//! Containers are located by an ordered strategy list, cheapest heuristic
//! first. The first strategy yielding at least one candidate wins; within a
//! strategy the candidate with the most text is chosen, ties broken by
//! document order. This trades precision for robustness: no layout analysis,
//! just the first plausible answer.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

type CandidateFn = for<'a> fn(&'a Html) -> Vec<ElementRef<'a>>;

static ARTICLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("article").unwrap());
static DIV_OR_SECTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div, section").unwrap());
static MAIN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"main, [role="main"]"#).unwrap());
static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());
static PARAGRAPHS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p, h1, h2, h3, h4, h5, h6").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const CONTENT_KEYWORDS: &[&str] = &["article", "story", "content", "body", "text"];

static CONTAINER_STRATEGIES: &[(&str, CandidateFn)] = &[
    ("article-tag", article_candidates),
    ("class-keyword", class_keyword_candidates),
    ("id-keyword", id_keyword_candidates),
    ("main", main_candidates),
    ("body", body_candidates),
];

fn article_candidates<'a>(doc: &'a Html) -> Vec<ElementRef<'a>> {
    doc.select(&ARTICLE).collect()
}

fn class_keyword_candidates<'a>(doc: &'a Html) -> Vec<ElementRef<'a>> {
    doc.select(&DIV_OR_SECTION)
        .filter(|el| attr_has_keyword(el, "class"))
        .collect()
}

fn id_keyword_candidates<'a>(doc: &'a Html) -> Vec<ElementRef<'a>> {
    doc.select(&DIV_OR_SECTION)
        .filter(|el| attr_has_keyword(el, "id"))
        .collect()
}

fn main_candidates<'a>(doc: &'a Html) -> Vec<ElementRef<'a>> {
    doc.select(&MAIN).collect()
}

fn body_candidates<'a>(doc: &'a Html) -> Vec<ElementRef<'a>> {
    doc.select(&BODY).collect()
}

fn attr_has_keyword(el: &ElementRef, attr: &str) -> bool {
    el.value()
        .attr(attr)
        .map(|v| {
            let v = v.to_lowercase();
            CONTENT_KEYWORDS.iter().any(|k| v.contains(k))
        })
        .unwrap_or(false)
}

/// Pick the most probable content container. Returns the winning strategy
/// name alongside the element for logging.
pub fn select_container(doc: &Html) -> Option<(&'static str, ElementRef<'_>)> {
    for &(name, candidates_of) in CONTAINER_STRATEGIES {
        let candidates = candidates_of(doc);
        let Some(first) = candidates.first().copied() else {
            continue;
        };
        // Strictly-greater comparison keeps the first candidate on ties.
        let mut best = first;
        let mut best_len = total_text_len(best);
        for candidate in candidates.into_iter().skip(1) {
            let len = total_text_len(candidate);
            if len > best_len {
                best = candidate;
                best_len = len;
            }
        }
        return Some((name, best));
    }
    None
}

fn total_text_len(el: ElementRef) -> usize {
    el.text().map(|t| t.len()).sum()
}

/// Collect prose from a container: paragraph and heading elements when
/// present, otherwise every non-empty text node the container holds.
pub fn collect_text(container: ElementRef) -> String {
    let paragraphs: Vec<String> = container
        .select(&PARAGRAPHS)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let joined = if paragraphs.is_empty() {
        container
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        paragraphs.join(" ")
    };

    normalize_whitespace(&joined)
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").to_string()
}
