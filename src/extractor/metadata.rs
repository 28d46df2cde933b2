//! Ordered fallback strategies for article metadata.
//!
//! No single selector works across news sites, so each field is resolved by
//! an ordered strategy list: structured social-card/meta tags first, then
//! semantic elements whose class or id carries a domain keyword, then a
//! structural fallback. The first strategy yielding non-empty content wins;
//! exhausting the list leaves the field empty, which is not an error.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

use crate::extractor::model::ArticleMetadata;

/// One heuristic rule for locating a piece of metadata.
struct MetaStrategy {
    name: &'static str,
    apply: fn(&Html) -> Option<String>,
}

static OG_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:title"]"#).unwrap());
static TWITTER_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="twitter:title"]"#).unwrap());
static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static PAGE_TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());

static ARTICLE_AUTHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="article:author"]"#).unwrap());
static META_AUTHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="author"]"#).unwrap());
static A_OR_SPAN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a, span").unwrap());

static PUBLISHED_TIME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="article:published_time"]"#).unwrap());
static MODIFIED_TIME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="article:modified_time"]"#).unwrap());
static TIME_TAG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("time").unwrap());
static SPAN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").unwrap());

const TITLE_KEYWORDS: &[&str] = &["title", "headline", "article"];
const AUTHOR_KEYWORDS: &[&str] = &["author", "byline"];
const DATE_KEYWORDS: &[&str] = &["date", "time", "published"];

static TITLE_STRATEGIES: &[MetaStrategy] = &[
    MetaStrategy {
        name: "og:title",
        apply: |doc| meta_content(doc, &OG_TITLE),
    },
    MetaStrategy {
        name: "twitter:title",
        apply: |doc| meta_content(doc, &TWITTER_TITLE),
    },
    MetaStrategy {
        name: "h1-keyword",
        apply: |doc| keyword_element_text(doc, &H1, TITLE_KEYWORDS),
    },
    MetaStrategy {
        name: "page-title",
        apply: |doc| element_text(doc, &PAGE_TITLE),
    },
];

static AUTHOR_STRATEGIES: &[MetaStrategy] = &[
    MetaStrategy {
        name: "article:author",
        apply: |doc| meta_content(doc, &ARTICLE_AUTHOR),
    },
    MetaStrategy {
        name: "meta-author",
        apply: |doc| meta_content(doc, &META_AUTHOR),
    },
    MetaStrategy {
        name: "byline-keyword",
        apply: |doc| keyword_element_text(doc, &A_OR_SPAN, AUTHOR_KEYWORDS),
    },
];

static DATE_STRATEGIES: &[MetaStrategy] = &[
    MetaStrategy {
        name: "article:published_time",
        apply: |doc| meta_content(doc, &PUBLISHED_TIME),
    },
    MetaStrategy {
        name: "article:modified_time",
        apply: |doc| meta_content(doc, &MODIFIED_TIME),
    },
    MetaStrategy {
        name: "time-tag",
        apply: time_tag_value,
    },
    MetaStrategy {
        name: "date-keyword",
        apply: |doc| keyword_element_text(doc, &SPAN, DATE_KEYWORDS),
    },
];

/// Resolve all metadata fields for a page. Source domain and URL are always
/// populated regardless of what the page itself offers.
pub fn extract_metadata(doc: &Html, url: &Url) -> ArticleMetadata {
    ArticleMetadata {
        title: first_match(doc, TITLE_STRATEGIES, "title"),
        author: first_match(doc, AUTHOR_STRATEGIES, "author"),
        published_date: first_match(doc, DATE_STRATEGIES, "date"),
        source_domain: ArticleMetadata::domain_of(url),
        source_url: url.to_string(),
    }
}

fn first_match(doc: &Html, strategies: &[MetaStrategy], field: &str) -> String {
    for strategy in strategies {
        if let Some(value) = (strategy.apply)(doc) {
            debug!(field, strategy = strategy.name, "metadata strategy hit");
            return value;
        }
    }
    String::new()
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn meta_content(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .find_map(|el| el.value().attr("content").and_then(|c| non_empty(c.to_string())))
}

fn element_text(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .find_map(|el| non_empty(el.text().collect::<String>()))
}

/// First element matched by `selector` whose class or id attribute contains
/// any of `keywords` (case-insensitive substring match) and has text.
fn keyword_element_text(doc: &Html, selector: &Selector, keywords: &[&str]) -> Option<String> {
    doc.select(selector)
        .filter(|el| attr_has_keyword(el, "class", keywords) || attr_has_keyword(el, "id", keywords))
        .find_map(|el| non_empty(el.text().collect::<String>()))
}

fn attr_has_keyword(el: &ElementRef, attr: &str, keywords: &[&str]) -> bool {
    el.value()
        .attr(attr)
        .map(|v| {
            let v = v.to_lowercase();
            keywords.iter().any(|k| v.contains(k))
        })
        .unwrap_or(false)
}

/// `<time datetime="...">` preferred, falling back to the element's text.
fn time_tag_value(doc: &Html) -> Option<String> {
    doc.select(&TIME_TAG).find_map(|el| {
        el.value()
            .attr("datetime")
            .and_then(|d| non_empty(d.to_string()))
            .or_else(|| non_empty(el.text().collect::<String>()))
    })
}
