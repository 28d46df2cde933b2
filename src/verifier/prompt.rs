//! Verification prompt composition.
//!
//! The prompt is a fixed multi-section outline; downstream output-format
//! checks rely on the section set (source verification, cross-reference,
//! fact pattern analysis, verdict, recommendations) staying stable.

use chrono::NaiveDate;
use std::fmt::Write as _;

use crate::extractor::ArticleMetadata;
use crate::verifier::credibility::credibility_label;
use crate::verifier::search::SearchHit;

/// Upstream context windows are finite; clip pathological inputs.
const MAX_PROMPT_TEXT_CHARS: usize = 12_000;

pub fn compose(
    text: &str,
    metadata: Option<&ArticleMetadata>,
    hits: &[SearchHit],
    today: NaiveDate,
) -> String {
    let clipped: String = text.chars().take(MAX_PROMPT_TEXT_CHARS).collect();

    let mut prompt = String::with_capacity(clipped.len() + 2048);
    let _ = writeln!(
        prompt,
        "You are an advanced fact-checking system with access to reliable news sources and official records."
    );
    let _ = writeln!(
        prompt,
        "Analyze this article with extreme thoroughness and skepticism. Today's date is {}.",
        today.format("%Y-%m-%d")
    );
    prompt.push('\n');

    if let Some(meta) = metadata {
        let _ = writeln!(prompt, "Article Metadata:");
        let _ = writeln!(prompt, "Title: {}", meta.title);
        let _ = writeln!(prompt, "Source: {}", meta.source_domain);
        let _ = writeln!(prompt, "Author: {}", meta.author);
        let _ = writeln!(prompt, "Date Published: {}", meta.published_date);
        let _ = writeln!(prompt, "URL: {}", meta.source_url);
        let _ = writeln!(prompt, "Source Analysis:");
        let _ = writeln!(prompt, "- Domain: {}", meta.source_domain.to_lowercase());
        let _ = writeln!(
            prompt,
            "- Credibility: {}",
            credibility_label(&meta.source_domain)
        );
        prompt.push('\n');
    }

    if !hits.is_empty() {
        let _ = writeln!(prompt, "Related coverage found by a news search:");
        for hit in hits {
            let _ = writeln!(prompt, "- {} ({}) {}", hit.title, hit.source, hit.url);
        }
        prompt.push('\n');
    }

    let _ = writeln!(prompt, "Article Text:");
    let _ = writeln!(prompt, "{clipped}");
    prompt.push('\n');

    prompt.push_str(
        "Follow this comprehensive verification protocol:\n\
         \n\
         1. SOURCE VERIFICATION:\n\
         - Check if the source is a recognized news organization, official body, or verified platform\n\
         - Evaluate the author's credentials and track record if available\n\
         - Verify if the publishing date aligns with the events described\n\
         \n\
         2. MULTI-SOURCE CROSS-REFERENCE:\n\
         - Search for coverage of the same news across official websites, major international news agencies, and respected national outlets\n\
         - Compare key facts, dates, quotes, and claims across sources\n\
         - Note any significant discrepancies or contradictions\n\
         \n\
         3. FACT PATTERN ANALYSIS:\n\
         - Break down major claims and statements\n\
         - Verify specific details (names, dates, numbers, locations)\n\
         - Check if quotes are accurately attributed and in proper context\n\
         - Identify any logical inconsistencies or timeline mismatches\n\
         \n\
         4. PROVIDE A DETAILED VERDICT:\n\
         AUTHENTICITY ASSESSMENT:\n\
         - Primary Verdict: REAL or FAKE\n\
         - Confidence Level: HIGH, MEDIUM, or LOW\n\
         - Verification Score: 0-100%\n\
         \n\
         EVIDENCE SUMMARY:\n\
         - List confirmed facts with their sources\n\
         - Detail any contradicting information found\n\
         - Highlight unverified claims\n\
         \n\
         SUPPORTING SOURCES:\n\
         - List specific reliable sources that confirm or contradict\n\
         - Include relevant official statements or documents\n\
         \n\
         RED FLAGS (if any):\n\
         - Inconsistencies with verified sources\n\
         - Misquoted or out-of-context information\n\
         - Timing discrepancies\n\
         - Unusual patterns or suspicious elements\n\
         \n\
         5. RECOMMENDATIONS:\n\
         - Suggest most reliable sources for this topic\n\
         - Provide guidance for further verification\n\
         \n\
         Format the response clearly with headings and bullet points.\n\
         If any aspect cannot be verified with high confidence, explicitly state this uncertainty.\n",
    );

    prompt
}
