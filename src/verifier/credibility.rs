//! Static source-credibility allow-list.
//!
//! Matching is substring-based on the lowercased domain so subdomains
//! (`www.bbc.co.uk`, `edition.cnn.com`-style hosts) resolve without a
//! suffix parser. The list is advisory context for the prompt, not a
//! trust decision.

struct SourceCategory {
    label: &'static str,
    domains: &'static [&'static str],
}

static OFFICIAL_SOURCES: &[SourceCategory] = &[
    SourceCategory {
        label: "Government",
        domains: &[".gov", ".gov.uk", ".gc.ca", ".europa.eu"],
    },
    SourceCategory {
        label: "International Orgs",
        domains: &["who.int", "un.org", "unesco.org", "worldbank.org"],
    },
    SourceCategory {
        label: "News Agencies",
        domains: &["reuters.com", "apnews.com", "afp.com", "bloomberg.com"],
    },
    SourceCategory {
        label: "Major News",
        domains: &[
            "bbc.com",
            "bbc.co.uk",
            "nytimes.com",
            "washingtonpost.com",
            "theguardian.com",
            "aljazeera.com",
            "npr.org",
        ],
    },
];

/// Credibility label for a source domain, e.g.
/// "High Credibility - News Agencies". Unlisted domains are "Unknown".
pub fn credibility_label(domain: &str) -> String {
    let domain = domain.to_lowercase();
    for category in OFFICIAL_SOURCES {
        if category.domains.iter().any(|d| domain.contains(d)) {
            return format!("High Credibility - {}", category.label);
        }
    }
    "Unknown".to_string()
}
