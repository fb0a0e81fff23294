//! Text extraction and normalization
//!
//! Pure functions that turn noisy search titles, snippets and model output
//! into clean company names, contact emails and insight sentences. Keyword
//! and noise detection use pre-compiled Aho-Corasick automata over
//! case-insensitive literal sets.

use std::collections::HashSet;
use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use domain::{Sender, Website};
use regex::Regex;

/// Substrings marking text as relevant to fashion buying and merchandising
pub const DOMAIN_KEYWORDS: &[&str] = &[
    "trend",
    "collection",
    "assort",
    "buying",
    "merchand",
    "retail",
    "fashion",
    "brand",
    "ecommerce",
    "e-commerce",
    "pricing",
    "sell",
    "sku",
    "inventory",
    "season",
];

/// Substrings marking scraped text as site chrome rather than content
pub const NOISE_PATTERNS: &[&str] = &[
    "cookie",
    "privacy",
    "terms",
    "javascript",
    "enable",
    "old browser",
    "support",
    "consent",
];

/// Words that disqualify a page title as a company name
const TITLE_NOISE: &[&str] = &["cookie", "privacy", "terms", "login"];

/// Separators after which a page title stops naming the company
const TITLE_SEPARATORS: &[&str] = &[" - ", "|", "•"];

/// Replacement for empty or noisy fit explanations
pub const GENERIC_WHY_FIT: &str = "Retailer/brand with ecommerce; matches targeting.";

/// Maximum length of a fit explanation, in characters
pub const WHY_FIT_MAX_CHARS: usize = domain::entities::WHY_FIT_MAX_CHARS;

/// Insight sentence length bounds, in characters
pub const INSIGHT_MIN_CHARS: usize = domain::entities::MIN_INSIGHT_CHARS;
pub const INSIGHT_MAX_CHARS: usize = domain::entities::MAX_INSIGHT_CHARS;

fn literal_matcher(patterns: &[&str]) -> AhoCorasick {
    #[allow(clippy::expect_used)] // Infallible with valid static patterns
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(patterns)
        .expect("Failed to build literal matcher")
}

static DOMAIN_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| literal_matcher(DOMAIN_KEYWORDS));
static NOISE_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| literal_matcher(NOISE_PATTERNS));
static TITLE_NOISE_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| literal_matcher(TITLE_NOISE));

/// Leading "Firstname Lastname" of a page title
#[allow(clippy::expect_used)] // Static pattern
static PERSON_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][a-zA-Z]+\s+[A-Z][a-zA-Z]+)").expect("Failed to compile person pattern")
});

/// Whether text mentions at least one domain-relevant keyword
pub fn has_domain_keyword(text: &str) -> bool {
    DOMAIN_MATCHER.is_match(text)
}

/// Whether text looks like cookie banners, legal pages or browser warnings
pub fn is_noisy(text: &str) -> bool {
    NOISE_MATCHER.is_match(text)
}

/// First `max` characters of `text`
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Company name from a page title, or the website's brand when the title is
/// unusable
///
/// The title is cut at the first separator (` - `, `|`, `•`); empty results,
/// "home"/"welcome" and titles mentioning cookie/privacy/terms/login are
/// rejected.
pub fn company_name(title: &str, website: &str) -> String {
    let cut = TITLE_SEPARATORS
        .iter()
        .filter_map(|sep| title.find(sep))
        .min()
        .map_or(title, |idx| &title[..idx])
        .trim();

    let generic = cut.eq_ignore_ascii_case("home") || cut.eq_ignore_ascii_case("welcome");
    if !cut.is_empty() && !generic && !TITLE_NOISE_MATCHER.is_match(cut) {
        return cut.to_string();
    }

    Website::parse(website).map_or_else(|_| Website::domain_of(website), |site| site.brand())
}

/// Fit explanation trimmed to [`WHY_FIT_MAX_CHARS`], or
/// [`GENERIC_WHY_FIT`] when the text is empty or noisy
pub fn why_fit(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() || is_noisy(text) {
        return GENERIC_WHY_FIT.to_string();
    }
    truncate_chars(text, WHY_FIT_MAX_CHARS)
}

/// Leading capitalized two-word person name of a title
///
/// Any two capitalized leading words match, so capitalized role titles
/// such as "Merchandising Director" are accepted as names too.
pub fn person_name(title: &str) -> Option<String> {
    PERSON_NAME
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// `first.last@domain`, lowercased
pub fn infer_email(person: &str, domain: &str) -> Option<String> {
    let parts: Vec<&str> = person.split_whitespace().collect();
    let (first, last) = match parts.as_slice() {
        [] => return None,
        [only] => (*only, *only),
        [first, .., last] => (*first, *last),
    };
    let domain = domain.trim();
    if domain.is_empty() {
        return None;
    }
    Some(format!("{first}.{last}@{domain}").to_lowercase())
}

/// Split text into sentences at `.`, `!` or `?` followed by whitespace
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let Some(&(next_idx, next)) = chars.peek() else {
            break;
        };
        if next.is_whitespace() {
            sentences.push(&text[start..next_idx]);
            while chars.peek().is_some_and(|(_, c)| c.is_whitespace()) {
                chars.next();
            }
            start = chars.peek().map_or(text.len(), |(i, _)| *i);
        }
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

/// Whether an insight length is within bounds
pub fn insight_length_ok(sentence: &str) -> bool {
    (INSIGHT_MIN_CHARS..=INSIGHT_MAX_CHARS).contains(&sentence.chars().count())
}

/// Candidate insight sentences from page text
///
/// Keeps trimmed sentences within the length bounds that mention the brand
/// or a domain keyword and are not noisy.
pub fn key_points(text: &str, brand: &str) -> Vec<String> {
    let brand = brand.trim().to_lowercase();
    split_sentences(text)
        .into_iter()
        .map(str::trim)
        .filter(|s| insight_length_ok(s))
        .filter(|s| (!brand.is_empty() && s.to_lowercase().contains(&brand)) || has_domain_keyword(s))
        .filter(|s| !is_noisy(s))
        .map(ToString::to_string)
        .collect()
}

/// Case- and whitespace-insensitive deduplication key
pub fn dedupe_key(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Drop later entries whose [`dedupe_key`] was already seen
pub fn dedupe(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(dedupe_key(item)))
        .collect()
}

/// Domains that must never appear in prospect lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    suffixes: Vec<String>,
    token: Option<String>,
}

impl ExclusionList {
    /// Exclude domains ending with any suffix, plus domains containing the
    /// sender's company token
    pub fn new(suffixes: &[String], sender: &Sender) -> Self {
        let suffixes = suffixes
            .iter()
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        let token = Some(sender.company_token()).filter(|t| !t.is_empty());
        Self { suffixes, token }
    }

    /// Configured domain suffixes
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Whether a normalized domain is excluded
    pub fn is_excluded(&self, domain: &str) -> bool {
        let domain = domain.to_lowercase();
        self.suffixes.iter().any(|s| domain.ends_with(s.as_str()))
            || self
                .token
                .as_deref()
                .is_some_and(|token| domain.contains(token))
    }
}
