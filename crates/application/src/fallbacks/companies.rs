//! Company discovery from web search results

use std::collections::HashSet;

use domain::{CompaniesPayload, Company, Website};
use tracing::info;

use super::search_or_empty;
use crate::extraction::{self, ExclusionList};
use crate::ports::{SearchOptions, SearchPort};

/// Characters of the offering description carried into the query
const OFFERING_QUERY_CHARS: usize = 120;

/// Build the company discovery query
///
/// Biases towards fashion retail and apparel brands and carries negative
/// terms for excluded domains and legal/support pages.
pub fn company_query(target: &str, offering: &str, exclusions: &ExclusionList) -> String {
    let mut parts = vec![
        "(fashion retailer OR apparel brand) site:*.com (buying OR merchandising OR ecommerce)"
            .to_string(),
    ];
    parts.extend(exclusions.suffixes().iter().map(|d| format!("-site:{d}")));
    parts.push("-cookie -privacy -terms -login -support".to_string());
    parts.push(format!(
        "— {} — {}",
        target.trim(),
        extraction::truncate_chars(offering.trim(), OFFERING_QUERY_CHARS)
    ));
    parts.join(" ")
}

/// Discover up to `limit` relevant companies via web search
///
/// Hits are deduplicated by domain (first wins), excluded domains are
/// skipped, and only hits whose name or snippet mentions a domain keyword
/// are kept.
pub async fn discover_companies(
    search: &dyn SearchPort,
    target: &str,
    offering: &str,
    limit: usize,
    exclusions: &ExclusionList,
) -> CompaniesPayload {
    let query = company_query(target, offering, exclusions);
    let options = SearchOptions::new(limit.saturating_mul(2)).with_contents();
    let hits = search_or_empty(search, &query, options).await;

    let mut seen = HashSet::new();
    let mut companies = Vec::new();

    for hit in hits {
        if companies.len() >= limit {
            break;
        }

        let domain = Website::domain_of(&hit.url);
        if domain.is_empty() || exclusions.is_excluded(&domain) || !seen.insert(domain) {
            continue;
        }

        let name = extraction::company_name(&hit.title, &hit.url);
        let snippet = hit
            .text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&hit.title);

        if !extraction::has_domain_keyword(&format!("{name} {snippet}")) {
            continue;
        }

        companies.push(Company::new(name, hit.url.clone(), extraction::why_fit(snippet)));
    }

    info!(found = companies.len(), limit, "Company fallback finished");
    CompaniesPayload::new(companies)
}
