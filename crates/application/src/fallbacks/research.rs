//! Insight collection from company pages and community discussion

use std::collections::HashSet;

use domain::{CompaniesPayload, MAX_INSIGHTS_PER_COMPANY, ResearchPayload, ResearchPerCompany};
use tracing::info;

use super::search_or_empty;
use crate::extraction;
use crate::ports::{SearchOptions, SearchPort};

/// Hits requested per research query
const HITS_PER_QUERY: usize = 3;

fn research_queries(domain: &str, brand: &str) -> [String; 2] {
    [
        format!("site:{domain} (about OR team OR blog)"),
        format!("site:reddit.com {brand}"),
    ]
}

/// Collect up to four insight sentences per company
///
/// Searches the company's own about/team/blog pages and Reddit, then keeps
/// deduplicated sentences of 40 to 200 characters that mention the brand
/// or a domain keyword.
pub async fn collect_research(
    search: &dyn SearchPort,
    companies: &CompaniesPayload,
) -> ResearchPayload {
    let mut groups = Vec::with_capacity(companies.companies.len());
    let options = SearchOptions::new(HITS_PER_QUERY).with_contents();

    for company in &companies.companies {
        let brand = company.brand();
        let mut seen = HashSet::new();
        let mut insights = Vec::new();

        for query in research_queries(&company.domain(), &brand) {
            for hit in search_or_empty(search, &query, options).await {
                for point in extraction::key_points(hit.text_or_empty(), &brand) {
                    if seen.insert(extraction::dedupe_key(&point)) {
                        insights.push(point);
                    }
                }
            }
        }

        insights.truncate(MAX_INSIGHTS_PER_COMPANY);
        info!(company = %company.name, insights = insights.len(), "Research fallback finished");
        groups.push(ResearchPerCompany {
            company: company.name.clone(),
            insights,
        });
    }

    ResearchPayload::new(groups)
}

#[cfg(test)]
mod tests {
    use domain::{Company, SearchHit};

    use super::*;
    use crate::ports::MockSearchPort;

    fn companies() -> CompaniesPayload {
        CompaniesPayload::new(vec![Company::new("COS", "https://www.cos.com", "Fashion")])
    }

    #[test]
    fn queries_target_site_and_reddit() {
        let [site, reddit] = research_queries("cos.com", "Cos");
        assert_eq!(site, "site:cos.com (about OR team OR blog)");
        assert_eq!(reddit, "site:reddit.com Cos");
    }

    #[tokio::test]
    async fn keeps_relevant_sentences_and_caps() {
        let mut search = MockSearchPort::new();
        search
            .expect_search()
            .withf(|_, options| options.max_results == 3 && options.with_contents)
            .times(2)
            .returning(|query, _| {
                if query.starts_with("site:cos.com") {
                    Ok(vec![SearchHit::new("https://cos.com/about", "About").with_text(
                        "Short. Cos designs modern, functional wardrobe staples for men and women. \
                         Our collections are released in small seasonal drops every month. \
                         Please enable JavaScript to view this page properly today.",
                    )])
                } else {
                    Ok(vec![
                        SearchHit::new("https://reddit.com/r/a", "Thread").with_text(
                            "cos designs modern, functional wardrobe staples for men and women. \
                             The knit quality at COS dropped noticeably over the last two years. \
                             Their pricing feels fair compared to other Scandinavian labels.",
                        ),
                        SearchHit::new("https://reddit.com/r/b", "Thread").with_text(
                            "The returns process at Cos is quick and painless for most customers.",
                        ),
                    ])
                }
            });

        let payload = collect_research(&search, &companies()).await;
        let insights = payload.for_company("COS");

        assert_eq!(
            insights,
            [
                "Cos designs modern, functional wardrobe staples for men and women.",
                "Our collections are released in small seasonal drops every month.",
                "The knit quality at COS dropped noticeably over the last two years.",
                "Their pricing feels fair compared to other Scandinavian labels.",
            ]
        );
    }

    #[tokio::test]
    async fn hits_without_text_yield_no_insights() {
        let mut search = MockSearchPort::new();
        search
            .expect_search()
            .returning(|_, _| Ok(vec![SearchHit::new("https://cos.com", "COS")]));

        let payload = collect_research(&search, &companies()).await;
        assert_eq!(payload.companies.len(), 1);
        assert!(payload.for_company("COS").is_empty());
    }
}
