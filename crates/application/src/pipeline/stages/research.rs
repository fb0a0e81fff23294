//! Research stage

use std::fmt;

use async_trait::async_trait;
use domain::{CompaniesPayload, MAX_INSIGHTS_PER_COMPANY, ResearchPayload, ResearchPerCompany};

use crate::extraction;
use crate::fallbacks;
use crate::pipeline::{PipelineStage, Stage, prompts};
use crate::ports::SearchPort;

/// Filter model-produced insights for relevance
///
/// Keeps trimmed, non-noisy insights of 40 to 200 characters that mention
/// a domain keyword, deduplicated per company and capped at four.
pub fn clean_research(payload: ResearchPayload) -> ResearchPayload {
    let companies = payload
        .companies
        .into_iter()
        .map(|group| {
            let relevant = group
                .insights
                .iter()
                .map(|i| i.trim().to_string())
                .filter(|i| !extraction::is_noisy(i))
                .filter(|i| extraction::has_domain_keyword(i))
                .filter(|i| extraction::insight_length_ok(i));
            let mut insights = extraction::dedupe(relevant);
            insights.truncate(MAX_INSIGHTS_PER_COMPANY);
            ResearchPerCompany {
                company: group.company,
                insights,
            }
        })
        .collect();
    ResearchPayload::new(companies)
}

/// Collects personalization insights per company
pub struct ResearchStage<'a> {
    /// Discovered companies
    pub companies: &'a CompaniesPayload,
    /// Search used by the fallback
    pub search: &'a dyn SearchPort,
}

impl fmt::Debug for ResearchStage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResearchStage")
            .field("companies", &self.companies)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Stage for ResearchStage<'_> {
    type Output = ResearchPayload;

    fn kind(&self) -> PipelineStage {
        PipelineStage::Research
    }

    fn prompt(&self) -> String {
        prompts::research_prompt(self.companies)
    }

    fn normalize(&self, payload: ResearchPayload) -> ResearchPayload {
        clean_research(payload)
    }

    async fn fallback(&self) -> ResearchPayload {
        fallbacks::collect_research(self.search, self.companies).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_noise_relevance_length_and_duplicates() {
        let payload = ResearchPayload::new(vec![ResearchPerCompany {
            company: "COS".to_string(),
            insights: vec![
                "  New knitwear collection drops every season with limited runs.  ".to_string(),
                "new knitwear collection drops every season with limited runs.".to_string(),
                "Accept cookies to keep shopping the latest fashion collection.".to_string(),
                "The office dog is called Biscuit and everyone loves him dearly.".to_string(),
                "Fashion!".to_string(),
                "Pricing for outerwear was raised by ten percent this autumn season.".to_string(),
                "Their ecommerce checkout now offers buy-now-pay-later options.".to_string(),
                "Merchandising teams plan assortments twelve months ahead of launch.".to_string(),
                "Retail footprint grew to forty stores across northern Europe.".to_string(),
            ],
        }]);

        let cleaned = clean_research(payload);
        assert_eq!(
            cleaned.for_company("COS"),
            [
                "New knitwear collection drops every season with limited runs.",
                "Pricing for outerwear was raised by ten percent this autumn season.",
                "Their ecommerce checkout now offers buy-now-pay-later options.",
                "Merchandising teams plan assortments twelve months ahead of launch.",
            ]
        );
    }

    #[test]
    fn keeps_companies_with_no_surviving_insights() {
        let payload = ResearchPayload::new(vec![ResearchPerCompany {
            company: "COS".to_string(),
            insights: vec!["Nothing relevant here at all, just filler words.".to_string()],
        }]);
        let cleaned = clean_research(payload);
        assert_eq!(cleaned.companies.len(), 1);
        assert!(cleaned.for_company("COS").is_empty());
    }
}
