//! Research insights per company

use serde::{Deserialize, Serialize};

use super::Payload;

/// Maximum number of insights kept per company
pub const MAX_INSIGHTS_PER_COMPANY: usize = 4;

/// Shortest acceptable insight sentence, in characters
pub const MIN_INSIGHT_CHARS: usize = 40;

/// Longest acceptable insight sentence, in characters
pub const MAX_INSIGHT_CHARS: usize = 200;

/// Insights collected for one company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchPerCompany {
    /// Company name as produced by discovery
    pub company: String,

    /// Single-sentence insights
    #[serde(default)]
    pub insights: Vec<String>,
}

/// Payload of the research stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchPayload {
    /// Insights grouped by company
    #[serde(default)]
    pub companies: Vec<ResearchPerCompany>,
}

impl ResearchPayload {
    /// Wrap a list of per-company insight groups
    pub const fn new(companies: Vec<ResearchPerCompany>) -> Self {
        Self { companies }
    }

    /// Insights recorded for a company name
    pub fn for_company(&self, company: &str) -> &[String] {
        self.companies
            .iter()
            .find(|group| group.company == company)
            .map_or(&[], |group| group.insights.as_slice())
    }
}

impl Payload for ResearchPayload {
    fn record_count(&self) -> usize {
        self.companies.len()
    }
}
