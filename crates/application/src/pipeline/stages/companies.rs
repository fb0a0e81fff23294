//! Company discovery stage

use std::collections::HashSet;
use std::fmt;

use async_trait::async_trait;
use domain::{CompaniesPayload, Company, Website};
use tracing::debug;

use crate::extraction::{self, ExclusionList};
use crate::fallbacks;
use crate::pipeline::{PipelineStage, Stage, prompts};
use crate::ports::SearchPort;

/// Clean a model-produced company list
///
/// Drops entries without a website, excluded or repeated domains, and
/// entries whose name and fit explanation mention no domain keyword. Names
/// and fit explanations are cleaned and the list is truncated to `limit`.
pub fn normalize_companies(
    payload: CompaniesPayload,
    limit: usize,
    exclusions: &ExclusionList,
) -> CompaniesPayload {
    let mut seen = HashSet::new();
    let mut companies = Vec::new();

    for company in payload.companies {
        let domain = Website::domain_of(&company.website);
        if domain.is_empty() || exclusions.is_excluded(&domain) || !seen.insert(domain) {
            debug!(company = %company.name, website = %company.website, "Dropping company");
            continue;
        }
        if !extraction::has_domain_keyword(&format!("{} {}", company.why_fit, company.name)) {
            debug!(company = %company.name, "Dropping company without domain relevance");
            continue;
        }

        let name = extraction::company_name(&company.name, &company.website);
        let why_fit = extraction::why_fit(&company.why_fit);
        companies.push(Company::new(name, company.website, why_fit));
    }

    companies.truncate(limit);
    CompaniesPayload::new(companies)
}

/// Finds prospect companies for the targeting
pub struct CompanyStage<'a> {
    /// Target company description
    pub target: &'a str,
    /// Sender's offering description
    pub offering: &'a str,
    /// Companies requested
    pub limit: usize,
    /// Domains never proposed
    pub exclusions: &'a ExclusionList,
    /// Search used by the fallback
    pub search: &'a dyn SearchPort,
}

impl fmt::Debug for CompanyStage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompanyStage")
            .field("target", &self.target)
            .field("offering", &self.offering)
            .field("limit", &self.limit)
            .field("exclusions", &self.exclusions)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Stage for CompanyStage<'_> {
    type Output = CompaniesPayload;

    fn kind(&self) -> PipelineStage {
        PipelineStage::Companies
    }

    fn prompt(&self) -> String {
        prompts::companies_prompt(self.target, self.offering, self.limit)
    }

    fn normalize(&self, payload: CompaniesPayload) -> CompaniesPayload {
        normalize_companies(payload, self.limit, self.exclusions)
    }

    async fn fallback(&self) -> CompaniesPayload {
        fallbacks::discover_companies(
            self.search,
            self.target,
            self.offering,
            self.limit,
            self.exclusions,
        )
        .await
    }
}
