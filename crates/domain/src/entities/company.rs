//! Company records produced by the discovery stage

use serde::{Deserialize, Serialize};

use super::Payload;
use crate::value_objects::Website;

/// Maximum length of a `why_fit` explanation, in characters
pub const WHY_FIT_MAX_CHARS: usize = 160;

/// A prospect company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company name
    pub name: String,

    /// Company website URL
    pub website: String,

    /// Why the company matches the targeting (one or two lines)
    #[serde(default)]
    pub why_fit: String,
}

impl Company {
    /// Create a company record
    pub fn new(
        name: impl Into<String>,
        website: impl Into<String>,
        why_fit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            website: website.into(),
            why_fit: why_fit.into(),
        }
    }

    /// Normalized website domain
    pub fn domain(&self) -> String {
        Website::domain_of(&self.website)
    }

    /// Brand name derived from the website
    pub fn brand(&self) -> String {
        Website::parse(self.website.as_str()).map_or_else(|_| self.name.clone(), |w| w.brand())
    }
}

/// Payload of the company discovery stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompaniesPayload {
    /// Discovered companies
    #[serde(default)]
    pub companies: Vec<Company>,
}

impl CompaniesPayload {
    /// Wrap a list of companies
    pub const fn new(companies: Vec<Company>) -> Self {
        Self { companies }
    }
}

impl Payload for CompaniesPayload {
    fn record_count(&self) -> usize {
        self.companies.len()
    }
}
