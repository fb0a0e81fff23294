//! Run settings for the outreach pipeline

use domain::{EmailStyle, Sender};
use serde::{Deserialize, Serialize};

use super::PipelineStage;
use crate::error::ApplicationError;
use crate::extraction::ExclusionList;

/// Bounds accepted for the number of companies per run
pub const COMPANY_LIMIT_RANGE: std::ops::RangeInclusive<usize> = 1..=10;

/// Highest accepted retry count
pub const MAX_RETRIES: u8 = 3;

/// Highest accepted number of follow-up lines
pub const MAX_FOLLOWUPS: u8 = 3;

/// Model names per agent; unset entries use the inference default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageModels {
    /// Model used by every agent without an explicit override
    #[serde(default)]
    pub default: Option<String>,
    /// Company finder model
    #[serde(default)]
    pub company_finder: Option<String>,
    /// Contact finder model
    #[serde(default)]
    pub contact_finder: Option<String>,
    /// Researcher model
    #[serde(default)]
    pub researcher: Option<String>,
    /// Email writer model
    #[serde(default)]
    pub email_writer: Option<String>,
    /// Quality checker model
    #[serde(default)]
    pub quality_checker: Option<String>,
}

impl StageModels {
    /// Model configured for a stage's agent, if any
    pub fn for_stage(&self, stage: PipelineStage) -> Option<&str> {
        let specific = match stage {
            PipelineStage::Companies => &self.company_finder,
            PipelineStage::Contacts => &self.contact_finder,
            PipelineStage::Research => &self.researcher,
            PipelineStage::Emails => &self.email_writer,
            PipelineStage::QualityCheck => &self.quality_checker,
        };
        specific
            .as_deref()
            .or(self.default.as_deref())
            .filter(|m| !m.trim().is_empty())
    }
}

/// Options controlling a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Companies to discover
    pub num_companies: usize,
    /// Extra model attempts per stage after the first
    pub retries: u8,
    /// Run search heuristics when a stage's attempts are all empty
    pub allow_fallbacks: bool,
    /// Review drafted emails with the quality-check agent
    pub quality_check: bool,
    /// Follow-up lines requested per email
    pub followups: u8,
    /// Email tone
    pub email_style: EmailStyle,
    /// Industries to focus on
    pub industries: Vec<String>,
    /// Regions to focus on
    pub regions: Vec<String>,
    /// Domain suffixes never proposed as prospects
    pub exclude_domains: Vec<String>,
    /// Signature identity
    pub sender: Sender,
    /// Per-agent model overrides
    pub models: StageModels,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            num_companies: 5,
            retries: 1,
            allow_fallbacks: true,
            quality_check: true,
            followups: 0,
            email_style: EmailStyle::default(),
            industries: Vec::new(),
            regions: Vec::new(),
            exclude_domains: vec!["livetrend.co".to_string()],
            sender: Sender::default(),
            models: StageModels::default(),
        }
    }
}

impl PipelineSettings {
    /// Validate numeric bounds
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first out-of-range setting.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if !COMPANY_LIMIT_RANGE.contains(&self.num_companies) {
            return Err(ApplicationError::Configuration(format!(
                "num_companies must be between {} and {}, got {}",
                COMPANY_LIMIT_RANGE.start(),
                COMPANY_LIMIT_RANGE.end(),
                self.num_companies
            )));
        }
        if self.retries > MAX_RETRIES {
            return Err(ApplicationError::Configuration(format!(
                "retries must be at most {MAX_RETRIES}, got {}",
                self.retries
            )));
        }
        if self.followups > MAX_FOLLOWUPS {
            return Err(ApplicationError::Configuration(format!(
                "followups must be at most {MAX_FOLLOWUPS}, got {}",
                self.followups
            )));
        }
        Ok(())
    }

    /// Domains excluded from discovery
    pub fn exclusions(&self) -> ExclusionList {
        ExclusionList::new(&self.exclude_domains, &self.sender)
    }
}
