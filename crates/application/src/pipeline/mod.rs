//! Outreach pipeline stages
//!
//! Five stages run in order: company discovery, contact discovery,
//! research, email writing and quality check. The first four share one
//! retry-then-fallback state machine ([`StageRunner`] driving a [`Stage`]);
//! the quality check is a single call aligned with the email list.

mod instructions;
mod prompts;
mod quality;
mod runner;
mod settings;
mod stages;

use std::fmt;

pub use instructions::agent_instructions;
pub use quality::{MISSING_VERDICT_NOTE, align_verdicts, run_quality_check};
pub use runner::{Stage, StageOutcome, StageReport, StageResult, StageRunner};
pub use settings::{COMPANY_LIMIT_RANGE, MAX_FOLLOWUPS, MAX_RETRIES, PipelineSettings, StageModels};
pub use stages::{
    CompanyStage, ContactStage, EmailStage, ResearchStage, clean_research, fold_followups,
    normalize_companies, normalize_contacts,
};

/// A step of the outreach pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    /// Company discovery
    Companies,
    /// Decision-maker discovery
    Contacts,
    /// Insight collection
    Research,
    /// Email drafting
    Emails,
    /// Email review
    QualityCheck,
}

impl PipelineStage {
    /// All stages in execution order
    pub const ALL: [Self; 5] = [
        Self::Companies,
        Self::Contacts,
        Self::Research,
        Self::Emails,
        Self::QualityCheck,
    ];

    /// 1-based position in the run
    #[must_use]
    pub const fn number(&self) -> usize {
        match self {
            Self::Companies => 1,
            Self::Contacts => 2,
            Self::Research => 3,
            Self::Emails => 4,
            Self::QualityCheck => 5,
        }
    }

    /// Human-readable stage name
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Companies => "Finding companies",
            Self::Contacts => "Finding contacts",
            Self::Research => "Researching insights",
            Self::Emails => "Writing emails",
            Self::QualityCheck => "Quality check",
        }
    }

    /// Name of the agent serving this stage
    #[must_use]
    pub const fn agent_name(&self) -> &'static str {
        match self {
            Self::Companies => "CompanyFinderAgent",
            Self::Contacts => "ContactFinderAgent",
            Self::Research => "ResearchAgent",
            Self::Emails => "EmailWriterAgent",
            Self::QualityCheck => "QualityCheckAgent",
        }
    }

    /// File prefix used when exporting this stage's payload
    #[must_use]
    pub const fn export_prefix(&self) -> &'static str {
        match self {
            Self::Companies => "companies",
            Self::Contacts => "contacts",
            Self::Research => "research",
            Self::Emails => "emails",
            Self::QualityCheck => "qc",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.export_prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_numbered_in_order() {
        let numbers: Vec<usize> = PipelineStage::ALL.iter().map(PipelineStage::number).collect();
        assert_eq!(numbers, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn export_prefixes() {
        assert_eq!(PipelineStage::Companies.export_prefix(), "companies");
        assert_eq!(PipelineStage::QualityCheck.export_prefix(), "qc");
        assert_eq!(PipelineStage::Research.to_string(), "research");
    }
}
