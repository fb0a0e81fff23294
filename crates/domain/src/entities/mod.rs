//! Domain entities - Records produced by the pipeline stages
//!
//! Each stage hands an immutable payload to the next one. Payload wrappers
//! mirror the JSON contract the model is asked to return, so they
//! deserialize directly from model output; missing lists default to empty.

mod company;
mod contact;
mod email;
mod quality;
mod research;
mod search_hit;

pub use company::{CompaniesPayload, Company, WHY_FIT_MAX_CHARS};
pub use contact::{Contact, ContactsPayload, ContactsPerCompany, MAX_CONTACTS_PER_COMPANY};
pub use email::{EmailDraft, EmailsPayload};
pub use quality::{QcPayload, QcResult};
pub use research::{
    MAX_INSIGHT_CHARS, MAX_INSIGHTS_PER_COMPANY, MIN_INSIGHT_CHARS, ResearchPayload,
    ResearchPerCompany,
};
pub use search_hit::SearchHit;

/// A stage payload: a collection of records that may be empty
pub trait Payload: Default {
    /// Number of top-level records
    fn record_count(&self) -> usize;

    /// Whether the payload carries no records
    fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}
