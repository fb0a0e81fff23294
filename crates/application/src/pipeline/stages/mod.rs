//! The four retrying stages of the pipeline

mod companies;
mod contacts;
mod emails;
mod research;

pub use companies::{CompanyStage, normalize_companies};
pub use contacts::{ContactStage, normalize_contacts};
pub use emails::{EmailStage, fold_followups};
pub use research::{ResearchStage, clean_research};
