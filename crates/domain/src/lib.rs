//! Domain layer for the outreach pipeline
//!
//! Contains the records every pipeline stage produces (companies, contacts,
//! research insights, email drafts, quality-check verdicts), the payload
//! wrappers mirroring the structured-output contract requested from the
//! model, and the value objects shared across stages.
//!
//! This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
