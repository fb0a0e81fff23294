//! Application services - Use case implementations

mod outreach_service;

pub use outreach_service::{OutreachReport, OutreachRequest, OutreachService, StageAgents};
