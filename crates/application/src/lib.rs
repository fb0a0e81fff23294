//! Application layer - Use cases and orchestration
//!
//! Contains the outreach pipeline: port definitions, text heuristics, the
//! structured-output parser, search-based fallbacks and the stage state
//! machine. Orchestrates domain objects and infrastructure adapters.

pub mod error;
pub mod extraction;
pub mod fallbacks;
pub mod parser;
pub mod pipeline;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use pipeline::{PipelineSettings, PipelineStage, StageOutcome, StageReport};
pub use ports::*;
pub use services::*;
