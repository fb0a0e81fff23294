//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod agent_factory;
mod file_exporter;
mod inference_agent_adapter;
mod websearch_adapter;

pub use agent_factory::{build_outreach_service, build_stage_agents};
pub use file_exporter::FileExporter;
pub use inference_agent_adapter::InferenceAgentAdapter;
pub use websearch_adapter::WebSearchAdapter;
