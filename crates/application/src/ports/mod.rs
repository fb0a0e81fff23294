//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod agent_port;
mod export_port;
mod progress_port;
mod search_port;

#[cfg(test)]
pub use agent_port::MockAgentPort;
pub use agent_port::{AgentPort, AgentReply};
#[cfg(test)]
pub use export_port::MockExportPort;
pub use export_port::{ExportPaths, ExportPort};
#[cfg(test)]
pub use progress_port::MockProgressReporter;
pub use progress_port::{NoopProgress, ProgressReporter};
#[cfg(test)]
pub use search_port::MockSearchPort;
pub use search_port::{SearchOptions, SearchPort};
