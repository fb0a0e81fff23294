//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: agents on top of the
//! ai_core inference engine, web search on top of integration_websearch,
//! and file exports. Also owns configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod logging;

pub use adapters::*;
pub use config::{AppConfig, Credentials, ExportConfig, LoggingConfig, WebSearchAppConfig};
pub use logging::{LoggingError, init_logging};
