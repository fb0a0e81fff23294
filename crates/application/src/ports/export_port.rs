//! Export port - Interface for persisting stage payloads

use std::path::PathBuf;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Files written by one export call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    /// Pretty-printed JSON file
    pub json: PathBuf,
    /// Flattened CSV file, absent if writing it failed
    pub csv: Option<PathBuf>,
}

/// Port for writing stage payloads to persistent storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ExportPort: Send + Sync {
    /// Persist a stage payload under a file-name prefix
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Export`] if the JSON file cannot be
    /// written. CSV failures are not errors.
    async fn export(
        &self,
        prefix: &str,
        payload: &serde_json::Value,
    ) -> Result<ExportPaths, ApplicationError>;
}
