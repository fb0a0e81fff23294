//! Search provider trait

use async_trait::async_trait;

use crate::{SearchOptions, WebSearchError, WebSearchResponse};

/// Trait for web search providers
///
/// Implemented by all search backends (Exa, Brave)
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a web search
    ///
    /// # Errors
    ///
    /// Returns an error if the search fails or returns no results.
    async fn search(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> Result<WebSearchResponse, WebSearchError>;

    /// Get the provider name (e.g., "exa", "brave")
    fn provider_name(&self) -> &'static str;
}
