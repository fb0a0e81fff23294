//! Web search adapter - Implements SearchPort using integration_websearch

use std::sync::Arc;

use application::ApplicationError;
use application::ports::{SearchOptions, SearchPort};
use async_trait::async_trait;
use domain::SearchHit;
use integration_websearch::{
    SearchOptions as IntegrationOptions, SearchProvider, SearchResult as IntegrationResult,
    WebSearchClient, WebSearchConfig, WebSearchError,
};
use tracing::{debug, instrument};

/// Adapter for web search services using Exa and Brave Search
pub struct WebSearchAdapter {
    provider: Arc<dyn SearchProvider>,
}

impl std::fmt::Debug for WebSearchAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSearchAdapter")
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}

impl WebSearchAdapter {
    /// Create a new adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: WebSearchConfig) -> Result<Self, ApplicationError> {
        let client = WebSearchClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_provider(Arc::new(client)))
    }

    /// Wrap an already constructed provider
    pub fn with_provider(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Map integration web search error to application error
    fn map_error(err: WebSearchError) -> ApplicationError {
        match err {
            WebSearchError::RateLimitExceeded { retry_after_secs } => {
                debug!(retry_after = ?retry_after_secs, "Web search rate limited");
                ApplicationError::RateLimited
            },
            WebSearchError::AuthenticationFailed(e) => ApplicationError::NotAuthorized(e),
            WebSearchError::ConfigurationError(e) => ApplicationError::Configuration(e),
            other => ApplicationError::ExternalService(other.to_string()),
        }
    }

    /// Convert integration search result to a domain search hit
    fn map_result(result: IntegrationResult) -> SearchHit {
        let hit = SearchHit::new(result.url, result.title);
        match result.text {
            Some(text) if !text.trim().is_empty() => hit.with_text(text),
            _ => hit,
        }
    }
}

#[async_trait]
impl SearchPort for WebSearchAdapter {
    #[instrument(skip(self), fields(provider = self.provider.provider_name()))]
    async fn search(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> Result<Vec<SearchHit>, ApplicationError> {
        let mut integration_options = IntegrationOptions::new(options.max_results);
        if options.with_contents {
            integration_options = integration_options.with_contents();
        }

        match self.provider.search(query, integration_options).await {
            Ok(response) => {
                let hits: Vec<SearchHit> = response
                    .results
                    .into_iter()
                    .take(options.max_results)
                    .map(Self::map_result)
                    .collect();
                debug!(results = hits.len(), "Web search completed");
                Ok(hits)
            },
            Err(WebSearchError::NoResults { .. }) => Ok(Vec::new()),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}
