#![forbid(unsafe_code)]
//! Web search integration for the outreach pipeline
//!
//! Provides web search via the Exa API, with Brave Search as a provider
//! fallback. Exa can return page text with each hit, which the pipeline's
//! heuristics mine for company names and insight sentences.
//!
//! # Architecture
//!
//! The crate follows a provider pattern with a common trait [`SearchProvider`] implemented
//! by both [`ExaSearchClient`] and [`BraveSearchClient`]. The [`WebSearchClient`] combines
//! both providers with automatic fallback support.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_websearch::{SearchOptions, SearchProvider, WebSearchClient, WebSearchConfig};
//!
//! let client = WebSearchClient::new(WebSearchConfig::default())?;
//! let response = client
//!     .search("site:cos.com (about OR team OR blog)", SearchOptions::new(3).with_contents())
//!     .await?;
//! for result in response.results {
//!     println!("{} - {}", result.title, result.url);
//! }
//! ```

mod brave;
mod config;
mod error;
mod exa;
mod models;
mod provider;

pub use brave::BraveSearchClient;
pub use config::WebSearchConfig;
pub use error::WebSearchError;
pub use exa::ExaSearchClient;
pub use models::{SearchOptions, SearchResult, WebSearchResponse};
pub use provider::SearchProvider;

use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Combined web search client with fallback support
///
/// Uses Exa as primary provider and Brave Search as fallback when Exa is
/// unavailable or returns no results.
#[derive(Debug)]
pub struct WebSearchClient {
    exa: Option<ExaSearchClient>,
    brave: Option<BraveSearchClient>,
    config: WebSearchConfig,
}

impl WebSearchClient {
    /// Create a new web search client with the given configuration
    ///
    /// A client without any API key is valid; every search then fails with
    /// [`WebSearchError::ServiceUnavailable`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP clients cannot be initialized.
    pub fn new(config: WebSearchConfig) -> Result<Self, WebSearchError> {
        let exa = if config.exa_api_key.is_some() {
            Some(ExaSearchClient::new(&config)?)
        } else {
            None
        };

        let brave = if config.brave_api_key.is_some() {
            Some(BraveSearchClient::new(&config)?)
        } else {
            None
        };

        if exa.is_none() && brave.is_none() {
            warn!("No search API key configured, web search is unavailable");
        }

        Ok(Self { exa, brave, config })
    }

    /// Check if Exa is configured
    #[must_use]
    pub const fn has_exa(&self) -> bool {
        self.exa.is_some()
    }

    /// Check if Brave Search is configured
    #[must_use]
    pub const fn has_brave(&self) -> bool {
        self.brave.is_some()
    }

    /// Check if fallback is enabled
    #[must_use]
    pub const fn fallback_enabled(&self) -> bool {
        self.config.fallback_enabled
    }
}

#[async_trait]
impl SearchProvider for WebSearchClient {
    async fn search(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> Result<WebSearchResponse, WebSearchError> {
        let options = SearchOptions {
            max_results: options.max_results.min(self.config.max_results),
            ..options
        };

        let mut last_error = None;

        // Try Exa first if available
        if let Some(ref exa) = self.exa {
            match exa.search(query, options).await {
                Ok(response) if response.has_results() => {
                    debug!(
                        query = %query,
                        results = response.results.len(),
                        "Exa returned results"
                    );
                    return Ok(response);
                },
                Ok(_) => {
                    info!(query = %query, "Exa returned no results, trying fallback");
                },
                Err(e) if e.should_fallback() => {
                    warn!(query = %query, error = %e, "Exa search failed, trying fallback");
                    last_error = Some(e);
                },
                Err(e) => return Err(e),
            }
        }

        // Fallback to Brave
        if let Some(ref brave) = self.brave {
            if self.config.fallback_enabled || self.exa.is_none() {
                debug!(query = %query, "Using Brave Search");
                return brave.search(query, options).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            if self.exa.is_some() {
                WebSearchError::NoResults {
                    query: query.to_string(),
                }
            } else {
                WebSearchError::ServiceUnavailable("no search provider configured".to_string())
            }
        }))
    }

    fn provider_name(&self) -> &'static str {
        match (self.exa.is_some(), self.brave.is_some()) {
            (true, true) => "exa+brave",
            (true, false) => "exa",
            (false, true) => "brave",
            (false, false) => "none",
        }
    }
}
