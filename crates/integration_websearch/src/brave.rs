//! Brave Search API client
//!
//! Client for the Brave Search API (<https://brave.com/search/api/>).
//! Brave has no page-contents mode; the result description stands in for
//! page text.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use crate::{
    SearchOptions, WebSearchResponse, config::WebSearchConfig, error::WebSearchError,
    models::SearchResult, provider::SearchProvider,
};

/// Brave Search API response structures
mod api {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct BraveSearchResponse {
        pub web: Option<WebResults>,
    }

    #[derive(Debug, Deserialize)]
    pub struct WebResults {
        pub results: Vec<WebResult>,
    }

    #[derive(Debug, Deserialize)]
    pub struct WebResult {
        pub title: String,
        pub url: String,
        pub description: Option<String>,
    }
}

/// Brave's per-request result cap
const BRAVE_MAX_COUNT: usize = 20;

/// Brave Search API client
#[derive(Debug)]
pub struct BraveSearchClient {
    client: Client,
    api_key: String,
    base_url: String,
    safe_search: String,
    result_country: String,
    timeout_secs: u64,
}

impl BraveSearchClient {
    /// Create a new Brave Search client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or HTTP client cannot be created.
    pub fn new(config: &WebSearchConfig) -> Result<Self, WebSearchError> {
        let api_key = config.brave_api_key.clone().ok_or_else(|| {
            WebSearchError::ConfigurationError("Brave API key is required".to_string())
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WebSearchError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.brave_base_url.trim_end_matches('/').to_string(),
            safe_search: config.safe_search.clone(),
            result_country: config.result_country.to_lowercase(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Query parameters for a search request
    fn query_params(&self, query: &str, count: usize) -> [(&'static str, String); 4] {
        [
            ("q", query.to_string()),
            ("count", count.min(BRAVE_MAX_COUNT).to_string()),
            ("safesearch", self.safe_search.clone()),
            ("country", self.result_country.clone()),
        ]
    }

    /// Convert API response to search results
    #[allow(clippy::cast_possible_truncation)]
    fn convert_results(response: api::BraveSearchResponse) -> Vec<SearchResult> {
        response
            .web
            .map(|web| {
                web.results
                    .into_iter()
                    .enumerate()
                    .map(|(i, r)| {
                        let text = r.description.filter(|d| !d.trim().is_empty());
                        SearchResult::new(r.title, r.url, text, (i + 1) as u32)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl SearchProvider for BraveSearchClient {
    #[instrument(skip(self), fields(provider = "brave"))]
    async fn search(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> Result<WebSearchResponse, WebSearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WebSearchError::InvalidQuery(
                "Search query cannot be empty".to_string(),
            ));
        }

        let start = Instant::now();
        debug!("Sending Brave Search request");

        let response = self
            .client
            .get(format!("{}/web/search", self.base_url))
            .query(&self.query_params(query, options.max_results))
            .header("X-Subscription-Token", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| WebSearchError::from_transport(&e, self.timeout_secs))?;

        let status = response.status();
        debug!(status = %status, "Received Brave Search response");

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse().ok());

            return Err(WebSearchError::RateLimitExceeded {
                retry_after_secs: retry_after,
            });
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(WebSearchError::AuthenticationFailed(
                "Invalid Brave API key".to_string(),
            ));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(WebSearchError::RequestFailed(format!(
                "HTTP {status}: {error_text}"
            )));
        }

        let api_response: api::BraveSearchResponse = response
            .json()
            .await
            .map_err(|e| WebSearchError::ParseError(e.to_string()))?;

        let mut results = Self::convert_results(api_response);
        results.truncate(options.max_results);

        if results.is_empty() {
            return Err(WebSearchError::NoResults {
                query: query.to_string(),
            });
        }

        let elapsed = start.elapsed();
        let mut response = WebSearchResponse::new(query.to_string(), results, "brave");
        #[allow(clippy::cast_possible_truncation)]
        {
            response.search_time_ms = Some(elapsed.as_millis() as u64);
        }

        debug!(
            results = response.results.len(),
            time_ms = elapsed.as_millis(),
            "Brave Search completed"
        );

        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "brave"
    }
}
