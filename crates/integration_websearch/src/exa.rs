//! Exa search API client
//!
//! Client for the Exa neural search API (<https://exa.ai>). Supports the
//! search-with-contents mode that returns page text alongside each hit; if
//! that request fails the same query is retried once without contents.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::{
    SearchOptions, WebSearchResponse, config::WebSearchConfig, error::WebSearchError,
    models::SearchResult, provider::SearchProvider,
};

/// Exa API request and response structures
mod api {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExaSearchRequest<'a> {
        pub query: &'a str,
        pub num_results: usize,
        pub use_autoprompt: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub contents: Option<Contents>,
    }

    #[derive(Debug, Serialize)]
    pub struct Contents {
        pub text: bool,
    }

    #[derive(Debug, Deserialize)]
    pub struct ExaSearchResponse {
        #[serde(default)]
        pub results: Vec<ExaResult>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ExaResult {
        pub url: String,
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub text: Option<String>,
    }
}

/// Exa search API client
#[derive(Debug)]
pub struct ExaSearchClient {
    client: Client,
    api_key: String,
    base_url: String,
    use_autoprompt: bool,
    timeout_secs: u64,
}

impl ExaSearchClient {
    /// Create a new Exa client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or HTTP client cannot be created.
    pub fn new(config: &WebSearchConfig) -> Result<Self, WebSearchError> {
        let api_key = config.exa_api_key.clone().ok_or_else(|| {
            WebSearchError::ConfigurationError("Exa API key is required".to_string())
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WebSearchError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.exa_base_url.trim_end_matches('/').to_string(),
            use_autoprompt: config.use_autoprompt,
            timeout_secs: config.timeout_secs,
        })
    }

    fn build_request<'a>(&self, query: &'a str, options: SearchOptions) -> api::ExaSearchRequest<'a> {
        api::ExaSearchRequest {
            query,
            num_results: options.max_results,
            use_autoprompt: self.use_autoprompt,
            contents: options
                .with_contents
                .then_some(api::Contents { text: true }),
        }
    }

    /// Convert API response to search results
    #[allow(clippy::cast_possible_truncation)]
    fn convert_results(response: api::ExaSearchResponse) -> Vec<SearchResult> {
        response
            .results
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                let text = r.text.filter(|t| !t.trim().is_empty());
                SearchResult::new(r.title.unwrap_or_default(), r.url, text, (i + 1) as u32)
            })
            .collect()
    }

    async fn execute(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> Result<Vec<SearchResult>, WebSearchError> {
        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("x-api-key", &self.api_key)
            .json(&self.build_request(query, options))
            .send()
            .await
            .map_err(|e| WebSearchError::from_transport(&e, self.timeout_secs))?;

        let status = response.status();
        debug!(status = %status, contents = options.with_contents, "Received Exa response");

        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(WebSearchError::RateLimitExceeded {
                    retry_after_secs: None,
                });
            },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(WebSearchError::AuthenticationFailed(
                    "Invalid Exa API key".to_string(),
                ));
            },
            s if !s.is_success() => {
                let error_text = response.text().await.unwrap_or_default();
                return Err(WebSearchError::RequestFailed(format!(
                    "HTTP {status}: {error_text}"
                )));
            },
            _ => {},
        }

        let api_response: api::ExaSearchResponse = response
            .json()
            .await
            .map_err(|e| WebSearchError::ParseError(e.to_string()))?;

        Ok(Self::convert_results(api_response))
    }
}

#[async_trait]
impl SearchProvider for ExaSearchClient {
    #[instrument(skip(self), fields(provider = "exa"))]
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

        let results = match self.execute(query, options).await {
            Err(e) if options.with_contents && !matches!(e, WebSearchError::AuthenticationFailed(_)) => {
                warn!(error = %e, "Exa search with contents failed, retrying without contents");
                let plain = SearchOptions {
                    with_contents: false,
                    ..options
                };
                self.execute(query, plain).await?
            },
            other => other?,
        };

        if results.is_empty() {
            return Err(WebSearchError::NoResults {
                query: query.to_string(),
            });
        }

        let elapsed = start.elapsed();
        let mut response = WebSearchResponse::new(query.to_string(), results, "exa");
        #[allow(clippy::cast_possible_truncation)]
        {
            response.search_time_ms = Some(elapsed.as_millis() as u64);
        }

        debug!(
            results = response.results.len(),
            time_ms = elapsed.as_millis(),
            "Exa search completed"
        );

        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "exa"
    }
}
