//! Web search data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Options for a single search call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of results
    pub max_results: usize,

    /// Request page text along with each result
    pub with_contents: bool,
}

impl SearchOptions {
    /// Plain search without page contents
    #[must_use]
    pub const fn new(max_results: usize) -> Self {
        Self {
            max_results,
            with_contents: false,
        }
    }

    /// Request page text as well
    #[must_use]
    pub const fn with_contents(mut self) -> Self {
        self.with_contents = true;
        self
    }
}

/// A single search result from a web search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// Title of the search result
    pub title: String,

    /// URL of the search result
    pub url: String,

    /// Page text or snippet, when the provider returned any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Position in search results (1-indexed)
    pub position: u32,
}

impl SearchResult {
    /// Create a new search result
    #[must_use]
    pub const fn new(title: String, url: String, text: Option<String>, position: u32) -> Self {
        Self {
            title,
            url,
            text,
            position,
        }
    }
}

/// Response from a web search operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchResponse {
    /// Original search query
    pub query: String,

    /// List of search results
    pub results: Vec<SearchResult>,

    /// Timestamp of the search
    pub timestamp: DateTime<Utc>,

    /// Search provider used (e.g., "exa", "brave")
    pub provider: String,

    /// Time taken for the search in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_time_ms: Option<u64>,
}

impl WebSearchResponse {
    /// Create a new search response
    #[must_use]
    pub fn new(query: String, results: Vec<SearchResult>, provider: &str) -> Self {
        Self {
            query,
            results,
            timestamp: Utc::now(),
            provider: provider.to_string(),
            search_time_ms: None,
        }
    }

    /// Check if the response has any results
    #[must_use]
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}
