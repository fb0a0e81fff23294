//! Search port - Interface for web search used by the fallback heuristics

use async_trait::async_trait;
use domain::SearchHit;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Options for a single search call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of hits to return
    pub max_results: usize,
    /// Request page text with each hit
    pub with_contents: bool,
}

impl SearchOptions {
    /// Plain search returning titles and URLs
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

/// Port for web search operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SearchPort: Send + Sync {
    /// Search the web
    ///
    /// An empty result list is a valid answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the search provider fails. Callers in the
    /// fallback heuristics treat any error as "no results".
    async fn search(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> Result<Vec<SearchHit>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_builder() {
        let options = SearchOptions::new(3).with_contents();
        assert_eq!(options.max_results, 3);
        assert!(options.with_contents);
        assert!(!SearchOptions::new(2).with_contents);
    }
}
