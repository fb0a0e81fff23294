//! Web search hits consumed by the fallback heuristics

use serde::{Deserialize, Serialize};

/// A single result returned by the web search capability
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Result URL
    pub url: String,

    /// Result title
    #[serde(default)]
    pub title: String,

    /// Page text or snippet, when requested and available
    #[serde(default)]
    pub text: Option<String>,
}

impl SearchHit {
    /// Create a hit without page text
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            text: None,
        }
    }

    /// Attach page text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Page text, or an empty string when absent
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_or_empty_without_text() {
        let hit = SearchHit::new("https://cos.com", "COS");
        assert_eq!(hit.text_or_empty(), "");
    }

    #[test]
    fn text_is_kept() {
        let hit = SearchHit::new("https://cos.com", "COS").with_text("Minimal fashion");
        assert_eq!(hit.text_or_empty(), "Minimal fashion");
    }
}
