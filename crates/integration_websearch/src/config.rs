//! Web search configuration

use serde::{Deserialize, Serialize};

/// Configuration for web search services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchConfig {
    /// Exa API key (enables Exa as primary provider)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exa_api_key: Option<String>,

    /// Exa API base URL
    #[serde(default = "default_exa_base_url")]
    pub exa_base_url: String,

    /// Brave Search API key (enables Brave as fallback provider)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brave_api_key: Option<String>,

    /// Brave Search API base URL
    #[serde(default = "default_brave_base_url")]
    pub brave_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound on results requested per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Let Exa rewrite queries into its own prompt format
    #[serde(default = "default_use_autoprompt")]
    pub use_autoprompt: bool,

    /// Try Brave when Exa fails or returns nothing
    #[serde(default = "default_fallback_enabled")]
    pub fallback_enabled: bool,

    /// Brave safe search level: "off", "moderate", "strict"
    #[serde(default = "default_safe_search")]
    pub safe_search: String,

    /// Brave result country (ISO 3166-1 alpha-2 code)
    #[serde(default = "default_result_country")]
    pub result_country: String,
}

fn default_exa_base_url() -> String {
    "https://api.exa.ai".to_string()
}

fn default_brave_base_url() -> String {
    "https://api.search.brave.com/res/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_results() -> usize {
    10
}

const fn default_use_autoprompt() -> bool {
    true
}

const fn default_fallback_enabled() -> bool {
    true
}

fn default_safe_search() -> String {
    "moderate".to_string()
}

fn default_result_country() -> String {
    "US".to_string()
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            exa_api_key: None,
            exa_base_url: default_exa_base_url(),
            brave_api_key: None,
            brave_base_url: default_brave_base_url(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
            use_autoprompt: default_use_autoprompt(),
            fallback_enabled: default_fallback_enabled(),
            safe_search: default_safe_search(),
            result_country: default_result_country(),
        }
    }
}

impl WebSearchConfig {
    /// Create a configuration for testing (no API keys, short timeout)
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            max_results: 5,
            ..Default::default()
        }
    }

    /// Whether any provider has credentials
    #[must_use]
    pub const fn has_provider(&self) -> bool {
        self.exa_api_key.is_some() || self.brave_api_key.is_some()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_results == 0 {
            return Err("max_results must be greater than 0".to_string());
        }

        if self.max_results > 20 {
            return Err("max_results must be 20 or less".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        let valid_safe_search = ["off", "moderate", "strict"];
        if !valid_safe_search.contains(&self.safe_search.as_str()) {
            return Err(format!(
                "safe_search must be one of: {}",
                valid_safe_search.join(", ")
            ));
        }

        Ok(())
    }
}
