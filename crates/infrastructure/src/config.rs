//! Application configuration
//!
//! Layers, later ones winning: built-in defaults, an optional TOML file
//! (`outreach.toml` in the working directory or an explicit path), then
//! `OUTREACH_` environment variables with `__` between nested keys, e.g.
//! `OUTREACH_PIPELINE__NUM_COMPANIES=3`. Credentials not set through these
//! layers are read from `OPENAI_API_KEY`, `EXA_API_KEY` and `BRAVE_API_KEY`.

use std::fmt;
use std::path::{Path, PathBuf};

use ai_core::InferenceConfig;
use application::{ApplicationError, PipelineSettings};
use integration_websearch::WebSearchConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "OUTREACH";

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "outreach";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Inference configuration
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Web search configuration
    #[serde(default)]
    pub websearch: WebSearchAppConfig,

    /// Pipeline run settings
    #[serde(default)]
    pub pipeline: PipelineSettings,

    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// API credentials
    #[serde(default)]
    pub credentials: Credentials,
}

/// Web search configuration without credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchAppConfig {
    /// Exa API base URL
    #[serde(default = "default_exa_base_url")]
    pub exa_base_url: String,

    /// Brave Search API base URL
    #[serde(default = "default_brave_base_url")]
    pub brave_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_search_timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound on results per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Let Exa rewrite queries
    #[serde(default = "default_true")]
    pub use_autoprompt: bool,

    /// Try Brave when Exa fails or returns nothing
    #[serde(default = "default_true")]
    pub fallback_enabled: bool,
}

fn default_exa_base_url() -> String {
    WebSearchConfig::default().exa_base_url
}

fn default_brave_base_url() -> String {
    WebSearchConfig::default().brave_base_url
}

const fn default_search_timeout_secs() -> u64 {
    30
}

const fn default_max_results() -> usize {
    10
}

const fn default_true() -> bool {
    true
}

impl Default for WebSearchAppConfig {
    fn default() -> Self {
        Self {
            exa_base_url: default_exa_base_url(),
            brave_base_url: default_brave_base_url(),
            timeout_secs: default_search_timeout_secs(),
            max_results: default_max_results(),
            use_autoprompt: true,
            fallback_enabled: true,
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Write stage payloads to disk
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Output directory
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("exports")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            out_dir: default_out_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `application=debug`
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

/// API credentials (sensitive - uses SecretString)
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    /// OpenAI-compatible inference API key
    #[serde(default, skip_serializing)]
    pub openai_api_key: Option<SecretString>,

    /// Exa search API key
    #[serde(default, skip_serializing)]
    pub exa_api_key: Option<SecretString>,

    /// Brave Search API key
    #[serde(default, skip_serializing)]
    pub brave_api_key: Option<SecretString>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |s: &Option<SecretString>| s.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("Credentials")
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("exa_api_key", &redact(&self.exa_api_key))
            .field("brave_api_key", &redact(&self.brave_api_key))
            .finish()
    }
}

impl Credentials {
    /// Fill unset keys from well-known variables
    ///
    /// Blank values count as unset.
    pub fn resolve_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let slots = [
            (&mut self.openai_api_key, "OPENAI_API_KEY"),
            (&mut self.exa_api_key, "EXA_API_KEY"),
            (&mut self.brave_api_key, "BRAVE_API_KEY"),
        ];
        for (slot, var) in slots {
            if slot.as_ref().is_some_and(|s| !s.expose_secret().trim().is_empty()) {
                continue;
            }
            *slot = lookup(var)
                .filter(|v| !v.trim().is_empty())
                .map(SecretString::from);
        }
    }
}

fn secret_str(secret: Option<&SecretString>) -> Option<String> {
    secret.map(|s| s.expose_secret().to_string())
}

impl AppConfig {
    /// Load configuration from the optional file and the environment
    ///
    /// Without `path`, `outreach.toml` in the working directory is used if
    /// present. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut config = Self::load_with_env(path, config::Environment::with_prefix(ENV_PREFIX))?;
        config.credentials.resolve_with(|var| std::env::var(var).ok());
        Ok(config)
    }

    /// Load with a caller-supplied environment source
    pub fn load_with_env(
        path: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            .set_default("logging.filter", default_log_filter())?
            .add_source(file)
            .add_source(
                environment
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("pipeline.industries")
                    .with_list_parse_key("pipeline.regions")
                    .with_list_parse_key("pipeline.exclude_domains"),
            );

        builder.build()?.try_deserialize()
    }

    /// Check numeric bounds of every section
    ///
    /// # Errors
    ///
    /// Returns a configuration error for the first invalid value.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.pipeline.validate()?;
        self.web_search_config()
            .validate()
            .map_err(ApplicationError::Configuration)
    }

    /// Inference API key, required before any stage runs
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no key is configured.
    pub fn openai_api_key(&self) -> Result<SecretString, ApplicationError> {
        self.credentials.openai_api_key.clone().ok_or_else(|| {
            ApplicationError::Configuration(
                "OPENAI_API_KEY is not set (or credentials.openai_api_key)".to_string(),
            )
        })
    }

    /// Web search client configuration with credentials applied
    pub fn web_search_config(&self) -> WebSearchConfig {
        WebSearchConfig {
            exa_api_key: secret_str(self.credentials.exa_api_key.as_ref()),
            exa_base_url: self.websearch.exa_base_url.clone(),
            brave_api_key: secret_str(self.credentials.brave_api_key.as_ref()),
            brave_base_url: self.websearch.brave_base_url.clone(),
            timeout_secs: self.websearch.timeout_secs,
            max_results: self.websearch.max_results,
            use_autoprompt: self.websearch.use_autoprompt,
            fallback_enabled: self.websearch.fallback_enabled,
            ..WebSearchConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use domain::EmailStyle;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_sources() {
        let config = AppConfig::load_with_env(None, env(&[])).unwrap();
        assert_eq!(config.pipeline, PipelineSettings::default());
        assert_eq!(config.logging.filter, "info");
        assert!(!config.logging.json);
        assert!(config.export.enabled);
        assert_eq!(config.export.out_dir, PathBuf::from("exports"));
        assert_eq!(config.inference.default_model, "gpt-4o-mini");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_values_are_loaded() {
        let file = toml_file(
            r#"
[inference]
default_model = "gpt-4.1-mini"

[pipeline]
num_companies = 3
email_style = "Consultative"
industries = ["apparel", "footwear"]

[pipeline.sender]
name = "Ada"
company = "Livetrend"

[pipeline.models]
email_writer = "gpt-4o"

[export]
out_dir = "runs"
"#,
        );

        let config = AppConfig::load_with_env(Some(file.path()), env(&[])).unwrap();
        assert_eq!(config.inference.default_model, "gpt-4.1-mini");
        assert_eq!(config.pipeline.num_companies, 3);
        assert_eq!(config.pipeline.email_style, EmailStyle::Consultative);
        assert_eq!(config.pipeline.industries, ["apparel", "footwear"]);
        assert_eq!(config.pipeline.sender.name, "Ada");
        assert_eq!(config.pipeline.models.email_writer.as_deref(), Some("gpt-4o"));
        assert_eq!(config.pipeline.retries, 1);
        assert_eq!(config.export.out_dir, PathBuf::from("runs"));
    }

    #[test]
    fn environment_overrides_file() {
        let file = toml_file("[pipeline]\nnum_companies = 3\n");
        let config = AppConfig::load_with_env(
            Some(file.path()),
            env(&[
                ("OUTREACH_PIPELINE__NUM_COMPANIES", "7"),
                ("OUTREACH_PIPELINE__ALLOW_FALLBACKS", "false"),
                ("OUTREACH_PIPELINE__REGIONS", "EU,US"),
                ("OUTREACH_LOGGING__JSON", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(config.pipeline.num_companies, 7);
        assert!(!config.pipeline.allow_fallbacks);
        assert_eq!(config.pipeline.regions, ["EU", "US"]);
        assert!(config.logging.json);
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let path = Path::new("/nonexistent/outreach-config.toml");
        assert!(AppConfig::load_with_env(Some(path), env(&[])).is_err());
    }

    #[test]
    fn out_of_range_settings_fail_validation() {
        let mut config = AppConfig::default();
        config.pipeline.num_companies = 0;
        assert!(matches!(config.validate(), Err(ApplicationError::Configuration(_))));

        let mut config = AppConfig::default();
        config.websearch.max_results = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn credentials_resolve_from_lookup() {
        let mut credentials = Credentials {
            exa_api_key: Some(SecretString::from("from-config")),
            ..Default::default()
        };
        credentials.resolve_with(|var| match var {
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            "EXA_API_KEY" => Some("from-env".to_string()),
            "BRAVE_API_KEY" => Some("  ".to_string()),
            _ => None,
        });

        assert_eq!(
            credentials.openai_api_key.as_ref().map(ExposeSecret::expose_secret),
            Some("sk-test")
        );
        assert_eq!(
            credentials.exa_api_key.as_ref().map(ExposeSecret::expose_secret),
            Some("from-config")
        );
        assert!(credentials.brave_api_key.is_none());
    }

    #[test]
    fn missing_openai_key_is_configuration_error() {
        let config = AppConfig::default();
        let err = config.openai_api_key().unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn web_search_config_carries_keys() {
        let mut config = AppConfig::default();
        config.credentials.exa_api_key = Some(SecretString::from("exa-key"));
        let search = config.web_search_config();
        assert_eq!(search.exa_api_key.as_deref(), Some("exa-key"));
        assert!(search.brave_api_key.is_none());
        assert_eq!(search.exa_base_url, "https://api.exa.ai");
    }

    #[test]
    fn debug_redacts_credentials() {
        let mut config = AppConfig::default();
        config.credentials.openai_api_key = Some(SecretString::from("sk-secret"));
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sk-secret"));
    }
}
