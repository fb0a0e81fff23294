//! Sender identity used in email signatures

use serde::{Deserialize, Serialize};

/// Person and company on whose behalf emails are drafted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    /// Sender's name
    #[serde(default)]
    pub name: String,

    /// Sender's company
    #[serde(default = "default_company")]
    pub company: String,
}

fn default_company() -> String {
    "Livetrend".to_string()
}

impl Default for Sender {
    fn default() -> Self {
        Self {
            name: String::new(),
            company: default_company(),
        }
    }
}

impl Sender {
    /// Create a sender
    pub fn new(name: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            company: company.into(),
        }
    }

    /// Lowercased alphanumeric form of the company name, used to keep the
    /// sender's own domains out of prospect lists
    pub fn company_token(&self) -> String {
        self.company
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .flat_map(|c| c.to_lowercase())
            .collect()
    }
}
