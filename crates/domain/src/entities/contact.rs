//! Decision-maker contacts per company

use serde::{Deserialize, Deserializer, Serialize};

use super::Payload;

/// Maximum number of contacts kept per company
pub const MAX_CONTACTS_PER_COMPANY: usize = 2;

/// A decision maker at a prospect company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Person name
    pub name: String,

    /// Role or title
    pub role: String,

    /// Email address, observed or inferred
    #[serde(default)]
    pub email: Option<String>,

    /// Whether the email was synthesized from a naming convention
    #[serde(default, deserialize_with = "bool_or_null")]
    pub inferred: bool,

    /// Provenance URL
    #[serde(default)]
    pub source: Option<String>,
}

impl Contact {
    /// Create a contact without email or provenance
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            email: None,
            inferred: false,
            source: None,
        }
    }

    /// Attach an email synthesized from a naming convention
    #[must_use]
    pub fn with_inferred_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self.inferred = true;
        self
    }

    /// Attach a provenance URL
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Placeholder recipient used when a company has no known contact
    pub fn team() -> Self {
        Self::new("Team", "Team")
    }
}

fn bool_or_null<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Contacts found for one company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactsPerCompany {
    /// Company name as produced by discovery
    pub company: String,

    /// Contacts, at most [`MAX_CONTACTS_PER_COMPANY`]
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

/// Payload of the contact discovery stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactsPayload {
    /// Contacts grouped by company
    #[serde(default)]
    pub companies: Vec<ContactsPerCompany>,
}

impl ContactsPayload {
    /// Wrap a list of per-company contact groups
    pub const fn new(companies: Vec<ContactsPerCompany>) -> Self {
        Self { companies }
    }

    /// Contacts recorded for a company name
    pub fn for_company(&self, company: &str) -> &[Contact] {
        self.companies
            .iter()
            .find(|group| group.company == company)
            .map_or(&[], |group| group.contacts.as_slice())
    }
}

impl Payload for ContactsPayload {
    fn record_count(&self) -> usize {
        self.companies.len()
    }
}
