//! Drafted outreach emails

use serde::{Deserialize, Serialize};

use super::Payload;

/// An outreach email drafted for one contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDraft {
    /// Company name
    #[serde(default)]
    pub company: String,

    /// Contact name
    #[serde(default)]
    pub contact: String,

    /// Subject line
    pub subject: String,

    /// Body, including any trailing follow-up block
    pub body: String,
}

impl EmailDraft {
    /// Create an email draft
    pub fn new(
        company: impl Into<String>,
        contact: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            contact: contact.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Approximate body length in words
    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }
}

/// Payload of the email writing stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailsPayload {
    /// Drafted emails, in generation order
    #[serde(default)]
    pub emails: Vec<EmailDraft>,
}

impl EmailsPayload {
    /// Wrap a list of drafts
    pub const fn new(emails: Vec<EmailDraft>) -> Self {
        Self { emails }
    }
}

impl Payload for EmailsPayload {
    fn record_count(&self) -> usize {
        self.emails.len()
    }
}
