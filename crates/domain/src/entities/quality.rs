//! Quality-check verdicts, aligned by position with the email list

use serde::{Deserialize, Serialize};

use super::Payload;

/// Verdict for the email at the same index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QcResult {
    /// Whether the email passed
    #[serde(default)]
    pub ok: bool,

    /// Reviewer notes
    #[serde(default)]
    pub notes: String,
}

impl QcResult {
    /// Failed verdict with a note
    pub fn failed(notes: impl Into<String>) -> Self {
        Self {
            ok: false,
            notes: notes.into(),
        }
    }
}

/// Payload of the quality-check stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QcPayload {
    /// Verdicts in email order
    #[serde(default)]
    pub qc: Vec<QcResult>,
}

impl Payload for QcPayload {
    fn record_count(&self) -> usize {
        self.qc.len()
    }
}
