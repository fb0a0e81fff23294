//! Email style value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Tone of the generated outreach emails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EmailStyle {
    /// Concise B2B email with a clear value proposition and a soft CTA
    #[default]
    Professional,
    /// Friendly, conversational email
    Casual,
    /// Direct cold email
    Cold,
    /// Challenge-framing email ending in a diagnostic-call invite
    Consultative,
}

impl EmailStyle {
    /// All styles in display order
    pub const ALL: [Self; 4] = [
        Self::Professional,
        Self::Casual,
        Self::Cold,
        Self::Consultative,
    ];

    /// Instruction handed to the email-writing model
    #[must_use]
    pub const fn instruction(&self) -> &'static str {
        match self {
            Self::Professional => {
                "Write concise, professional B2B outreach emails with a clear value proposition and soft CTA."
            },
            Self::Casual => {
                "Write a friendly, conversational email with a single value point and simple question CTA."
            },
            Self::Cold => {
                "Write a direct cold email with a strong lead sentence and single-sentence CTA."
            },
            Self::Consultative => {
                "Write a consultative email framing 2-3 challenges and a diagnostic-call CTA."
            },
        }
    }

    /// Short tone hint used by the template fallback
    #[must_use]
    pub const fn tone_hint(&self) -> &'static str {
        match self {
            Self::Professional => "clear and concise",
            Self::Casual => "friendly and conversational",
            Self::Cold => "direct and ROI-focused",
            Self::Consultative => "consultative and diagnostic",
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Professional => "Professional",
            Self::Casual => "Casual",
            Self::Cold => "Cold",
            Self::Consultative => "Consultative",
        }
    }
}

impl fmt::Display for EmailStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EmailStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownEmailStyle(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_professional() {
        assert_eq!(EmailStyle::default(), EmailStyle::Professional);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("cold".parse::<EmailStyle>().unwrap(), EmailStyle::Cold);
        assert_eq!(
            " Consultative ".parse::<EmailStyle>().unwrap(),
            EmailStyle::Consultative
        );
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!("Shouty".parse::<EmailStyle>().is_err());
    }

    #[test]
    fn instructions_are_distinct() {
        let mut seen: Vec<&str> = EmailStyle::ALL.iter().map(EmailStyle::instruction).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(EmailStyle::Casual.to_string(), "Casual");
    }

    #[test]
    fn serde_uses_variant_names() {
        let json = serde_json::to_string(&EmailStyle::Cold).unwrap();
        assert_eq!(json, "\"Cold\"");
        let style: EmailStyle = serde_json::from_str("\"Casual\"").unwrap();
        assert_eq!(style, EmailStyle::Casual);
    }
}
