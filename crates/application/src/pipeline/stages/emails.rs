//! Email writing stage

use async_trait::async_trait;
use domain::{
    CompaniesPayload, ContactsPayload, EmailStyle, EmailsPayload, ResearchPayload, Sender,
};
use serde_json::{Value, json};

use crate::fallbacks;
use crate::parser;
use crate::pipeline::{PipelineStage, Stage, prompts};

/// Append each email's `followups` list to its body
///
/// Emails with a non-empty list gain a `---` separated "Follow-ups" block;
/// the list itself is left for deserialization to ignore.
pub fn fold_followups(value: &mut Value) {
    let Some(emails) = value.get_mut("emails").and_then(Value::as_array_mut) else {
        return;
    };

    for email in emails.iter_mut().filter_map(Value::as_object_mut) {
        let lines: Vec<String> = match email.get("followups").and_then(Value::as_array) {
            Some(items) if !items.is_empty() => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => format!("- {s}"),
                    other => format!("- {other}"),
                })
                .collect(),
            _ => continue,
        };

        let body = email.get("body").and_then(Value::as_str).unwrap_or_default();
        let folded = format!("{body}\n\n---\nFollow-ups:\n{}", lines.join("\n"));
        email.insert("body".to_string(), Value::String(folded));
    }
}

/// Drafts one outreach email per contact
#[derive(Debug)]
pub struct EmailStage<'a> {
    /// Discovered companies
    pub companies: &'a CompaniesPayload,
    /// Contacts per company
    pub contacts: &'a ContactsPayload,
    /// Insights per company
    pub research: &'a ResearchPayload,
    /// Signature identity
    pub sender: &'a Sender,
    /// Tone used by the template fallback
    pub style: EmailStyle,
}

#[async_trait]
impl Stage for EmailStage<'_> {
    type Output = EmailsPayload;

    fn kind(&self) -> PipelineStage {
        PipelineStage::Emails
    }

    fn prompt(&self) -> String {
        prompts::emails_prompt(self.companies, self.contacts, self.research, self.sender)
    }

    fn parse(&self, text: &str) -> EmailsPayload {
        let mut value = parser::parse_structured(text, json!({ "emails": [] }));
        fold_followups(&mut value);
        parser::decode_value(value)
    }

    async fn fallback(&self) -> EmailsPayload {
        fallbacks::template_emails(
            self.companies,
            self.contacts,
            self.research,
            self.sender,
            self.style,
        )
    }
}

#[cfg(test)]
mod tests {
    use domain::{Company, Payload};

    use super::*;

    struct Inputs {
        companies: CompaniesPayload,
        contacts: ContactsPayload,
        research: ResearchPayload,
        sender: Sender,
    }

    impl Inputs {
        fn new() -> Self {
            Self {
                companies: CompaniesPayload::new(vec![Company::new("COS", "https://cos.com", "")]),
                contacts: ContactsPayload::default(),
                research: ResearchPayload::default(),
                sender: Sender::new("Ada", "Livetrend"),
            }
        }

        fn stage(&self) -> EmailStage<'_> {
            EmailStage {
                companies: &self.companies,
                contacts: &self.contacts,
                research: &self.research,
                sender: &self.sender,
                style: EmailStyle::Professional,
            }
        }
    }

    #[test]
    fn folds_followups_into_body() {
        let inputs = Inputs::new();
        let payload = inputs.stage().parse(
            r#"{"emails": [{"company": "COS", "contact": "Jane", "subject": "Hi", "body": "Hello Jane", "followups": ["Quick follow-up?", "Last note"]}]}"#,
        );

        assert_eq!(payload.record_count(), 1);
        assert_eq!(
            payload.emails[0].body,
            "Hello Jane\n\n---\nFollow-ups:\n- Quick follow-up?\n- Last note"
        );
    }

    #[test]
    fn empty_followups_leave_body_untouched() {
        let mut value = json!({"emails": [{"subject": "Hi", "body": "Hello", "followups": []}]});
        fold_followups(&mut value);
        assert_eq!(value["emails"][0]["body"], "Hello");
    }

    #[test]
    fn missing_company_and_contact_default_to_empty() {
        let inputs = Inputs::new();
        let payload = inputs.stage().parse(r#"{"emails": [{"subject": "Hi", "body": "Hello"}]}"#);
        assert_eq!(payload.emails[0].company, "");
        assert_eq!(payload.emails[0].contact, "");
    }

    #[test]
    fn unparsable_reply_is_empty() {
        let inputs = Inputs::new();
        assert!(inputs.stage().parse("I cannot write emails today.").is_empty());
    }

    #[tokio::test]
    async fn fallback_renders_templates() {
        let inputs = Inputs::new();
        let payload = inputs.stage().fallback().await;
        assert_eq!(payload.record_count(), 1);
        assert_eq!(payload.emails[0].contact, "Team");
        assert!(!payload.emails[0].subject.is_empty());
        assert!(payload.emails[0].body.contains("Ada — Livetrend"));
    }
}
