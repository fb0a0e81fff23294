//! Contact discovery stage

use std::fmt;

use async_trait::async_trait;
use domain::{Company, CompaniesPayload, Contact, ContactsPayload, MAX_CONTACTS_PER_COMPANY};
use tracing::debug;

use crate::extraction;
use crate::fallbacks;
use crate::pipeline::{PipelineStage, Stage, prompts};
use crate::ports::SearchPort;

/// Enforce contact limits and inferred-email rules on model output
///
/// Each group keeps at most [`MAX_CONTACTS_PER_COMPANY`] contacts with
/// distinct names. Inferred emails are rebuilt as `first.last@<domain>` from
/// the matching company's website; when no domain is known the contact
/// loses its inferred flag instead.
pub fn normalize_contacts(
    payload: ContactsPayload,
    companies: &CompaniesPayload,
) -> ContactsPayload {
    let mut groups = payload.companies;

    for group in &mut groups {
        let domain = companies
            .companies
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(group.company.trim()))
            .map(Company::domain)
            .unwrap_or_default();

        let mut kept = Vec::with_capacity(MAX_CONTACTS_PER_COMPANY);
        for mut contact in group.contacts.drain(..) {
            if kept.len() >= MAX_CONTACTS_PER_COMPANY {
                break;
            }
            if kept.iter().any(|c: &Contact| c.name.eq_ignore_ascii_case(&contact.name)) {
                debug!(person = %contact.name, "Skipping duplicate contact");
                continue;
            }
            if contact.inferred {
                match extraction::infer_email(&contact.name, &domain) {
                    Some(email) => contact.email = Some(email),
                    None => contact.inferred = false,
                }
            }
            kept.push(contact);
        }
        group.contacts = kept;
    }

    ContactsPayload::new(groups)
}

/// Finds decision makers at the discovered companies
pub struct ContactStage<'a> {
    /// Discovered companies
    pub companies: &'a CompaniesPayload,
    /// Target company description
    pub target: &'a str,
    /// Sender's offering description
    pub offering: &'a str,
    /// Search used by the fallback
    pub search: &'a dyn SearchPort,
}

impl fmt::Debug for ContactStage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactStage")
            .field("companies", &self.companies)
            .field("target", &self.target)
            .field("offering", &self.offering)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Stage for ContactStage<'_> {
    type Output = ContactsPayload;

    fn kind(&self) -> PipelineStage {
        PipelineStage::Contacts
    }

    fn prompt(&self) -> String {
        prompts::contacts_prompt(self.companies, self.target, self.offering)
    }

    fn normalize(&self, payload: ContactsPayload) -> ContactsPayload {
        normalize_contacts(payload, self.companies)
    }

    async fn fallback(&self) -> ContactsPayload {
        fallbacks::find_contacts(self.search, self.companies).await
    }
}

#[cfg(test)]
mod tests {
    use domain::Payload;

    use super::*;
    use crate::pipeline::{StageOutcome, StageRunner};
    use crate::ports::{AgentReply, MockAgentPort, MockSearchPort};

    fn cos() -> CompaniesPayload {
        CompaniesPayload::new(vec![Company::new("COS", "https://www.cos.com", "")])
    }

    fn group(company: &str, contacts: Vec<Contact>) -> ContactsPayload {
        ContactsPayload::new(vec![domain::ContactsPerCompany {
            company: company.to_string(),
            contacts,
        }])
    }

    #[test]
    fn normalize_caps_contacts_and_rebuilds_inferred_emails() {
        let payload = group(
            "cos",
            vec![
                Contact::new("Jane Doe", "Head of Buying")
                    .with_inferred_email(Some("x@gmail.com".to_string())),
                Contact::new("JANE DOE", "Buyer"),
                Contact::new("Max Muster", "Merchandising Director"),
                Contact::new("Eva Late", "Founder"),
            ],
        );

        let normalized = normalize_contacts(payload, &cos());
        let contacts = normalized.for_company("cos");

        assert_eq!(contacts.len(), MAX_CONTACTS_PER_COMPANY);
        assert_eq!(contacts[0].email.as_deref(), Some("jane.doe@cos.com"));
        assert!(contacts[0].inferred);
        assert_eq!(contacts[1].name, "Max Muster");
    }

    #[test]
    fn normalize_keeps_observed_emails() {
        let mut observed = Contact::new("Jane Doe", "Buyer");
        observed.email = Some("press@cos.com".to_string());

        let normalized = normalize_contacts(group("COS", vec![observed.clone()]), &cos());
        assert_eq!(normalized.for_company("COS"), [observed]);
    }

    #[test]
    fn normalize_clears_inferred_flag_for_unknown_company() {
        let payload = group(
            "Arket",
            vec![
                Contact::new("Jane Doe", "Buyer")
                    .with_inferred_email(Some("jane@arket.com".to_string())),
            ],
        );

        let normalized = normalize_contacts(payload, &cos());
        let contact = &normalized.for_company("Arket")[0];
        assert!(!contact.inferred);
        assert_eq!(contact.email.as_deref(), Some("jane@arket.com"));
    }

    #[tokio::test]
    async fn model_contacts_are_normalized() {
        let companies = cos();
        let search = MockSearchPort::new();
        let stage = ContactStage {
            companies: &companies,
            target: "t",
            offering: "o",
            search: &search,
        };

        let mut agent = MockAgentPort::new();
        agent.expect_name().return_const("ContactFinderAgent".to_string());
        agent.expect_run().times(1).returning(|_| {
            Ok(AgentReply::new(
                r#"{"companies": [{"company": "COS", "contacts": [
                    {"name": "Jane Doe", "role": "Head of Buying", "email": "x@gmail.com", "inferred": true},
                    {"name": "Max Muster", "role": "Merchandising Director", "email": null, "inferred": true},
                    {"name": "Eva Late", "role": "Founder", "email": null, "inferred": false}
                ]}]}"#,
                "test-model",
            ))
        });

        let result = StageRunner::new(&agent, 1, true).run(&stage).await.unwrap();

        assert_eq!(result.report.outcome, StageOutcome::Success { attempt: 1 });
        let contacts = result.payload.for_company("COS");
        assert_eq!(contacts.len(), MAX_CONTACTS_PER_COMPANY);
        for contact in contacts {
            assert!(contact.inferred);
            let email = extraction::infer_email(&contact.name, "cos.com");
            assert_eq!(contact.email, email);
        }
    }

    #[test]
    fn parses_contacts_with_null_inferred() {
        let companies = CompaniesPayload::new(vec![Company::new("COS", "https://cos.com", "")]);
        let search = MockSearchPort::new();
        let stage = ContactStage {
            companies: &companies,
            target: "t",
            offering: "o",
            search: &search,
        };

        let payload = stage.parse(
            r#"{"companies": [{"company": "COS", "contacts": [{"name": "Jane Doe", "role": "Buyer", "inferred": null}]}]}"#,
        );
        assert_eq!(payload.record_count(), 1);
        assert!(!payload.for_company("COS")[0].inferred);
        assert!(stage.prompt().contains(r#""name":"COS""#));
    }
}
