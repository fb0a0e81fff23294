//! Deterministic email drafts used when the email model produces nothing

use domain::{
    CompaniesPayload, Contact, ContactsPayload, EmailDraft, EmailStyle, EmailsPayload,
    ResearchPayload, Sender,
};

use crate::extraction;

/// Bullet used when no clean insight is available for a company
pub const GENERIC_OBSERVATION: &str = "A relevant market observation for your category";

/// Insights quoted per email
const INSIGHTS_PER_EMAIL: usize = 2;

/// Subject line for a company
pub fn subject_for(company: &str) -> String {
    format!("{company} — sharper buying decisions with trend data")
}

fn render_body(
    contact: &Contact,
    brand: &str,
    insights: &[&str],
    sender: &Sender,
    style: EmailStyle,
) -> String {
    let observations = if insights.is_empty() {
        format!("\n- {GENERIC_OBSERVATION}")
    } else {
        insights.iter().map(|i| format!("\n- {i}")).collect()
    };

    format!(
        "Hello {contact},\n\n\
         I'm reaching out ({tone}) on behalf of {sender_company}. We help buying and \
         merchandising teams build collections that sell, with:\n\
         - data-driven trend analysis\n\
         - real-time competitive intelligence\n\
         - assortment planning and pricing support\n\n\
         What caught our attention about {brand}:{observations}\n\n\
         Would you be open to a 15-minute call to see how this could de-risk your next buying cycle?\n\n\
         Best regards,\n\
         {sender_name} — {sender_company}",
        contact = contact.name,
        tone = style.tone_hint(),
        sender_company = sender.company,
        sender_name = sender.name,
    )
}

/// Render one email per contact per company, in company order
///
/// Subjects and bodies name the brand derived from the company website.
/// Companies without contacts get a single email to a "Team" placeholder.
/// Each email quotes up to two non-noisy insights, or a generic
/// observation when none survive.
pub fn template_emails(
    companies: &CompaniesPayload,
    contacts: &ContactsPayload,
    research: &ResearchPayload,
    sender: &Sender,
    style: EmailStyle,
) -> EmailsPayload {
    let mut emails = Vec::new();

    for company in &companies.companies {
        let recipients = match contacts.for_company(&company.name) {
            [] => vec![Contact::team()],
            found => found.to_vec(),
        };

        let insights: Vec<&str> = research
            .for_company(&company.name)
            .iter()
            .map(String::as_str)
            .filter(|i| !extraction::is_noisy(i))
            .take(INSIGHTS_PER_EMAIL)
            .collect();

        let brand = company.brand();
        for contact in &recipients {
            emails.push(EmailDraft::new(
                company.name.clone(),
                contact.name.clone(),
                subject_for(&brand),
                render_body(contact, &brand, &insights, sender, style),
            ));
        }
    }

    EmailsPayload::new(emails)
}
