//! Stage prompts
//!
//! Each prompt states the task, the exact JSON contract expected back, and
//! the upstream records serialized as JSON.

use domain::{CompaniesPayload, ContactsPayload, EmailsPayload, ResearchPayload, Sender};
use serde::Serialize;

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Company discovery prompt
pub fn companies_prompt(target: &str, offering: &str, limit: usize) -> String {
    format!(
        "Find companies that match the targeting below. Return ONLY JSON with the key \
         'companies': a list of objects with keys name, website and why_fit (1-2 lines). \
         Return at most {limit} companies.\n\n\
         Target companies: {target}\n\
         Offering: {offering}\n\
         Limit: {limit}"
    )
}

/// Contact discovery prompt
pub fn contacts_prompt(companies: &CompaniesPayload, target: &str, offering: &str) -> String {
    format!(
        "For each company, find 1-2 relevant decision makers (buying, merchandising, GTM, \
         partnerships, product marketing or founders). If no email address is found, infer \
         one from common naming patterns and set inferred=true. Return ONLY JSON with the key \
         'companies': a list of objects with keys company and contacts, where each contact has \
         name, role, email, inferred and source.\n\n\
         Companies: {companies}\n\
         Target companies: {target}\n\
         Offering: {offering}",
        companies = to_json(&companies.companies),
    )
}

/// Research prompt
pub fn research_prompt(companies: &CompaniesPayload) -> String {
    format!(
        "For each company, collect 2-4 concise, specific insights from its website \
         (about page, blog, product pages) and from Reddit discussions. Return ONLY JSON with \
         the key 'companies': a list of objects with keys company and insights (a list of \
         single-sentence strings).\n\n\
         Companies: {}",
        to_json(&companies.companies)
    )
}

/// Email writing prompt
pub fn emails_prompt(
    companies: &CompaniesPayload,
    contacts: &ContactsPayload,
    research: &ResearchPayload,
    sender: &Sender,
) -> String {
    format!(
        "Write personalized B2B outreach emails of 120-160 words, one per contact. Weave in \
         1-2 personalization lines drawn from the research insights. Sign with the sender's \
         name and company. Return ONLY JSON with the key 'emails': a list of objects with keys \
         company, contact, subject, body and optionally followups (a list of short follow-up \
         lines).\n\n\
         Companies: {companies}\n\
         Contacts: {contacts}\n\
         Research: {research}\n\
         Sender: {sender}",
        companies = to_json(&companies.companies),
        contacts = to_json(&contacts.companies),
        research = to_json(&research.companies),
        sender = to_json(sender),
    )
}

/// Quality-check prompt
pub fn quality_prompt(emails: &EmailsPayload) -> String {
    format!(
        "Review each email: it must be specific rather than generic, reference at least one \
         insight, and avoid spammy wording. Return ONLY JSON with the key 'qc': a list of \
         objects with keys ok (boolean) and notes (string), in the same order as the emails.\n\n\
         Emails: {}",
        to_json(&emails.emails)
    )
}
