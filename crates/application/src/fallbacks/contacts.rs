//! Decision-maker discovery from role searches

use domain::{
    CompaniesPayload, Contact, ContactsPayload, ContactsPerCompany, MAX_CONTACTS_PER_COMPANY,
};
use tracing::{debug, info};

use super::search_or_empty;
use crate::extraction;
use crate::ports::{SearchOptions, SearchPort};

/// Roles searched for, in priority order
pub const CONTACT_ROLES: [&str; 7] = [
    "Head of Buying",
    "Merchandising Director",
    "VP Merchandising",
    "GTM Lead",
    "Partnerships Manager",
    "Product Marketing",
    "Founder",
];

/// Hits requested per role query
const HITS_PER_ROLE: usize = 2;

/// Find up to two contacts per company by searching for role holders
///
/// Person names are taken from hit titles; emails are inferred as
/// `first.last@domain` and flagged as inferred. Every company gets an
/// entry, possibly with no contacts.
pub async fn find_contacts(
    search: &dyn SearchPort,
    companies: &CompaniesPayload,
) -> ContactsPayload {
    let mut groups = Vec::with_capacity(companies.companies.len());

    for company in &companies.companies {
        let domain = company.domain();
        let brand = company.brand();
        let mut contacts: Vec<Contact> = Vec::new();

        for role in CONTACT_ROLES {
            if contacts.len() >= MAX_CONTACTS_PER_COMPANY {
                break;
            }

            let query = format!("{role} {brand} email OR contact");
            for hit in search_or_empty(search, &query, SearchOptions::new(HITS_PER_ROLE)).await {
                let Some(person) = extraction::person_name(&hit.title) else {
                    continue;
                };
                if contacts.iter().any(|c| c.name == person) {
                    debug!(person = %person, "Skipping duplicate contact");
                    continue;
                }
                let email = extraction::infer_email(&person, &domain);
                contacts.push(
                    Contact::new(person, role)
                        .with_inferred_email(email)
                        .with_source(hit.url),
                );
            }
        }

        contacts.truncate(MAX_CONTACTS_PER_COMPANY);
        info!(company = %company.name, found = contacts.len(), "Contact fallback finished");
        groups.push(ContactsPerCompany {
            company: company.name.clone(),
            contacts,
        });
    }

    ContactsPayload::new(groups)
}
