//! Search-based heuristics used when a model stage yields nothing usable
//!
//! Every heuristic is best-effort: search errors are logged and treated as
//! empty result lists, so a fallback always produces a (possibly empty)
//! payload and never fails the pipeline.

mod companies;
mod contacts;
mod research;
mod templates;

pub use companies::{company_query, discover_companies};
pub use contacts::{CONTACT_ROLES, find_contacts};
pub use research::collect_research;
pub use templates::{GENERIC_OBSERVATION, subject_for, template_emails};

use domain::SearchHit;
use tracing::{debug, warn};

use crate::ports::{SearchOptions, SearchPort};

/// Run a search, mapping any failure to an empty hit list
async fn search_or_empty(
    search: &dyn SearchPort,
    query: &str,
    options: SearchOptions,
) -> Vec<SearchHit> {
    match search.search(query, options).await {
        Ok(hits) => {
            debug!(query = %query, hits = hits.len(), "Fallback search completed");
            hits
        },
        Err(e) => {
            warn!(query = %query, error = %e, "Fallback search failed, treating as empty");
            Vec::new()
        },
    }
}
