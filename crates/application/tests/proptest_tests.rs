//! Property-based tests for the text heuristics and the structured parser
//!
//! These tests use proptest to verify invariants across many random inputs.

use application::extraction::{self, ExclusionList};
use application::parser;
use application::pipeline::{align_verdicts, clean_research, normalize_companies};
use domain::{
    CompaniesPayload, Company, MAX_INSIGHTS_PER_COMPANY, QcResult, ResearchPayload,
    ResearchPerCompany, Sender, Website,
};
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// Parser Property Tests
// ============================================================================

mod parser_tests {
    use super::*;

    proptest! {
        #[test]
        fn never_panics(text in ".*") {
            let _ = parser::parse_structured(&text, json!({}));
        }

        #[test]
        fn unparsable_text_returns_exact_default(text in "x[a-zA-Z .,!?]*") {
            let default = json!({"companies": []});
            prop_assert_eq!(parser::parse_structured(&text, default.clone()), default);
        }

        #[test]
        fn embedded_object_is_recovered(prefix in "[a-zA-Z ]*", suffix in "[a-zA-Z ]*", n in 0u32..1000) {
            let text = format!("{prefix} {{\"n\": {n}}} {suffix}");
            prop_assert_eq!(parser::parse_structured(&text, json!(null)), json!({"n": n}));
        }
    }
}

// ============================================================================
// Extraction Property Tests
// ============================================================================

mod extraction_tests {
    use super::*;

    proptest! {
        #[test]
        fn why_fit_is_bounded(text in ".{0,400}") {
            prop_assert!(extraction::why_fit(&text).chars().count() <= extraction::WHY_FIT_MAX_CHARS);
        }

        #[test]
        fn inferred_email_is_lowercase_first_last(
            first in "[A-Z][a-z]{1,10}",
            last in "[A-Z][a-z]{1,10}",
            domain in "[a-z]{2,10}\\.(com|de)",
        ) {
            let email = extraction::infer_email(&format!("{first} {last}"), &domain).unwrap();
            prop_assert_eq!(email, format!("{first}.{last}@{domain}").to_lowercase());
        }

        #[test]
        fn key_points_are_within_bounds(text in "[a-zA-Z ,.!?]{0,600}", brand in "[A-Z][a-z]{2,8}") {
            for point in extraction::key_points(&text, &brand) {
                prop_assert!(extraction::insight_length_ok(&point));
                prop_assert!(!extraction::is_noisy(&point));
            }
        }
    }
}

// ============================================================================
// Normalization Property Tests
// ============================================================================

mod normalization_tests {
    use super::*;

    fn company() -> impl Strategy<Value = Company> {
        (
            "[A-Z][a-z]{2,8}",
            "(cos|arket|mango|livetrend|zara)\\.(com|co)",
            prop::sample::select(vec!["Fashion retailer", "Industrial pumps", "Apparel brand", ""]),
        )
            .prop_map(|(name, domain, why)| Company::new(name, format!("https://{domain}"), why))
    }

    proptest! {
        #[test]
        fn companies_are_unique_allowed_and_limited(
            companies in prop::collection::vec(company(), 0..12),
            limit in 1usize..=10,
        ) {
            let exclusions =
                ExclusionList::new(&["livetrend.co".to_string()], &Sender::new("Ada", "Livetrend"));
            let normalized = normalize_companies(CompaniesPayload::new(companies), limit, &exclusions);

            prop_assert!(normalized.companies.len() <= limit);
            let mut domains: Vec<String> = normalized
                .companies
                .iter()
                .map(|c| Website::domain_of(&c.website))
                .collect();
            for domain in &domains {
                prop_assert!(!exclusions.is_excluded(domain));
            }
            let total = domains.len();
            domains.sort();
            domains.dedup();
            prop_assert_eq!(domains.len(), total);
        }

        #[test]
        fn research_is_capped_and_deduplicated(
            insights in prop::collection::vec("(New|new) (season|collection|pricing) [a-z ]{30,120}", 0..12),
        ) {
            let payload = ResearchPayload::new(vec![ResearchPerCompany {
                company: "COS".to_string(),
                insights,
            }]);
            let cleaned = clean_research(payload);
            let kept = cleaned.for_company("COS");

            prop_assert!(kept.len() <= MAX_INSIGHTS_PER_COMPANY);
            let mut keys: Vec<String> = kept.iter().map(|i| extraction::dedupe_key(i)).collect();
            let total = keys.len();
            keys.sort();
            keys.dedup();
            prop_assert_eq!(keys.len(), total);
            for insight in kept {
                prop_assert!(extraction::insight_length_ok(insight));
            }
        }

        #[test]
        fn verdicts_align_with_emails(received in 0usize..8, emails in 0usize..8) {
            let verdicts = vec![QcResult::default(); received];
            prop_assert_eq!(align_verdicts(verdicts, emails).len(), emails);
        }
    }
}
