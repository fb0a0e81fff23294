//! Single-shot quality review of drafted emails

use domain::{EmailsPayload, Payload, QcPayload, QcResult};
use tracing::{info, warn};

use super::{StageOutcome, StageReport, prompts};
use crate::error::ApplicationError;
use crate::parser;
use crate::ports::AgentPort;

/// Note attached to padded verdicts
pub const MISSING_VERDICT_NOTE: &str = "No verdict returned";

/// Pad or truncate verdicts so that there is exactly one per email
pub fn align_verdicts(mut verdicts: Vec<QcResult>, emails: usize) -> Vec<QcResult> {
    verdicts.truncate(emails);
    verdicts.resize_with(emails, || QcResult::failed(MISSING_VERDICT_NOTE));
    verdicts
}

/// Review every email once, without retries or fallback
///
/// Returns an empty list without calling the agent when there are no
/// emails; otherwise exactly one verdict per email, in email order.
///
/// # Errors
///
/// Returns an error only if the agent fails with a fatal error.
pub async fn run_quality_check(
    agent: &dyn AgentPort,
    emails: &EmailsPayload,
) -> Result<(Vec<QcResult>, StageReport), ApplicationError> {
    let count = emails.record_count();
    if count == 0 {
        return Ok((Vec::new(), StageReport::skipped()));
    }

    info!(agent = %agent.name(), emails = count, "Sending quality-check prompt");

    let (verdicts, outcome) = match agent.run(&prompts::quality_prompt(emails)).await {
        Ok(reply) => {
            let payload: QcPayload = parser::parse_payload(&reply.text);
            let outcome = if payload.is_empty() {
                StageOutcome::Empty
            } else {
                StageOutcome::Success { attempt: 1 }
            };
            if payload.record_count() != count {
                warn!(
                    expected = count,
                    received = payload.record_count(),
                    "Quality check returned a mismatched number of verdicts"
                );
            }
            (align_verdicts(payload.qc, count), outcome)
        },
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => {
            warn!(error = %e, "Quality check failed");
            let note = format!("Quality check failed: {e}");
            (vec![QcResult::failed(note); count], StageOutcome::Empty)
        },
    };

    let report = StageReport {
        outcome,
        attempts: 1,
        records: verdicts.len(),
    };
    Ok((verdicts, report))
}
