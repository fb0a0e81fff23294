//! Console progress output

use application::{PipelineStage, ProgressReporter, StageOutcome, StageReport};

/// Prints `n/5 <stage>…` lines as the pipeline advances
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleProgress;

impl ConsoleProgress {
    fn summary(report: &StageReport) -> String {
        match report.outcome {
            StageOutcome::Success { attempt } => {
                format!("{} record(s), attempt {attempt}", report.records)
            },
            StageOutcome::Fallback => format!(
                "{} record(s) from search fallback after {} attempt(s)",
                report.records, report.attempts
            ),
            StageOutcome::Empty => format!("no results after {} attempt(s)", report.attempts),
            StageOutcome::Skipped => "skipped".to_string(),
        }
    }
}

impl ProgressReporter for ConsoleProgress {
    fn stage_started(&self, stage: PipelineStage) {
        println!(
            "{}/{} {}…",
            stage.number(),
            PipelineStage::ALL.len(),
            stage.label()
        );
    }

    fn stage_finished(&self, _stage: PipelineStage, report: &StageReport) {
        let marker = match report.outcome {
            StageOutcome::Success { .. } => "✅",
            StageOutcome::Fallback => "🔎",
            StageOutcome::Empty => "⚠️ ",
            StageOutcome::Skipped => "⏭️ ",
        };
        println!("    {marker} {}", Self::summary(report));
    }
}
