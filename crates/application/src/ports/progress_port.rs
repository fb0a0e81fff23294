//! Progress port - Stage lifecycle notifications for front ends

#[cfg(test)]
use mockall::automock;

use crate::pipeline::{PipelineStage, StageReport};

/// Receives pipeline progress notifications
#[cfg_attr(test, automock)]
pub trait ProgressReporter: Send + Sync {
    /// A stage is about to run
    fn stage_started(&self, stage: PipelineStage);

    /// A stage finished
    fn stage_finished(&self, stage: PipelineStage, report: &StageReport);
}

/// Reporter that ignores all notifications
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn stage_started(&self, _stage: PipelineStage) {}

    fn stage_finished(&self, _stage: PipelineStage, _report: &StageReport) {}
}
