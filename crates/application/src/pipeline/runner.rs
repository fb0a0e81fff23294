//! Retry-then-fallback stage execution
//!
//! A stage sends one prompt per attempt to its agent and parses the reply
//! into a payload. The first non-empty payload wins; if every attempt comes
//! back empty the stage's search heuristic runs (when fallbacks are
//! allowed), otherwise the stage yields an empty payload.

use std::fmt;

use async_trait::async_trait;
use domain::Payload;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::PipelineStage;
use crate::error::ApplicationError;
use crate::parser;
use crate::ports::AgentPort;

/// How a stage obtained its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// The model produced a usable payload on the given attempt (1-based)
    Success {
        /// Attempt that succeeded
        attempt: u32,
    },
    /// All attempts failed and the search heuristic produced the payload
    Fallback,
    /// All attempts failed and fallbacks are disabled
    Empty,
    /// The stage did not run
    Skipped,
}

impl StageOutcome {
    /// Short label for progress output
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Success { .. } => "model",
            Self::Fallback => "fallback",
            Self::Empty => "empty",
            Self::Skipped => "skipped",
        }
    }
}

/// Summary of one stage execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    /// How the payload was obtained
    pub outcome: StageOutcome,
    /// Model attempts made
    pub attempts: u32,
    /// Records in the resulting payload
    pub records: usize,
}

impl StageReport {
    /// Report for a stage that did not run
    #[must_use]
    pub const fn skipped() -> Self {
        Self {
            outcome: StageOutcome::Skipped,
            attempts: 0,
            records: 0,
        }
    }
}

/// Payload produced by a stage together with its report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageResult<T> {
    /// Stage payload
    pub payload: T,
    /// Execution summary
    pub report: StageReport,
}

impl<T: Payload> StageResult<T> {
    fn new(payload: T, outcome: StageOutcome, attempts: u32) -> Self {
        let report = StageReport {
            outcome,
            attempts,
            records: payload.record_count(),
        };
        Self { payload, report }
    }

    /// Result of a stage that did not run
    #[must_use]
    pub fn skipped() -> Self {
        Self {
            payload: T::default(),
            report: StageReport::skipped(),
        }
    }
}

/// A pipeline stage: prompt, parsing, normalization and fallback
#[async_trait]
pub trait Stage: Send + Sync {
    /// Payload type produced by this stage
    type Output: Payload + DeserializeOwned + Send;

    /// Which pipeline stage this is
    fn kind(&self) -> PipelineStage;

    /// Prompt sent on every attempt
    fn prompt(&self) -> String;

    /// Parse a model reply into a payload
    fn parse(&self, text: &str) -> Self::Output {
        parser::parse_payload(text)
    }

    /// Clean up a non-empty payload produced by the model
    fn normalize(&self, payload: Self::Output) -> Self::Output {
        payload
    }

    /// Produce a payload without the model
    async fn fallback(&self) -> Self::Output;
}

/// Executes stages against an agent with bounded retries
pub struct StageRunner<'a> {
    agent: &'a dyn AgentPort,
    retries: u8,
    allow_fallbacks: bool,
}

impl fmt::Debug for StageRunner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageRunner")
            .field("agent", &self.agent.name())
            .field("retries", &self.retries)
            .field("allow_fallbacks", &self.allow_fallbacks)
            .finish()
    }
}

impl<'a> StageRunner<'a> {
    /// Create a runner making `retries + 1` attempts per stage
    pub fn new(agent: &'a dyn AgentPort, retries: u8, allow_fallbacks: bool) -> Self {
        Self {
            agent,
            retries,
            allow_fallbacks,
        }
    }

    /// Total attempts per stage
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        u32::from(self.retries) + 1
    }

    /// Run a stage to completion
    ///
    /// # Errors
    ///
    /// Returns an error only if the agent fails with a fatal error
    /// (missing or rejected credentials, configuration). All other agent
    /// errors count as empty attempts.
    pub async fn run<S: Stage>(
        &self,
        stage: &S,
    ) -> Result<StageResult<S::Output>, ApplicationError> {
        let kind = stage.kind();
        let prompt = stage.prompt();
        let max_attempts = self.max_attempts();

        for attempt in 1..=max_attempts {
            info!(
                stage = %kind,
                agent = %self.agent.name(),
                attempt,
                max_attempts,
                "Sending stage prompt"
            );

            match self.agent.run(&prompt).await {
                Ok(reply) => {
                    let payload = stage.parse(&reply.text);
                    if !payload.is_empty() {
                        let payload = stage.normalize(payload);
                        info!(
                            stage = %kind,
                            attempt,
                            model = %reply.model,
                            records = payload.record_count(),
                            "Stage succeeded"
                        );
                        return Ok(StageResult::new(
                            payload,
                            StageOutcome::Success { attempt },
                            attempt,
                        ));
                    }
                    debug!(stage = %kind, attempt, "Reply contained no usable payload");
                },
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(stage = %kind, attempt, error = %e, "Agent call failed");
                },
            }
        }

        if !self.allow_fallbacks {
            warn!(stage = %kind, "All attempts empty and fallbacks disabled");
            return Ok(StageResult::new(
                S::Output::default(),
                StageOutcome::Empty,
                max_attempts,
            ));
        }

        info!(stage = %kind, "All attempts empty, running search fallback");
        let payload = stage.fallback().await;
        Ok(StageResult::new(payload, StageOutcome::Fallback, max_attempts))
    }
}
