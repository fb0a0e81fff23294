//! Agent port - Interface for instructed language-model agents
//!
//! An agent is a model bound to fixed instructions. Each pipeline stage
//! owns one agent and sends it a single prompt per attempt.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Reply produced by an agent run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReply {
    /// Raw reply text, possibly wrapping a JSON payload in prose
    pub text: String,
    /// Model that produced the reply
    pub model: String,
}

impl AgentReply {
    /// Create a reply
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
        }
    }
}

/// Port for running an instructed agent
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AgentPort: Send + Sync {
    /// Run the agent on a prompt and return its reply text
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying model call fails. Errors for which
    /// [`ApplicationError::is_fatal`] holds end the pipeline run.
    async fn run(&self, prompt: &str) -> Result<AgentReply, ApplicationError>;

    /// Agent name used in logs
    fn name(&self) -> String;
}
