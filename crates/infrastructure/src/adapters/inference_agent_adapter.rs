//! Inference agent adapter - Implements AgentPort using ai_core
//!
//! Binds an inference engine to fixed instructions and an optional model
//! override, so each pipeline stage talks to its own agent.

use std::sync::Arc;
use std::time::Instant;

use ai_core::{InferenceEngine, InferenceError, InferenceRequest};
use application::ports::{AgentPort, AgentReply};
use application::ApplicationError;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Agent backed by a chat-completions inference engine
pub struct InferenceAgentAdapter {
    engine: Arc<dyn InferenceEngine>,
    name: String,
    instructions: String,
    model: Option<String>,
}

impl std::fmt::Debug for InferenceAgentAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceAgentAdapter")
            .field("name", &self.name)
            .field("model", &self.model())
            .field("instructions_len", &self.instructions.len())
            .finish_non_exhaustive()
    }
}

impl InferenceAgentAdapter {
    /// Create an agent with the engine's default model
    pub fn new(
        engine: Arc<dyn InferenceEngine>,
        name: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            name: name.into(),
            instructions: instructions.into(),
            model: None,
        }
    }

    /// Use a specific model for this agent
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Model this agent requests
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.engine.default_model())
    }

    /// Instructions sent as the system message
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Convert ai_core error to application error
    fn map_error(e: InferenceError) -> ApplicationError {
        match e {
            InferenceError::Unauthorized(msg) => ApplicationError::NotAuthorized(msg),
            InferenceError::RateLimited => ApplicationError::RateLimited,
            InferenceError::ConnectionFailed(msg) => {
                ApplicationError::ExternalService(format!("Inference connection failed: {msg}"))
            },
            other => ApplicationError::Inference(other.to_string()),
        }
    }
}

#[async_trait]
impl AgentPort for InferenceAgentAdapter {
    #[instrument(skip(self, prompt), fields(agent = %self.name, model = %self.model(), prompt_len = prompt.len()))]
    async fn run(&self, prompt: &str) -> Result<AgentReply, ApplicationError> {
        let start = Instant::now();

        let mut request = InferenceRequest::with_system(&self.instructions, prompt);
        if let Some(model) = &self.model {
            request = request.with_model(model);
        }

        let response = self.engine.generate(request).await.map_err(Self::map_error)?;

        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;
        info!(
            agent = %self.name,
            model = %response.model,
            latency_ms,
            reply_len = response.content.len(),
            "Agent run completed"
        );
        if let Some(usage) = &response.usage {
            debug!(total_tokens = usage.total_tokens, "Token usage");
        }

        Ok(AgentReply::new(response.content, response.model))
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}
