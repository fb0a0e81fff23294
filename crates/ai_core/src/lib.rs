//! AI Core - Inference engine
//!
//! Provides the abstraction the pipeline agents run on, with an
//! OpenAI-compatible chat-completions implementation.

pub mod config;
pub mod error;
pub mod openai;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use openai::OpenAiInferenceEngine;
pub use ports::{InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage};
