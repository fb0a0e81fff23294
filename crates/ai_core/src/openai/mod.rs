//! OpenAI-compatible inference engine
//!
//! Talks to any server exposing `POST /chat/completions` with bearer
//! authentication.

mod client;

pub use client::OpenAiInferenceEngine;
