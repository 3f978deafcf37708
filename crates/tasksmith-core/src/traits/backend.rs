// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model backend trait for generation providers (Ollama, hosted APIs).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::GenerationOutcome;

/// A single prompt submission to a model backend.
#[derive(Debug, Clone)]
pub struct BackendRequest {
    /// The assembled user prompt.
    pub prompt: String,
    /// Model identifier to run the prompt against.
    pub model: String,
    /// Optional system prompt.
    pub system: Option<String>,
    /// Sampling temperature.
    pub temperature: f64,
    /// Token ceiling for the response.
    pub max_tokens: u32,
}

/// One turn in a chat-style exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "user", "assistant", or "system".
    pub role: String,
    pub content: String,
}

/// Adapter for model generation backends.
///
/// Implementations must surface timeouts and transport errors as a failed
/// [`GenerationOutcome`], never as an `Err` — the orchestrator owns the
/// decision of what to do with a failed attempt, and no retry policy is
/// built into this boundary.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Submits a prompt and returns the generation outcome.
    async fn submit(&self, request: BackendRequest) -> GenerationOutcome;

    /// Lists model identifiers the backend currently serves.
    ///
    /// Degrades to an empty list when the backend is unreachable.
    async fn list_models(&self) -> Vec<String>;

    /// Whether the backend answers at all.
    async fn is_reachable(&self) -> bool;
}
