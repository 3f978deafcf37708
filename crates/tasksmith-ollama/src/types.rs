// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Ollama HTTP API.
//!
//! Only the fields Tasksmith reads or writes are modeled; unknown response
//! fields are ignored on deserialization.

use serde::{Deserialize, Serialize};
use tasksmith_core::ChatMessage;

/// Sampling options common to generate and chat requests.
#[derive(Debug, Clone, Serialize)]
pub struct SamplingOptions {
    pub temperature: f64,
    /// Token generation ceiling (Ollama's name for max tokens).
    pub num_predict: u32,
}

/// `POST /api/generate` request body.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Always false: Tasksmith consumes complete responses.
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub options: SamplingOptions,
}

/// `POST /api/generate` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: String,
    /// Tokens generated; absent when the model reports nothing.
    #[serde(default)]
    pub eval_count: u32,
}

/// `POST /api/chat` request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub options: SamplingOptions,
}

/// `POST /api/chat` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub message: ChatResponseMessage,
    #[serde(default)]
    pub eval_count: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub content: String,
}

/// `GET /api/tags` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelTag {
    pub name: String,
}
