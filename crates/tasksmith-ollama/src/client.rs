// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for a local Ollama server.
//!
//! Provides [`OllamaClient`], which handles request construction and
//! translates every transport failure into a failed [`GenerationOutcome`].
//! Generation methods never return `Err`: the engine owns the decision of
//! what a failed attempt means.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use tasksmith_core::{
    BackendRequest, ChatMessage, GenerationOutcome, ModelBackend, TasksmithError,
};

use crate::types::{
    ChatRequest, ChatResponse, GenerateRequest, GenerateResponse, SamplingOptions, TagsResponse,
};

/// Timeout for the lightweight reachability probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for a local Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    /// Creates a client for the given endpoint with a per-request timeout.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, TasksmithError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| TasksmithError::Backend {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Single-prompt generation via `POST /api/generate`.
    pub async fn generate(&self, request: &BackendRequest) -> GenerationOutcome {
        let body = GenerateRequest {
            model: request.model.clone(),
            prompt: request.prompt.clone(),
            stream: false,
            system: request.system.clone(),
            options: SamplingOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        };

        let url = format!("{}/api/generate", self.base_url);
        let response = match self.client.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => return transport_failure(&request.model, &e),
        };

        let status = response.status();
        debug!(status = %status, model = %request.model, "generate response received");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return GenerationOutcome::failure(
                &request.model,
                format!("Ollama returned {status}: {body}"),
            );
        }

        match response.json::<GenerateResponse>().await {
            Ok(parsed) => GenerationOutcome::success(parsed.response, &request.model, parsed.eval_count),
            Err(e) => GenerationOutcome::failure(
                &request.model,
                format!("failed to parse Ollama response: {e}"),
            ),
        }
    }

    /// Multi-turn generation via `POST /api/chat`.
    pub async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        model: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> GenerationOutcome {
        let body = ChatRequest {
            model: model.to_string(),
            messages,
            stream: false,
            options: SamplingOptions {
                temperature,
                num_predict: max_tokens,
            },
        };

        let url = format!("{}/api/chat", self.base_url);
        let response = match self.client.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => return transport_failure(model, &e),
        };

        let status = response.status();
        debug!(status = %status, model, "chat response received");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return GenerationOutcome::failure(model, format!("Ollama returned {status}: {body}"));
        }

        match response.json::<ChatResponse>().await {
            Ok(parsed) => {
                GenerationOutcome::success(parsed.message.content, model, parsed.eval_count)
            }
            Err(e) => {
                GenerationOutcome::failure(model, format!("failed to parse Ollama response: {e}"))
            }
        }
    }

    /// Model names the server currently serves, via `GET /api/tags`.
    ///
    /// An unreachable server degrades to an empty list.
    pub async fn models(&self) -> Vec<String> {
        let url = format!("{}/api/tags", self.base_url);
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "could not list Ollama models");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "could not list Ollama models");
            return Vec::new();
        }

        match response.json::<TagsResponse>().await {
            Ok(tags) => tags.models.into_iter().map(|m| m.name).collect(),
            Err(e) => {
                warn!(error = %e, "could not parse Ollama model list");
                Vec::new()
            }
        }
    }

    /// Whether the server answers its tags endpoint at all.
    pub async fn probe(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).timeout(PROBE_TIMEOUT).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Map a transport error onto a failed outcome, distinguishing timeouts.
fn transport_failure(model: &str, error: &reqwest::Error) -> GenerationOutcome {
    if error.is_timeout() {
        GenerationOutcome::failure(model, "Request timed out")
    } else {
        GenerationOutcome::failure(model, format!("HTTP request failed: {error}"))
    }
}

#[async_trait::async_trait]
impl ModelBackend for OllamaClient {
    async fn submit(&self, request: BackendRequest) -> GenerationOutcome {
        self.generate(&request).await
    }

    async fn list_models(&self) -> Vec<String> {
        self.models().await
    }

    async fn is_reachable(&self) -> bool {
        self.probe().await
    }
}
