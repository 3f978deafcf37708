// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama backend adapter for the Tasksmith engine.
//!
//! [`OllamaClient`] implements [`tasksmith_core::ModelBackend`] against a
//! local Ollama server: `/api/generate` for single prompts, `/api/chat`
//! for multi-turn exchanges, `/api/tags` for model discovery and health.

pub mod client;
pub mod types;

pub use client::OllamaClient;
