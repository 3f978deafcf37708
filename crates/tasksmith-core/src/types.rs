// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Tasksmith crates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The candidate model tiers a task can be routed to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    /// Small local model: fast, for trivial single-file edits.
    LocalSmall,
    /// Large local model: medium tasks within local thresholds.
    LocalLarge,
    /// Hosted API model: complex or high-risk tasks.
    External,
}

/// Result of one generation attempt from a model backend.
///
/// Backends never raise transport or timeout errors to the orchestrator;
/// they return a failed outcome instead, and the caller decides what to do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Whether generation produced usable text.
    pub succeeded: bool,
    /// The generated text (empty on failure).
    pub text: String,
    /// Identifier of the model that handled (or was asked to handle) the request.
    pub model: String,
    /// Tokens consumed by the generation, as reported by the backend.
    pub tokens_consumed: u32,
    /// Failure description when `succeeded` is false.
    pub error: Option<String>,
}

impl GenerationOutcome {
    /// A successful outcome carrying generated text.
    pub fn success(text: impl Into<String>, model: impl Into<String>, tokens: u32) -> Self {
        Self {
            succeeded: true,
            text: text.into(),
            model: model.into(),
            tokens_consumed: tokens,
            error: None,
        }
    }

    /// A failed outcome carrying an error description.
    pub fn failure(model: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            text: String::new(),
            model: model.into(),
            tokens_consumed: 0,
            error: Some(error.into()),
        }
    }

    /// A failed outcome that preserves the token count of a prior attempt.
    pub fn failure_with_tokens(
        model: impl Into<String>,
        error: impl Into<String>,
        tokens: u32,
    ) -> Self {
        Self {
            tokens_consumed: tokens,
            ..Self::failure(model, error)
        }
    }
}

/// Optional auxiliary artifacts accompanying a task description.
///
/// Uses `BTreeMap` so prompt assembly iterates files in a stable order.
#[derive(Debug, Clone, Default)]
pub struct TaskContext {
    /// Project policy document text (domain model, API contract, rules).
    pub policy_doc: Option<String>,
    /// Relevant file contents keyed by path.
    pub files: BTreeMap<String, String>,
    /// Directory structure listing.
    pub tree: Option<String>,
}

impl TaskContext {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.policy_doc.is_none() && self.files.is_empty() && self.tree.is_none()
    }
}
