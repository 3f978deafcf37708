// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Tasksmith engine.

use thiserror::Error;

/// The primary error type used across Tasksmith crates.
///
/// Note that most failure modes in this system are *not* errors: backend
/// failures surface as a failed [`crate::GenerationOutcome`], and validation
/// failures surface as structured verdicts. This type covers the remaining
/// hard failures (bad configuration, client construction, internal bugs).
#[derive(Debug, Error)]
pub enum TasksmithError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Model backend errors that occur before a request can even be issued
    /// (e.g. HTTP client construction). In-flight failures are reported as
    /// failed outcomes instead.
    #[error("backend error: {message}")]
    Backend {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation exceeded its wall-clock bound.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
