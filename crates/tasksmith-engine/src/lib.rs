// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation orchestrator for Tasksmith.
//!
//! [`Engine`] ties the pipeline together: the router decides a tier, the
//! prompt builder renders task plus context, a [`tasksmith_core::ModelBackend`]
//! generates, and the sanitizer gates the output. Validation beyond the
//! sanitizer (compliance, syntax, imports) lives in `tasksmith-validate`
//! and is driven by the caller.

pub mod engine;
pub mod prompt;

pub use engine::{Engine, EngineHealth};
pub use prompt::build_prompt;
