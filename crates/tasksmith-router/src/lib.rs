// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task classification and model tier routing for the Tasksmith engine.
//!
//! This crate provides:
//! - [`TaskClassifier`]: heuristic type/scope/complexity classification
//!   (zero-cost, zero-latency, deterministic)
//! - [`TaskRouter`]: tier decisions via an explicit ordered rule chain
//!
//! The router runs before any model call, deciding whether a task goes to
//! the small local model, the large local model, or the hosted external
//! tier, and produces an audit-ready reason for every decision.

pub mod classifier;
mod rules;
pub mod router;

pub use classifier::{Complexity, TaskClassifier, TaskType};
pub use router::{TaskAnalysis, TaskRouter};
