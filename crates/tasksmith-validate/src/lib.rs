// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Validation pipeline for generated code.
//!
//! Four independent validators, each with its own verdict type:
//! - [`OutputSanitizer`]: strips markdown fences and rejects unsafe text
//!   (the one hard gate in the generation pipeline)
//! - [`ComplianceChecker`]: project-contract rules from a policy document
//! - [`SyntaxChecker`]: language detection plus per-language syntax checks
//! - [`ImportAuditor`]: imports restricted to declared packages
//!
//! Validators never panic on malformed input and degrade gracefully when
//! their reference material (policy document, package manifest, host
//! toolchain) is missing.

pub mod compliance;
pub mod imports;
pub mod sanitize;
pub mod syntax;

pub use compliance::{ComplianceChecker, CompliancePolicy, ComplianceVerdict};
pub use imports::{ImportAuditor, ImportVerdict};
pub use sanitize::{OutputSanitizer, SanitizeVerdict};
pub use syntax::{Language, SyntaxChecker, SyntaxVerdict};
