// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tasksmith engine.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Tasksmith workspace: the model tier
//! enumeration, the generation outcome shared by every backend, and the
//! [`ModelBackend`] collaborator trait the orchestrator consumes.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TasksmithError;
pub use traits::{BackendRequest, ChatMessage, ModelBackend};
pub use types::{GenerationOutcome, ModelTier, TaskContext};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_construct() {
        let _config = TasksmithError::Config("bad value".into());
        let _backend = TasksmithError::Backend {
            message: "client build failed".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _timeout = TasksmithError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = TasksmithError::Internal("test".into());
    }

    #[test]
    fn error_messages_are_prefixed() {
        let err = TasksmithError::Config("missing endpoint".into());
        assert_eq!(err.to_string(), "configuration error: missing endpoint");

        let err = TasksmithError::Backend {
            message: "no route to host".into(),
            source: None,
        };
        assert!(err.to_string().contains("backend error"));
    }

    #[test]
    fn backend_trait_is_object_safe() {
        fn _assert(_: &dyn ModelBackend) {}
    }
}
