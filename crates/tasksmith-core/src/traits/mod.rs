// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for external collaborators.

pub mod backend;

pub use backend::{BackendRequest, ChatMessage, ModelBackend};
