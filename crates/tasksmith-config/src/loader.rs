// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./tasksmith.toml` > `~/.config/tasksmith/tasksmith.toml`
//! > `/etc/tasksmith/tasksmith.toml` with environment variable overrides via
//! `TASKSMITH_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::TasksmithConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tasksmith/tasksmith.toml` (system-wide)
/// 3. `~/.config/tasksmith/tasksmith.toml` (user XDG config)
/// 4. `./tasksmith.toml` (local directory)
/// 5. `TASKSMITH_*` environment variables
pub fn load_config() -> Result<TasksmithConfig, figment::Error> {
    let config: TasksmithConfig = build_figment().extract()?;
    tracing::debug!(
        endpoint = %config.models.endpoint,
        small_model = %config.models.small_model,
        large_model = %config.models.large_model,
        "configuration loaded"
    );
    Ok(config)
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<TasksmithConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TasksmithConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TasksmithConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TasksmithConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TasksmithConfig::default()))
        .merge(Toml::file("/etc/tasksmith/tasksmith.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("tasksmith/tasksmith.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("tasksmith.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TASKSMITH_ROUTING_LOCAL_LINE_THRESHOLD`
/// must map to `routing.local_line_threshold`, not `routing.local.line...`.
fn env_provider() -> Env {
    Env::prefixed("TASKSMITH_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("engine_", "engine.", 1)
            .replacen("models_", "models.", 1)
            .replacen("routing_", "routing.", 1)
            .replacen("compliance_", "compliance.", 1)
            .replacen("syntax_", "syntax.", 1);
        mapped.into()
    })
}
