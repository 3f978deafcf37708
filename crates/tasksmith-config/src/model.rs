// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Tasksmith engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Tasksmith configuration.
///
/// Loaded once at startup from TOML files following the XDG hierarchy, with
/// environment variable overrides. Read-only thereafter. All sections are
/// optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TasksmithConfig {
    /// Engine identity and behavior settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Model identifiers, endpoint, and sampling parameters.
    #[serde(default)]
    pub models: ModelsConfig,

    /// Task routing thresholds and tier availability.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Compliance checker settings.
    #[serde(default)]
    pub compliance: ComplianceConfig,

    /// Syntax checker toolchain settings.
    #[serde(default)]
    pub syntax: SyntaxConfig,
}

/// Engine identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Inline system prompt string. Overridden by `system_prompt_file` if both set.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Path to a markdown file containing the system prompt.
    /// Takes precedence over `system_prompt` if both are set.
    #[serde(default)]
    pub system_prompt_file: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            system_prompt: None,
            system_prompt_file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Model identifiers and generation parameters per tier.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelsConfig {
    /// Model identifier for the small local tier.
    #[serde(default = "default_small_model")]
    pub small_model: String,

    /// Model identifier for the large local tier.
    #[serde(default = "default_large_model")]
    pub large_model: String,

    /// Endpoint address of the local model server.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Sampling temperature for all generation requests.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Token ceiling for small-tier responses.
    #[serde(default = "default_small_max_tokens")]
    pub small_max_tokens: u32,

    /// Token ceiling for large-tier responses.
    #[serde(default = "default_large_max_tokens")]
    pub large_max_tokens: u32,

    /// Wall-clock timeout for one generation request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            small_model: default_small_model(),
            large_model: default_large_model(),
            endpoint: default_endpoint(),
            temperature: default_temperature(),
            small_max_tokens: default_small_max_tokens(),
            large_max_tokens: default_large_max_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_small_model() -> String {
    "qwen2.5-coder:7b".to_string()
}

fn default_large_model() -> String {
    "qwen2.5-coder:14b".to_string()
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_temperature() -> f64 {
    0.1
}

fn default_small_max_tokens() -> u32 {
    4096
}

fn default_large_max_tokens() -> u32 {
    8192
}

fn default_request_timeout_secs() -> u64 {
    120
}

/// Task routing thresholds and tier availability.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Largest estimated line count still routed to a local tier.
    #[serde(default = "default_local_line_threshold")]
    pub local_line_threshold: u32,

    /// Largest estimated file count still routed to a local tier.
    #[serde(default = "default_local_file_threshold")]
    pub local_file_threshold: u32,

    /// Prefer local tiers when a task fits within the thresholds.
    #[serde(default = "default_prefer_local")]
    pub prefer_local: bool,

    /// Whether the hosted external tier may be routed to at all.
    #[serde(default)]
    pub external_available: bool,

    /// Provider identifier for the external tier.
    #[serde(default = "default_external_provider")]
    pub external_provider: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            local_line_threshold: default_local_line_threshold(),
            local_file_threshold: default_local_file_threshold(),
            prefer_local: default_prefer_local(),
            external_available: false,
            external_provider: default_external_provider(),
        }
    }
}

fn default_local_line_threshold() -> u32 {
    200
}

fn default_local_file_threshold() -> u32 {
    1
}

fn default_prefer_local() -> bool {
    true
}

fn default_external_provider() -> String {
    "claude".to_string()
}

/// Compliance checker configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ComplianceConfig {
    /// Path to the project policy document. `None` runs the checker with an
    /// empty policy (nothing to flag).
    #[serde(default)]
    pub policy_path: Option<String>,

    /// Denylist of phrases from unrelated product domains. Empty list keeps
    /// the built-in defaults.
    #[serde(default)]
    pub forbidden_domains: Vec<String>,
}

/// Syntax checker toolchain configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyntaxConfig {
    /// Attempt strict type-checking via an external toolchain when reachable.
    #[serde(default = "default_toolchain_check")]
    pub toolchain_check: bool,

    /// Wall-clock bound on one external toolchain invocation, in seconds.
    #[serde(default = "default_toolchain_timeout_secs")]
    pub toolchain_timeout_secs: u64,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self {
            toolchain_check: default_toolchain_check(),
            toolchain_timeout_secs: default_toolchain_timeout_secs(),
        }
    }
}

fn default_toolchain_check() -> bool {
    true
}

fn default_toolchain_timeout_secs() -> u64 {
    30
}
