// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The generation orchestrator.
//!
//! [`Engine::generate`] runs the full pipeline: route the task, assemble
//! the prompt, dispatch to a backend tier, then sanitize the output. The
//! sanitizer is the one hard gate; a non-clean result fails the attempt.

use std::time::Duration;

use tracing::{info, warn};

use tasksmith_config::model::TasksmithConfig;
use tasksmith_core::{
    BackendRequest, GenerationOutcome, ModelBackend, ModelTier, TaskContext, TasksmithError,
};
use tasksmith_ollama::OllamaClient;
use tasksmith_router::{TaskAnalysis, TaskRouter};
use tasksmith_validate::OutputSanitizer;

use crate::prompt;

/// Snapshot of backend availability, for startup diagnostics.
#[derive(Debug, Clone)]
pub struct EngineHealth {
    /// Whether the local model server answers at all.
    pub backend_reachable: bool,
    /// Model identifiers the backend currently serves.
    pub models: Vec<String>,
    /// Whether the configured small-tier model is among them.
    pub small_available: bool,
    /// Whether the configured large-tier model is among them.
    pub large_available: bool,
    /// Whether the hosted external tier is enabled in configuration.
    pub external_available: bool,
}

/// Orchestrates routing, prompt assembly, generation, and validation.
pub struct Engine {
    config: TasksmithConfig,
    router: TaskRouter,
    backend: Box<dyn ModelBackend>,
    sanitizer: OutputSanitizer,
    system_prompt: Option<String>,
}

impl Engine {
    /// Build an engine from configuration, connecting to the configured
    /// local model server.
    pub fn new(config: TasksmithConfig) -> Result<Self, TasksmithError> {
        let backend = OllamaClient::new(
            &config.models.endpoint,
            Duration::from_secs(config.models.request_timeout_secs),
        )?;
        Self::with_backend(config, Box::new(backend))
    }

    /// Build an engine around an injected backend.
    pub fn with_backend(
        config: TasksmithConfig,
        backend: Box<dyn ModelBackend>,
    ) -> Result<Self, TasksmithError> {
        let system_prompt = load_system_prompt(&config)?;
        let router = TaskRouter::new(config.routing.clone());

        Ok(Self {
            config,
            router,
            backend,
            sanitizer: OutputSanitizer::new(),
            system_prompt,
        })
    }

    /// Analyze a task without generating anything.
    pub fn analyze(&self, task: &str, context: Option<&TaskContext>) -> TaskAnalysis {
        self.router.analyze(task, context)
    }

    /// Run the full generation pipeline for one task.
    ///
    /// `force_tier` bypasses the routing decision but not the validation
    /// gate. Never returns `Err`: every failure mode is a failed outcome.
    pub async fn generate(
        &self,
        task: &str,
        context: Option<&TaskContext>,
        force_tier: Option<ModelTier>,
    ) -> GenerationOutcome {
        let analysis = self.router.analyze(task, context);
        let tier = force_tier.unwrap_or(analysis.recommended_tier);

        info!(
            tier = %tier,
            forced = force_tier.is_some(),
            task_type = %analysis.task_type,
            complexity = %analysis.complexity,
            estimated_lines = analysis.estimated_lines,
            files_affected = analysis.files_affected,
            reason = %analysis.reason,
            "generation dispatched"
        );

        let (model, max_tokens) = self.resolve_tier(tier);
        let prompt = prompt::build_prompt(task, context, &analysis);

        let outcome = self
            .backend
            .submit(BackendRequest {
                prompt,
                model: model.to_string(),
                system: self.system_prompt.clone(),
                temperature: self.config.models.temperature,
                max_tokens,
            })
            .await;

        if !outcome.succeeded {
            warn!(model = %outcome.model, error = ?outcome.error, "generation attempt failed");
            return outcome;
        }

        let cleaned = self.sanitizer.strip_formatting(&outcome.text);
        let verdict = self.sanitizer.check(&cleaned);
        if !verdict.is_clean {
            warn!(
                model = %outcome.model,
                violations = verdict.violations.len(),
                "generated output rejected by sanitizer"
            );
            return GenerationOutcome::failure_with_tokens(
                &outcome.model,
                format!(
                    "OUTPUT VALIDATION FAILED:\n{}",
                    verdict.violations.join("\n")
                ),
                outcome.tokens_consumed,
            );
        }

        GenerationOutcome::success(cleaned, &outcome.model, outcome.tokens_consumed)
    }

    /// Probe the backend and report model availability.
    pub async fn health_check(&self) -> EngineHealth {
        let backend_reachable = self.backend.is_reachable().await;
        let models = if backend_reachable {
            self.backend.list_models().await
        } else {
            Vec::new()
        };

        EngineHealth {
            backend_reachable,
            small_available: models.iter().any(|m| m == &self.config.models.small_model),
            large_available: models.iter().any(|m| m == &self.config.models.large_model),
            external_available: self.config.routing.external_available,
            models,
        }
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &TasksmithConfig {
        &self.config
    }

    /// Map a tier onto a concrete model and token ceiling.
    ///
    /// The external tier has no hosted backend wired yet; it degrades to
    /// the large local model.
    fn resolve_tier(&self, tier: ModelTier) -> (&str, u32) {
        match tier {
            ModelTier::LocalSmall => (
                self.config.models.small_model.as_str(),
                self.config.models.small_max_tokens,
            ),
            ModelTier::LocalLarge => (
                self.config.models.large_model.as_str(),
                self.config.models.large_max_tokens,
            ),
            ModelTier::External => {
                warn!(
                    provider = %self.config.routing.external_provider,
                    "external tier requested, degrading to large local model"
                );
                (
                    self.config.models.large_model.as_str(),
                    self.config.models.large_max_tokens,
                )
            }
        }
    }
}

/// Resolve the system prompt: a file path wins over the inline string.
fn load_system_prompt(config: &TasksmithConfig) -> Result<Option<String>, TasksmithError> {
    if let Some(path) = &config.engine.system_prompt_file {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TasksmithError::Config(format!("could not read system prompt file {path}: {e}"))
        })?;
        return Ok(Some(content));
    }
    Ok(config.engine.system_prompt.clone())
}
