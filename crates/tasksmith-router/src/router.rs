// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task analysis and model tier routing.
//!
//! [`TaskRouter::analyze`] turns a free-text task description into a
//! [`TaskAnalysis`]: detected type, estimated scope, assessed complexity,
//! and a tier decision with an audit-ready reason.

use tasksmith_config::model::RoutingConfig;
use tasksmith_core::{ModelTier, TaskContext};
use tracing::debug;

use crate::classifier::{Complexity, TaskClassifier, TaskType};
use crate::rules::{self, RuleInput};

/// Analysis of one coding task, produced fresh per call and never mutated.
#[derive(Debug, Clone)]
pub struct TaskAnalysis {
    /// Detected kind of task.
    pub task_type: TaskType,
    /// Estimated lines of code to generate (always > 0).
    pub estimated_lines: u32,
    /// Estimated number of files affected (always >= 1).
    pub files_affected: u32,
    /// Assessed complexity.
    pub complexity: Complexity,
    /// Whether the decision asks for the hosted external tier.
    pub requires_external_tier: bool,
    /// The tier the task should be routed to.
    pub recommended_tier: ModelTier,
    /// Human-readable reason suitable for audit logging (never empty).
    pub reason: String,
}

/// Routes tasks to the appropriate model tier.
///
/// Pure function of the task text and the routing configuration: no I/O,
/// no randomness, never fails. Unrecognized input degrades to documented
/// defaults instead of erroring.
pub struct TaskRouter {
    classifier: TaskClassifier,
    config: RoutingConfig,
}

impl TaskRouter {
    /// Create a router with the given routing configuration.
    pub fn new(config: RoutingConfig) -> Self {
        Self {
            classifier: TaskClassifier::new(),
            config,
        }
    }

    /// Analyze a task description and decide which tier should handle it.
    ///
    /// `context` carries auxiliary artifacts for downstream prompt assembly;
    /// scope estimation is text-only so identical descriptions always
    /// classify identically regardless of attached context.
    pub fn analyze(&self, task: &str, context: Option<&TaskContext>) -> TaskAnalysis {
        let _ = context;
        let task_lower = task.to_lowercase();

        let task_type = self.classifier.detect_task_type(&task_lower);
        let estimated_lines = self.classifier.estimate_lines(&task_lower);
        let files_affected = self.classifier.estimate_files(&task_lower);
        let complexity =
            self.classifier
                .assess_complexity(&task_lower, estimated_lines, files_affected);

        let input = RuleInput {
            high_risk_pattern: self.classifier.high_risk_match(&task_lower),
            complexity,
            lines: estimated_lines,
            files: files_affected,
            config: &self.config,
        };
        let (rule, decision) = rules::evaluate(&input);

        debug!(
            rule,
            tier = %decision.tier,
            %complexity,
            estimated_lines,
            files_affected,
            reason = %decision.reason,
            "task routed"
        );

        TaskAnalysis {
            task_type,
            estimated_lines,
            files_affected,
            complexity,
            requires_external_tier: decision.requires_external,
            recommended_tier: decision.tier,
            reason: decision.reason,
        }
    }

    /// The routing configuration this router was built with.
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }
}
