// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The ordered tier-decision rule chain.
//!
//! Each rule is an explicit (predicate, outcome) pair; rules are evaluated
//! in declaration order and the first applicable rule wins. The ordering is
//! a contract: moving a rule changes routing outcomes.

use tasksmith_config::model::RoutingConfig;
use tasksmith_core::ModelTier;

use crate::classifier::Complexity;

/// Everything a rule may look at when deciding a tier.
pub(crate) struct RuleInput<'a> {
    /// The raw text of the first matching high-risk pattern, if any.
    pub high_risk_pattern: Option<&'static str>,
    pub complexity: Complexity,
    pub lines: u32,
    pub files: u32,
    pub config: &'a RoutingConfig,
}

/// Outcome of an applicable rule.
pub(crate) struct Decision {
    pub tier: ModelTier,
    pub requires_external: bool,
    pub reason: String,
}

/// One entry in the rule chain.
pub(crate) struct RoutingRule {
    /// Short identifier for logs.
    pub name: &'static str,
    pub applies: fn(&RuleInput) -> bool,
    pub decide: fn(&RuleInput) -> Decision,
}

/// The rule chain, in precedence order.
pub(crate) const RULES: &[RoutingRule] = &[
    RoutingRule {
        name: "high-risk-pattern",
        applies: |input| input.high_risk_pattern.is_some(),
        decide: |input| {
            let pattern = input.high_risk_pattern.unwrap_or_default();
            if input.config.external_available {
                Decision {
                    tier: ModelTier::External,
                    requires_external: true,
                    reason: format!("Complex task: matches '{pattern}'"),
                }
            } else {
                Decision {
                    tier: ModelTier::LocalLarge,
                    requires_external: false,
                    reason: format!(
                        "Complex task (matches '{pattern}') but external tier unavailable"
                    ),
                }
            }
        },
    },
    RoutingRule {
        name: "small-single-file",
        applies: |input| {
            input.complexity == Complexity::Low && input.lines < 50 && input.files == 1
        },
        decide: |_| Decision {
            tier: ModelTier::LocalSmall,
            requires_external: false,
            reason: "Simple single-file task".to_string(),
        },
    },
    RoutingRule {
        name: "within-local-limits",
        applies: |input| {
            input.complexity == Complexity::Medium
                || (input.lines <= input.config.local_line_threshold
                    && input.files <= input.config.local_file_threshold)
        },
        decide: |_| Decision {
            tier: ModelTier::LocalLarge,
            requires_external: false,
            reason: "Medium complexity, within local limits".to_string(),
        },
    },
    RoutingRule {
        name: "external-high-complexity",
        applies: |input| input.config.external_available,
        decide: |_| Decision {
            tier: ModelTier::External,
            requires_external: true,
            reason: "High complexity task".to_string(),
        },
    },
    RoutingRule {
        name: "degraded-fallback",
        applies: |_| true,
        decide: |_| Decision {
            tier: ModelTier::LocalLarge,
            requires_external: false,
            reason: "Complex but using local model (external tier unavailable)".to_string(),
        },
    },
];

/// Evaluate the chain; the terminal fallback rule guarantees a decision.
pub(crate) fn evaluate(input: &RuleInput) -> (&'static str, Decision) {
    for rule in RULES {
        if (rule.applies)(input) {
            return (rule.name, (rule.decide)(input));
        }
    }
    // Unreachable: the last rule always applies.
    (
        "degraded-fallback",
        Decision {
            tier: ModelTier::LocalLarge,
            requires_external: false,
            reason: "Complex but using local model (external tier unavailable)".to_string(),
        },
    )
}
