// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as positive thresholds and a sane temperature range.

use crate::diagnostic::ConfigError;
use crate::model::TasksmithConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TasksmithConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.models.endpoint.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "models.endpoint must not be empty".to_string(),
        });
    }

    if config.models.small_model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "models.small_model must not be empty".to_string(),
        });
    }

    if config.models.large_model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "models.large_model must not be empty".to_string(),
        });
    }

    if !(0.0..=2.0).contains(&config.models.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "models.temperature must be in [0, 2], got {}",
                config.models.temperature
            ),
        });
    }

    if config.models.small_max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "models.small_max_tokens must be positive".to_string(),
        });
    }

    if config.models.large_max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "models.large_max_tokens must be positive".to_string(),
        });
    }

    if config.routing.local_line_threshold == 0 {
        errors.push(ConfigError::Validation {
            message: "routing.local_line_threshold must be at least 1".to_string(),
        });
    }

    if config.routing.local_file_threshold == 0 {
        errors.push(ConfigError::Validation {
            message: "routing.local_file_threshold must be at least 1".to_string(),
        });
    }

    if config.routing.external_available && config.routing.external_provider.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "routing.external_provider must be set when external_available = true"
                .to_string(),
        });
    }

    for (i, phrase) in config.compliance.forbidden_domains.iter().enumerate() {
        if phrase.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("compliance.forbidden_domains[{i}] must not be empty"),
            });
        }
    }

    if config.syntax.toolchain_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "syntax.toolchain_timeout_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = TasksmithConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_endpoint_fails_validation() {
        let mut config = TasksmithConfig::default();
        config.models.endpoint = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("endpoint"))
        ));
    }

    #[test]
    fn out_of_range_temperature_fails_validation() {
        let mut config = TasksmithConfig::default();
        config.models.temperature = 3.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("temperature"))
        ));
    }

    #[test]
    fn zero_thresholds_fail_validation() {
        let mut config = TasksmithConfig::default();
        config.routing.local_line_threshold = 0;
        config.routing.local_file_threshold = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| matches!(e, ConfigError::Validation { message } if message.contains("threshold")))
                .count(),
            2,
            "validation must collect all errors, not fail fast"
        );
    }

    #[test]
    fn external_without_provider_fails_validation() {
        let mut config = TasksmithConfig::default();
        config.routing.external_available = true;
        config.routing.external_provider = " ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("external_provider"))
        ));
    }

    #[test]
    fn empty_forbidden_domain_entry_fails_validation() {
        let mut config = TasksmithConfig::default();
        config.compliance.forbidden_domains = vec!["solar panel".into(), "".into()];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("forbidden_domains[1]"))
        ));
    }
}
