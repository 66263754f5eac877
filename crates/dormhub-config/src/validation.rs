// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as well-formed URLs and recognized log levels.

use crate::diagnostic::ConfigError;
use crate::model::DormhubConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &DormhubConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.portal.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "portal.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.portal.log_level
            ),
        });
    }

    let base_url = config.store.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "store.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("store.base_url must be an http(s) URL, got `{base_url}`"),
        });
    }

    let endpoint = config.nlu.endpoint.trim();
    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("nlu.endpoint must be an http(s) URL, got `{endpoint}`"),
        });
    }

    if let Some(project) = &config.nlu.project_id
        && project.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "nlu.project_id must not be empty when set".to_string(),
        });
    }

    // Validate bind host looks like a valid IP or hostname.
    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = DormhubConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn bogus_log_level_fails_validation() {
        let mut config = DormhubConfig::default();
        config.portal.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))
        ));
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = DormhubConfig::default();
        config.store.base_url = "ftp://store.example".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("base_url"))
        ));
    }

    #[test]
    fn empty_project_id_fails_validation() {
        let mut config = DormhubConfig::default();
        config.nlu.project_id = Some("  ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("project_id"))
        ));
    }

    #[test]
    fn multiple_errors_are_collected() {
        let mut config = DormhubConfig::default();
        config.portal.log_level = "loud".to_string();
        config.store.base_url = "".to_string();
        config.gateway.host = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = DormhubConfig::default();
        config.store.base_url = "https://store.campus.edu".to_string();
        config.nlu.project_id = Some("campus-agent".to_string());
        config.gateway.host = "0.0.0.0".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
