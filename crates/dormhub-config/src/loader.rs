// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./dormhub.toml` > `~/.config/dormhub/dormhub.toml` > `/etc/dormhub/dormhub.toml`
//! with environment variable overrides via `DORMHUB_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::DormhubConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/dormhub/dormhub.toml` (system-wide)
/// 3. `~/.config/dormhub/dormhub.toml` (user XDG config)
/// 4. `./dormhub.toml` (local directory)
/// 5. `DORMHUB_*` environment variables
pub fn load_config() -> Result<DormhubConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DormhubConfig::default()))
        .merge(Toml::file("/etc/dormhub/dormhub.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("dormhub/dormhub.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("dormhub.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<DormhubConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DormhubConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DormhubConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DormhubConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `DORMHUB_STORE_API_TOKEN` must map to
/// `store.api_token`, not `store.api.token`.
fn env_provider() -> Env {
    Env::prefixed("DORMHUB_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: DORMHUB_STORE_API_TOKEN -> "store_api_token"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("portal_", "portal.", 1)
            .replacen("store_", "store.", 1)
            .replacen("nlu_", "nlu.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[portal]
log_level = "debug"

[gateway]
port = 9000
"#,
        )
        .unwrap();
        assert_eq!(config.portal.log_level, "debug");
        assert_eq!(config.gateway.port, 9000);
        // Untouched sections keep defaults.
        assert_eq!(config.store.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.portal.name, "dormhub");
    }

    #[test]
    fn file_path_loading_works() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dormhub.toml");
        std::fs::write(&path, "[store]\nbase_url = \"https://api.test\"\n").unwrap();

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.store.base_url, "https://api.test");
    }
}
