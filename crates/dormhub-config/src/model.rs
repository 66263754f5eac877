// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Dormhub portal services.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Dormhub configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DormhubConfig {
    /// Portal identity and logging settings.
    #[serde(default)]
    pub portal: PortalConfig,

    /// Remote complaint store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Dialogflow NLU settings.
    #[serde(default)]
    pub nlu: NluConfig,

    /// Gateway HTTP server settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Portal identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PortalConfig {
    /// Display name of the portal deployment.
    #[serde(default = "default_portal_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            name: default_portal_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_portal_name() -> String {
    "dormhub".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Remote complaint store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Base URL of the remote complaint store API.
    #[serde(default = "default_store_base_url")]
    pub base_url: String,

    /// Bearer token for the store API. `None` sends unauthenticated requests.
    #[serde(default)]
    pub api_token: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_store_base_url(),
            api_token: None,
        }
    }
}

fn default_store_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

/// Dialogflow NLU configuration.
///
/// When `project_id` is unset and the credential file is absent or invalid,
/// the chatbot adapter degrades to demo mode instead of failing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NluConfig {
    /// Google Cloud project id hosting the Dialogflow agent.
    #[serde(default)]
    pub project_id: Option<String>,

    /// Path to the portal's NLU credential file (JSON).
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,

    /// BCP-47 language code sent with every query.
    #[serde(default = "default_language_code")]
    pub language_code: String,

    /// Dialogflow API endpoint.
    #[serde(default = "default_nlu_endpoint")]
    pub endpoint: String,
}

impl Default for NluConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            credentials_file: default_credentials_file(),
            language_code: default_language_code(),
            endpoint: default_nlu_endpoint(),
        }
    }
}

fn default_credentials_file() -> String {
    dirs::config_dir()
        .map(|p| p.join("dormhub").join("nlu_credentials.json"))
        .unwrap_or_else(|| std::path::PathBuf::from("nlu_credentials.json"))
        .to_string_lossy()
        .into_owned()
}

fn default_language_code() -> String {
    "en-US".to_string()
}

fn default_nlu_endpoint() -> String {
    "https://dialogflow.googleapis.com".to_string()
}

/// Gateway HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    7070
}
