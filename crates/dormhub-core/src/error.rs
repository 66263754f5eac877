// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Dormhub portal services.

use thiserror::Error;

use crate::types::Role;

/// The primary error type used across Dormhub adapters and core operations.
#[derive(Debug, Error)]
pub enum DormhubError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Remote complaint store errors (transport failure, remote 4xx/5xx, bad payload).
    #[error("store error: {message}")]
    Store {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// NLU service errors (transport failure, malformed response).
    #[error("nlu error: {message}")]
    Nlu {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Input rejected before any remote call was issued.
    #[error("validation error: {0}")]
    Validation(String),

    /// The viewer's role is not in the route's allowed set.
    #[error("access denied: role {role} may not access {route}")]
    Forbidden { role: Role, route: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
