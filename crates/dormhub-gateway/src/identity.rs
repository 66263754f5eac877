// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-request viewer identity extraction.
//!
//! Authentication mechanics live in an upstream auth proxy; the gateway
//! trusts the `x-portal-*` headers it sets and re-derives the viewer
//! context on every request. Absent or unparseable headers produce an
//! anonymous viewer, which fails every guarded route.

use std::str::FromStr;

use axum::http::HeaderMap;
use dormhub_core::types::{Department, Role};
use dormhub_views::ViewerContext;

/// Header carrying the viewer's role (`student`, `admin`, `driver`).
pub const ROLE_HEADER: &str = "x-portal-role";
/// Header carrying the viewer's user identifier.
pub const USER_HEADER: &str = "x-portal-user";
/// Header carrying an admin's assigned department cluster.
pub const DEPT_HEADER: &str = "x-portal-dept";

/// Parses a department name case-insensitively (route params arrive
/// lowercase, the store speaks SCREAMING_SNAKE).
pub fn parse_department(raw: &str) -> Option<Department> {
    Department::from_str(&raw.trim().to_uppercase()).ok()
}

/// Builds the viewer context from request headers.
pub fn viewer_from_headers(headers: &HeaderMap) -> ViewerContext {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let role = header_str(ROLE_HEADER)
        .and_then(|raw| Role::from_str(&raw.to_lowercase()).ok())
        .unwrap_or(Role::Anonymous);

    // An explicit anonymous header and a missing one behave identically.
    if role == Role::Anonymous {
        return ViewerContext::anonymous();
    }

    ViewerContext {
        role,
        user_id: header_str(USER_HEADER).map(String::from),
        admin_dept: header_str(DEPT_HEADER).and_then(parse_department),
    }
}
