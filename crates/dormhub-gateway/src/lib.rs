// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Dormhub portal.
//!
//! Exposes the role-gated portal surface: department complaint views,
//! complaint filing and status updates, the mess timetable slot, and the
//! chatbot bridge. The viewer guard is re-evaluated on every request from
//! the `x-portal-*` headers set by the upstream auth proxy.

pub mod handlers;
pub mod identity;
pub mod server;

pub use identity::{DEPT_HEADER, ROLE_HEADER, USER_HEADER, viewer_from_headers};
pub use server::{GatewayState, ServerConfig, router, start_server};
