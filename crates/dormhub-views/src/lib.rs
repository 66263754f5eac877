// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Complaint view derivation and role gating for the Dormhub portal.
//!
//! This crate provides:
//! - [`view`]: pure filtering and aggregation of complaint snapshots into
//!   per-department views with summary counts
//! - [`guard`]: the role-gated composer deciding which slice of the
//!   complaint set a viewer may see and which actions they may invoke
//!
//! Both modules are transform-only: they never perform I/O and derive
//! everything from the snapshot and context handed to them.

pub mod guard;
pub mod view;

pub use guard::{
    ViewerContext, VisibilityScope, apply_scope, check_route, compose_for, may_update_status,
    scope_for,
};
pub use view::{
    DeptView, StatusCounts, ViewFilter, compose_dept_view, dept_cluster, filter_by_dept,
    plan_status_update,
};
