// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Role-gated view composition.
//!
//! Access decisions are derived from an explicit [`ViewerContext`] passed
//! into every call: there is no ambient auth state and no caching of a
//! prior decision. Callers re-run the guard on every request.

use dormhub_core::error::DormhubError;
use dormhub_core::types::{Complaint, Department, Role};

use crate::view::{DeptView, ViewFilter, compose_dept_view, filter_by_dept};

/// The authenticated viewer, as established by the surrounding transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerContext {
    pub role: Role,
    /// Student or admin identifier. `None` for anonymous viewers.
    pub user_id: Option<String>,
    /// The department cluster an admin is assigned to. Ignored for other roles.
    pub admin_dept: Option<Department>,
}

impl ViewerContext {
    pub fn student(user_id: impl Into<String>) -> Self {
        Self { role: Role::Student, user_id: Some(user_id.into()), admin_dept: None }
    }

    pub fn admin(user_id: impl Into<String>, dept: Option<Department>) -> Self {
        Self { role: Role::Admin, user_id: Some(user_id.into()), admin_dept: dept }
    }

    pub fn driver(user_id: impl Into<String>) -> Self {
        Self { role: Role::Driver, user_id: Some(user_id.into()), admin_dept: None }
    }

    pub fn anonymous() -> Self {
        Self { role: Role::Anonymous, user_id: None, admin_dept: None }
    }
}

/// Checks a route's allowed-role set against the viewer.
///
/// Anonymous viewers and roles outside the set are rejected; the transport
/// layer maps the error to its redirect-to-root behavior.
pub fn check_route(
    ctx: &ViewerContext,
    route: &str,
    allowed: &[Role],
) -> Result<(), DormhubError> {
    if ctx.role == Role::Anonymous || !allowed.contains(&ctx.role) {
        return Err(DormhubError::Forbidden { role: ctx.role, route: route.to_string() });
    }
    Ok(())
}

/// What slice of the complaint set a viewer may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityScope {
    /// Only complaints authored by this student.
    Own(String),
    /// All complaints in a department cluster.
    Cluster(Department),
    /// Nothing. Produced for anonymous viewers and malformed contexts.
    Denied,
}

/// Derives the visibility scope for a viewer requesting a department view.
///
/// Drivers are pinned to the carpool department regardless of the requested
/// route parameter. Admins default to the routed department when no
/// assigned cluster is configured.
pub fn scope_for(ctx: &ViewerContext, requested: Department) -> VisibilityScope {
    match ctx.role {
        Role::Student => match &ctx.user_id {
            Some(id) => VisibilityScope::Own(id.clone()),
            None => VisibilityScope::Denied,
        },
        Role::Admin => VisibilityScope::Cluster(ctx.admin_dept.unwrap_or(requested)),
        Role::Driver => VisibilityScope::Cluster(Department::Carpool),
        Role::Anonymous => VisibilityScope::Denied,
    }
}

/// Only admins may invoke the status-update action. The transport does not
/// offer the control to other roles; authoritative enforcement lives in the
/// remote store.
pub fn may_update_status(role: Role) -> bool {
    match role {
        Role::Admin => true,
        Role::Student | Role::Driver | Role::Anonymous => false,
    }
}

/// Filters a snapshot down to what a scope permits, preserving order.
pub fn apply_scope<'a>(
    snapshot: &'a [Complaint],
    scope: &VisibilityScope,
) -> Vec<&'a Complaint> {
    match scope {
        VisibilityScope::Own(student_id) => snapshot
            .iter()
            .filter(|c| &c.student_id == student_id)
            .collect(),
        VisibilityScope::Cluster(dept) => filter_by_dept(snapshot, *dept),
        VisibilityScope::Denied => Vec::new(),
    }
}

/// Composes the department view a viewer is entitled to.
///
/// Applies the visibility scope to the snapshot, then derives rows and
/// counts for the effective department (which, for drivers, is always
/// carpool).
pub fn compose_for(
    ctx: &ViewerContext,
    requested: Department,
    snapshot: &[Complaint],
    filter: &ViewFilter,
) -> Result<DeptView, DormhubError> {
    let scope = scope_for(ctx, requested);
    if scope == VisibilityScope::Denied {
        return Err(DormhubError::Forbidden {
            role: ctx.role,
            route: format!("/v1/departments/{requested}/complaints"),
        });
    }
    let effective_dept = match &scope {
        VisibilityScope::Cluster(dept) => *dept,
        _ => requested,
    };
    let scoped: Vec<Complaint> =
        apply_scope(snapshot, &scope).into_iter().cloned().collect();
    Ok(compose_dept_view(&scoped, effective_dept, filter))
}
