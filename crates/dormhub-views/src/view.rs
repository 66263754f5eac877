// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure derivation of per-department complaint views.
//!
//! All operations here are transforms over a fetched snapshot: no I/O, no
//! side effects. The remote store owns the records; these functions own the
//! display rules.

use dormhub_core::types::{Complaint, ComplaintStatus, Department, Severity};
use serde::{Deserialize, Serialize};

/// Departments whose complaints appear under a given department view.
///
/// The maintenance view aggregates HOUSEKEEPING and WATER as a display-time
/// union. Every other department maps to itself.
pub fn dept_cluster(dept: Department) -> &'static [Department] {
    match dept {
        Department::Maintenance => &[
            Department::Maintenance,
            Department::Housekeeping,
            Department::Water,
        ],
        Department::Mess => &[Department::Mess],
        Department::Transport => &[Department::Transport],
        Department::Network => &[Department::Network],
        Department::Housekeeping => &[Department::Housekeeping],
        Department::Water => &[Department::Water],
        Department::Carpool => &[Department::Carpool],
    }
}

/// Filters a snapshot to one department's cluster, preserving arrival order.
pub fn filter_by_dept(snapshot: &[Complaint], dept: Department) -> Vec<&Complaint> {
    let members = dept_cluster(dept);
    snapshot.iter().filter(|c| members.contains(&c.dept)).collect()
}

/// Summary counts over a department-scoped complaint set.
///
/// Invariant: `pending + in_progress + resolved == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl StatusCounts {
    /// Tallies counts over borrowed complaints.
    pub fn tally<'a>(complaints: impl IntoIterator<Item = &'a Complaint>) -> Self {
        let mut counts = Self::default();
        for complaint in complaints {
            counts.total += 1;
            match complaint.status {
                ComplaintStatus::Pending => counts.pending += 1,
                ComplaintStatus::InProgress => counts.in_progress += 1,
                ComplaintStatus::Resolved => counts.resolved += 1,
            }
        }
        counts
    }
}

/// Optional row filters applied after department scoping. `None` means "any".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFilter {
    pub status: Option<ComplaintStatus>,
    pub severity: Option<Severity>,
}

impl ViewFilter {
    fn matches(&self, complaint: &Complaint) -> bool {
        self.status.is_none_or(|s| complaint.status == s)
            && self.severity.is_none_or(|s| complaint.severity == s)
    }
}

/// A derived department view: filtered rows plus department-scoped counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeptView {
    pub dept: Department,
    pub rows: Vec<Complaint>,
    pub counts: StatusCounts,
}

/// Composes the view for one department context.
///
/// Counts are computed over the department-filtered set BEFORE the
/// status/severity filters apply, so they always reflect department scope.
pub fn compose_dept_view(
    snapshot: &[Complaint],
    dept: Department,
    filter: &ViewFilter,
) -> DeptView {
    let dept_scoped = filter_by_dept(snapshot, dept);
    let counts = StatusCounts::tally(dept_scoped.iter().copied());
    let rows = dept_scoped
        .into_iter()
        .filter(|c| filter.matches(c))
        .cloned()
        .collect();
    DeptView { dept, rows, counts }
}

/// Decides whether a status update should be issued.
///
/// Returns `None` when the requested status equals the current one: the
/// update is an idempotent no-op and no store call should be made. Backward
/// transitions are permitted; only same-status updates are rejected.
pub fn plan_status_update(
    current: ComplaintStatus,
    requested: ComplaintStatus,
) -> Option<ComplaintStatus> {
    if current == requested { None } else { Some(requested) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dormhub_core::types::ComplaintId;

    fn complaint(
        id: &str,
        dept: Department,
        status: ComplaintStatus,
        severity: Severity,
    ) -> Complaint {
        Complaint {
            id: ComplaintId(id.into()),
            student_id: format!("student-{id}"),
            dept,
            title: format!("complaint {id}"),
            description: "details".into(),
            severity,
            status,
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn maintenance_view_aggregates_housekeeping_and_water() {
        let snapshot = vec![
            complaint("c1", Department::Mess, ComplaintStatus::Pending, Severity::Low),
            complaint("c2", Department::Maintenance, ComplaintStatus::Resolved, Severity::Medium),
            complaint("c3", Department::Water, ComplaintStatus::Pending, Severity::High),
        ];

        let view = compose_dept_view(&snapshot, Department::Maintenance, &ViewFilter::default());

        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].id, ComplaintId("c2".into()));
        assert_eq!(view.rows[1].id, ComplaintId("c3".into()));
        assert_eq!(
            view.counts,
            StatusCounts { total: 2, pending: 1, in_progress: 0, resolved: 1 }
        );
    }

    #[test]
    fn other_departments_match_exactly() {
        let snapshot = vec![
            complaint("c1", Department::Mess, ComplaintStatus::Pending, Severity::Low),
            complaint("c2", Department::Housekeeping, ComplaintStatus::Pending, Severity::Low),
        ];
        let rows = filter_by_dept(&snapshot, Department::Housekeeping);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].dept, Department::Housekeeping);
    }

    #[test]
    fn counts_invariant_holds_for_every_department() {
        let snapshot = vec![
            complaint("c1", Department::Mess, ComplaintStatus::Pending, Severity::Low),
            complaint("c2", Department::Mess, ComplaintStatus::InProgress, Severity::High),
            complaint("c3", Department::Water, ComplaintStatus::Resolved, Severity::Medium),
            complaint("c4", Department::Carpool, ComplaintStatus::Pending, Severity::Low),
            complaint("c5", Department::Network, ComplaintStatus::Resolved, Severity::High),
        ];
        for dept in [
            Department::Mess,
            Department::Transport,
            Department::Network,
            Department::Maintenance,
            Department::Housekeeping,
            Department::Water,
            Department::Carpool,
        ] {
            let counts = StatusCounts::tally(filter_by_dept(&snapshot, dept).into_iter());
            assert_eq!(
                counts.pending + counts.in_progress + counts.resolved,
                counts.total,
                "invariant violated for {dept}"
            );
        }
    }

    #[test]
    fn counts_ignore_status_and_severity_filters() {
        let snapshot = vec![
            complaint("c1", Department::Mess, ComplaintStatus::Pending, Severity::Low),
            complaint("c2", Department::Mess, ComplaintStatus::Resolved, Severity::High),
        ];
        let filter = ViewFilter {
            status: Some(ComplaintStatus::Pending),
            severity: None,
        };
        let view = compose_dept_view(&snapshot, Department::Mess, &filter);
        assert_eq!(view.rows.len(), 1);
        // Counts still cover the whole department scope.
        assert_eq!(view.counts.total, 2);
        assert_eq!(view.counts.resolved, 1);
    }

    #[test]
    fn severity_filter_narrows_rows() {
        let snapshot = vec![
            complaint("c1", Department::Transport, ComplaintStatus::Pending, Severity::Low),
            complaint("c2", Department::Transport, ComplaintStatus::Pending, Severity::High),
        ];
        let filter = ViewFilter {
            status: None,
            severity: Some(Severity::High),
        };
        let view = compose_dept_view(&snapshot, Department::Transport, &filter);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].severity, Severity::High);
    }

    #[test]
    fn arrival_order_is_preserved() {
        let snapshot = vec![
            complaint("c3", Department::Network, ComplaintStatus::Pending, Severity::Low),
            complaint("c1", Department::Network, ComplaintStatus::Pending, Severity::Low),
            complaint("c2", Department::Network, ComplaintStatus::Pending, Severity::Low),
        ];
        let view = compose_dept_view(&snapshot, Department::Network, &ViewFilter::default());
        let ids: Vec<&str> = view.rows.iter().map(|c| c.id.0.as_str()).collect();
        assert_eq!(ids, vec!["c3", "c1", "c2"]);
    }

    #[test]
    fn empty_snapshot_yields_empty_view() {
        let view = compose_dept_view(&[], Department::Mess, &ViewFilter::default());
        assert!(view.rows.is_empty());
        assert_eq!(view.counts, StatusCounts::default());
    }

    #[test]
    fn same_status_update_is_a_no_op() {
        assert_eq!(
            plan_status_update(ComplaintStatus::Pending, ComplaintStatus::Pending),
            None
        );
    }

    #[test]
    fn forward_and_backward_transitions_are_planned() {
        assert_eq!(
            plan_status_update(ComplaintStatus::Pending, ComplaintStatus::InProgress),
            Some(ComplaintStatus::InProgress)
        );
        // Backward moves are allowed: an admin may reopen a resolved complaint.
        assert_eq!(
            plan_status_update(ComplaintStatus::Resolved, ComplaintStatus::Pending),
            Some(ComplaintStatus::Pending)
        );
    }
}
