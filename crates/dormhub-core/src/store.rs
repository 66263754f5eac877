// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seam over the remote complaint store.
//!
//! The HTTP adapter in `dormhub-client` is the production implementation;
//! tests substitute an in-memory store.

use async_trait::async_trait;

use crate::error::DormhubError;
use crate::types::{
    Complaint, ComplaintId, ComplaintStatus, MessTimetable, NewComplaint, TimetableId,
    TimetableUpload,
};

/// Typed operations against the remote complaint store.
///
/// The remote store is the sole owner of record: ids, timestamps, and
/// authoritative status live there. Callers hold a transient, re-fetchable
/// snapshot with no conflict resolution (last write wins).
#[async_trait]
pub trait ComplaintStore: Send + Sync + 'static {
    /// Fetches the full complaint set. All view derivation happens
    /// client-side over this snapshot.
    async fn list_all(&self) -> Result<Vec<Complaint>, DormhubError>;

    /// Fetches the complaints authored by one student.
    async fn list_for_student(
        &self,
        student_id: &str,
    ) -> Result<Vec<Complaint>, DormhubError>;

    /// Files a new complaint. Implementations must validate the input and
    /// reject it before any remote call.
    async fn create(&self, complaint: NewComplaint) -> Result<Complaint, DormhubError>;

    /// Moves a complaint to a new status, returning the updated record.
    async fn update_status(
        &self,
        id: &ComplaintId,
        status: ComplaintStatus,
    ) -> Result<Complaint, DormhubError>;

    /// Returns the current mess timetable, if one is published.
    async fn current_timetable(&self) -> Result<Option<MessTimetable>, DormhubError>;

    /// Publishes a new timetable, replacing the current one. Implementations
    /// must reject non-PDF uploads before any remote call.
    async fn upload_timetable(
        &self,
        upload: TimetableUpload,
        uploaded_by: &str,
    ) -> Result<MessTimetable, DormhubError>;

    /// Removes the published timetable.
    async fn delete_timetable(&self, id: &TimetableId) -> Result<(), DormhubError>;
}
