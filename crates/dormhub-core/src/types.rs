// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Dormhub workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::DormhubError;

/// Opaque store-assigned complaint identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComplaintId(pub String);

/// Opaque store-assigned timetable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimetableId(pub String);

/// Opaque token correlating a sequence of NLU exchanges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Department owning a complaint.
///
/// Serialized SCREAMING_SNAKE to match the remote store's wire convention.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    Mess,
    Transport,
    Network,
    Maintenance,
    Housekeeping,
    Water,
    Carpool,
}

/// Complaint urgency tag. Display-only, no SLA logic attached.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Complaint lifecycle status.
///
/// Forward-only (pending -> in_progress -> resolved) by convention, not
/// enforced: an admin may move a complaint backward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Pending,
    InProgress,
    Resolved,
}

/// Closed set of portal roles. Guard code must match exhaustively.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Admin,
    Driver,
    Anonymous,
}

/// A complaint as held by the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: ComplaintId,
    pub student_id: String,
    pub dept: Department,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields for a complaint about to be filed.
///
/// The store assigns the id, initial status, and creation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComplaint {
    pub student_id: String,
    pub dept: Department,
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl NewComplaint {
    /// Rejects incomplete submissions before any adapter call is made.
    pub fn validate(&self) -> Result<(), DormhubError> {
        if self.title.trim().is_empty() {
            return Err(DormhubError::Validation("complaint title must not be empty".into()));
        }
        if self.description.trim().is_empty() {
            return Err(DormhubError::Validation(
                "complaint description must not be empty".into(),
            ));
        }
        if self.student_id.trim().is_empty() {
            return Err(DormhubError::Validation("student id must not be empty".into()));
        }
        Ok(())
    }
}

/// The current mess timetable. Single-current-version semantics: uploading
/// replaces it, deletion clears it. No history is modeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessTimetable {
    pub id: TimetableId,
    pub filename: String,
    pub file_url: String,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
}

/// MIME type required for timetable uploads.
pub const TIMETABLE_CONTENT_TYPE: &str = "application/pdf";

/// A timetable file selected for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl TimetableUpload {
    /// Rejects non-PDF selections with no store round-trip.
    pub fn validate(&self) -> Result<(), DormhubError> {
        if self.content_type != TIMETABLE_CONTENT_TYPE {
            return Err(DormhubError::Validation(format!(
                "timetable must be {TIMETABLE_CONTENT_TYPE}, got {}",
                self.content_type
            )));
        }
        if self.filename.trim().is_empty() {
            return Err(DormhubError::Validation("timetable filename must not be empty".into()));
        }
        Ok(())
    }
}
