// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the remote complaint store API.
//!
//! The store wraps every payload in a `{success, data}` envelope and uses
//! `*_id` field names; these DTOs absorb that convention so the rest of the
//! workspace only sees `dormhub-core` types.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use dormhub_core::types::{
    Complaint, ComplaintId, ComplaintStatus, Department, MessTimetable, NewComplaint, Severity,
    TimetableId, TimetableUpload,
};
use serde::{Deserialize, Serialize};

/// A complaint as serialized by the remote store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub complaint_id: String,
    pub student_id: String,
    pub dept_id: Department,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
}

impl From<ComplaintRecord> for Complaint {
    fn from(record: ComplaintRecord) -> Self {
        Complaint {
            id: ComplaintId(record.complaint_id),
            student_id: record.student_id,
            dept: record.dept_id,
            title: record.title,
            description: record.description,
            severity: record.severity,
            status: record.status,
            created_at: record.created_at,
        }
    }
}

/// Body for `POST /v1/complaints`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComplaintRequest {
    pub student_id: String,
    pub dept_id: Department,
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl From<NewComplaint> for CreateComplaintRequest {
    fn from(complaint: NewComplaint) -> Self {
        Self {
            student_id: complaint.student_id,
            dept_id: complaint.dept,
            title: complaint.title,
            description: complaint.description,
            severity: complaint.severity,
        }
    }
}

/// Body for `PATCH /v1/complaints/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ComplaintStatus,
}

/// A timetable as serialized by the remote store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableRecord {
    pub timetable_id: String,
    pub filename: String,
    pub file_url: String,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<TimetableRecord> for MessTimetable {
    fn from(record: TimetableRecord) -> Self {
        MessTimetable {
            id: TimetableId(record.timetable_id),
            filename: record.filename,
            file_url: record.file_url,
            uploaded_by: record.uploaded_by,
            uploaded_at: record.uploaded_at,
        }
    }
}

/// Body for `POST /v1/mess-timetable`. File bytes travel base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadTimetableRequest {
    pub filename: String,
    pub content_type: String,
    pub data: String,
    pub uploaded_by: String,
}

impl UploadTimetableRequest {
    pub fn from_upload(upload: TimetableUpload, uploaded_by: &str) -> Self {
        Self {
            filename: upload.filename,
            content_type: upload.content_type,
            data: base64::engine::general_purpose::STANDARD.encode(&upload.bytes),
            uploaded_by: uploaded_by.to_string(),
        }
    }
}

/// The store's `{success, data}` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

/// Error body returned by the store on 4xx/5xx.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}
