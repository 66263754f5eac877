// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP adapter for the remote complaint and timetable store.
//!
//! This crate implements [`ComplaintStore`] over the store's REST API,
//! providing typed create/read/update calls with transient error retry.

pub mod client;
pub mod types;

use async_trait::async_trait;
use dormhub_core::store::ComplaintStore;
use dormhub_core::types::{
    Complaint, ComplaintId, ComplaintStatus, MessTimetable, NewComplaint, TimetableId,
    TimetableUpload,
};
use dormhub_core::DormhubError;

pub use client::ComplaintApiClient;

#[async_trait]
impl ComplaintStore for ComplaintApiClient {
    async fn list_all(&self) -> Result<Vec<Complaint>, DormhubError> {
        ComplaintApiClient::list_all(self).await
    }

    async fn list_for_student(
        &self,
        student_id: &str,
    ) -> Result<Vec<Complaint>, DormhubError> {
        ComplaintApiClient::list_for_student(self, student_id).await
    }

    async fn create(&self, complaint: NewComplaint) -> Result<Complaint, DormhubError> {
        ComplaintApiClient::create(self, complaint).await
    }

    async fn update_status(
        &self,
        id: &ComplaintId,
        status: ComplaintStatus,
    ) -> Result<Complaint, DormhubError> {
        ComplaintApiClient::update_status(self, id, status).await
    }

    async fn current_timetable(&self) -> Result<Option<MessTimetable>, DormhubError> {
        ComplaintApiClient::current_timetable(self).await
    }

    async fn upload_timetable(
        &self,
        upload: TimetableUpload,
        uploaded_by: &str,
    ) -> Result<MessTimetable, DormhubError> {
        ComplaintApiClient::upload_timetable(self, upload, uploaded_by).await
    }

    async fn delete_timetable(&self, id: &TimetableId) -> Result<(), DormhubError> {
        ComplaintApiClient::delete_timetable(self, id).await
    }
}
