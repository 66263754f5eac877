// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the remote complaint store API.
//!
//! Provides [`ComplaintApiClient`] which handles request construction,
//! authentication, response envelope parsing, and transient error retry.

use std::time::Duration;

use dormhub_core::DormhubError;
use dormhub_core::types::{
    Complaint, ComplaintId, ComplaintStatus, MessTimetable, NewComplaint, TimetableId,
    TimetableUpload,
};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::{
    ApiErrorResponse, ComplaintRecord, CreateComplaintRequest, Envelope, TimetableRecord,
    UpdateStatusRequest, UploadTimetableRequest,
};

/// HTTP client for complaint store communication.
///
/// Manages authentication headers, connection pooling, and retry logic
/// for transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct ComplaintApiClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl ComplaintApiClient {
    /// Creates a new complaint store client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the store API (no trailing slash)
    /// * `api_token` - Optional bearer token for authenticated deployments
    pub fn new(base_url: String, api_token: Option<String>) -> Result<Self, DormhubError> {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));
        if let Some(token) = api_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| DormhubError::Config(format!("invalid store API token: {e}")))?;
            headers.insert("authorization", value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DormhubError::Store {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: 1,
        })
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Fetches the full complaint set in one call. All filtering happens
    /// client-side over this snapshot.
    pub async fn list_all(&self) -> Result<Vec<Complaint>, DormhubError> {
        let url = format!("{}/v1/complaints", self.base_url);
        let response = self.dispatch(|| self.client.get(&url), "list complaints").await?;
        let records: Vec<ComplaintRecord> = self.parse_envelope(response).await?;
        Ok(records.into_iter().map(Complaint::from).collect())
    }

    /// Fetches the complaints authored by one student.
    pub async fn list_for_student(
        &self,
        student_id: &str,
    ) -> Result<Vec<Complaint>, DormhubError> {
        let url = format!("{}/v1/complaints", self.base_url);
        let response = self
            .dispatch(
                || self.client.get(&url).query(&[("student_id", student_id)]),
                "list student complaints",
            )
            .await?;
        let records: Vec<ComplaintRecord> = self.parse_envelope(response).await?;
        Ok(records.into_iter().map(Complaint::from).collect())
    }

    /// Files a new complaint. Invalid input is rejected before any request
    /// is issued.
    pub async fn create(&self, complaint: NewComplaint) -> Result<Complaint, DormhubError> {
        complaint.validate()?;
        let url = format!("{}/v1/complaints", self.base_url);
        let body = CreateComplaintRequest::from(complaint);
        let response = self
            .dispatch(|| self.client.post(&url).json(&body), "create complaint")
            .await?;
        let record: ComplaintRecord = self.parse_envelope(response).await?;
        Ok(record.into())
    }

    /// Moves a complaint to a new status.
    pub async fn update_status(
        &self,
        id: &ComplaintId,
        status: ComplaintStatus,
    ) -> Result<Complaint, DormhubError> {
        let url = format!("{}/v1/complaints/{}/status", self.base_url, id.0);
        let body = UpdateStatusRequest { status };
        let response = self
            .dispatch(|| self.client.patch(&url).json(&body), "update status")
            .await?;
        let record: ComplaintRecord = self.parse_envelope(response).await?;
        Ok(record.into())
    }

    /// Returns the current mess timetable. A 404 from the store means none
    /// is published and maps to `Ok(None)`.
    pub async fn current_timetable(&self) -> Result<Option<MessTimetable>, DormhubError> {
        let url = format!("{}/v1/mess-timetable/current", self.base_url);
        let response = self.dispatch(|| self.client.get(&url), "current timetable").await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let record: TimetableRecord = self.parse_envelope(response).await?;
        Ok(Some(record.into()))
    }

    /// Publishes a new timetable, replacing the current one. Non-PDF uploads
    /// are rejected before any request is issued.
    pub async fn upload_timetable(
        &self,
        upload: TimetableUpload,
        uploaded_by: &str,
    ) -> Result<MessTimetable, DormhubError> {
        upload.validate()?;
        let url = format!("{}/v1/mess-timetable", self.base_url);
        let body = UploadTimetableRequest::from_upload(upload, uploaded_by);
        let response = self
            .dispatch(|| self.client.post(&url).json(&body), "upload timetable")
            .await?;
        let record: TimetableRecord = self.parse_envelope(response).await?;
        Ok(record.into())
    }

    /// Removes the published timetable.
    pub async fn delete_timetable(&self, id: &TimetableId) -> Result<(), DormhubError> {
        let url = format!("{}/v1/mess-timetable/{}", self.base_url, id.0);
        let response = self
            .dispatch(|| self.client.delete(&url), "delete timetable")
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }

    /// Sends a request, retrying once after a 1-second delay on transient
    /// errors (429, 500, 503). Returns the response on success or 404;
    /// every other status is folded into a store error.
    async fn dispatch<F>(
        &self,
        build: F,
        what: &'static str,
    ) -> Result<reqwest::Response, DormhubError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, what, "retrying store request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = build().send().await.map_err(|e| DormhubError::Store {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

            let status = response.status();
            debug!(status = %status, attempt, what, "store response received");

            if status.is_success() || status == StatusCode::NOT_FOUND {
                return Ok(response);
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, what, "transient error, will retry");
                last_error = Some(DormhubError::Store {
                    message: format!("store returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            return Err(Self::error_from(response).await);
        }

        Err(last_error.unwrap_or_else(|| DormhubError::Store {
            message: format!("{what} failed after retries"),
            source: None,
        }))
    }

    /// Reads an error response body, preferring the store's structured
    /// `{error}` shape over the raw text.
    async fn error_from(response: reqwest::Response) -> DormhubError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
            format!("store error ({status}): {}", api_err.error)
        } else {
            format!("store returned {status}: {body}")
        };
        DormhubError::Store { message, source: None }
    }

    /// Parses a `{success, data}` envelope, surfacing malformed payloads as
    /// store errors.
    async fn parse_envelope<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, DormhubError> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let body = response.text().await.map_err(|e| DormhubError::Store {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| DormhubError::Store {
                message: format!("failed to parse store response: {e}"),
                source: Some(Box::new(e)),
            })?;
        if !envelope.success {
            return Err(DormhubError::Store {
                message: "store reported success=false".into(),
                source: None,
            });
        }
        Ok(envelope.data)
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
