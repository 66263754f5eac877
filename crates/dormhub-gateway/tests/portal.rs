// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router-level tests for the portal surface.
//!
//! Each test drives the axum router directly with `tower::ServiceExt::oneshot`
//! against an in-memory store and the demo NLU adapter, so no sockets or
//! external services are involved.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use chrono::{TimeZone, Utc};
use http::{Request, StatusCode};
use tower::ServiceExt;

use dormhub_core::types::{
    Complaint, ComplaintId, ComplaintStatus, Department, MessTimetable, NewComplaint, Severity,
    TimetableId, TimetableUpload,
};
use dormhub_core::{ComplaintStore, DormhubError};
use dormhub_dialogflow::DialogflowAdapter;
use dormhub_gateway::{GatewayState, router};

/// In-memory stand-in for the remote complaint store.
///
/// Counters record how often mutations reach the store, so tests can assert
/// that pre-flight validation and idempotent no-ops skip the round-trip.
#[derive(Default)]
struct InMemoryStore {
    complaints: Mutex<Vec<Complaint>>,
    timetable: Mutex<Option<MessTimetable>>,
    next_id: AtomicUsize,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    upload_calls: AtomicUsize,
}

impl InMemoryStore {
    fn seeded() -> Self {
        let store = Self::default();
        let seed = [
            ("c-1", "s-1", Department::Mess, ComplaintStatus::Pending),
            ("c-2", "s-2", Department::Maintenance, ComplaintStatus::Resolved),
            ("c-3", "s-1", Department::Water, ComplaintStatus::Pending),
            ("c-4", "s-3", Department::Carpool, ComplaintStatus::Pending),
        ];
        let mut complaints = store.complaints.lock().unwrap();
        for (id, student, dept, status) in seed {
            complaints.push(Complaint {
                id: ComplaintId(id.into()),
                student_id: student.into(),
                dept,
                title: format!("complaint {id}"),
                description: "details".into(),
                severity: Severity::Medium,
                status,
                created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
            });
        }
        drop(complaints);
        store
    }
}

#[async_trait]
impl ComplaintStore for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Complaint>, DormhubError> {
        Ok(self.complaints.lock().unwrap().clone())
    }

    async fn list_for_student(&self, student_id: &str) -> Result<Vec<Complaint>, DormhubError> {
        Ok(self
            .complaints
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn create(&self, complaint: NewComplaint) -> Result<Complaint, DormhubError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        complaint.validate()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Complaint {
            id: ComplaintId(format!("c-new-{n}")),
            student_id: complaint.student_id,
            dept: complaint.dept,
            title: complaint.title,
            description: complaint.description,
            severity: complaint.severity,
            status: ComplaintStatus::Pending,
            created_at: Utc::now(),
        };
        self.complaints.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_status(
        &self,
        id: &ComplaintId,
        status: ComplaintStatus,
    ) -> Result<Complaint, DormhubError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut complaints = self.complaints.lock().unwrap();
        let complaint = complaints
            .iter_mut()
            .find(|c| c.id == *id)
            .ok_or_else(|| DormhubError::Store {
                message: "complaint not found".into(),
                source: None,
            })?;
        complaint.status = status;
        Ok(complaint.clone())
    }

    async fn current_timetable(&self) -> Result<Option<MessTimetable>, DormhubError> {
        Ok(self.timetable.lock().unwrap().clone())
    }

    async fn upload_timetable(
        &self,
        upload: TimetableUpload,
        uploaded_by: &str,
    ) -> Result<MessTimetable, DormhubError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        upload.validate()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let timetable = MessTimetable {
            id: TimetableId(format!("t-{n}")),
            filename: upload.filename.clone(),
            file_url: format!("https://files.test/{}", upload.filename),
            uploaded_by: uploaded_by.into(),
            uploaded_at: Utc::now(),
        };
        *self.timetable.lock().unwrap() = Some(timetable.clone());
        Ok(timetable)
    }

    async fn delete_timetable(&self, id: &TimetableId) -> Result<(), DormhubError> {
        let mut timetable = self.timetable.lock().unwrap();
        match timetable.as_ref() {
            Some(current) if current.id == *id => {
                *timetable = None;
                Ok(())
            }
            _ => Err(DormhubError::Store { message: "timetable not found".into(), source: None }),
        }
    }
}

fn app(store: Arc<InMemoryStore>) -> axum::Router {
    router(GatewayState {
        store,
        nlu: Arc::new(DialogflowAdapter::Demo),
    })
}

fn request(
    method: &str,
    uri: &str,
    identity: &[(&str, &str)],
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in identity {
        builder = builder.header(*name, *value);
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

const STUDENT_S1: &[(&str, &str)] = &[("x-portal-role", "student"), ("x-portal-user", "s-1")];
const ADMIN: &[(&str, &str)] = &[("x-portal-role", "admin"), ("x-portal-user", "a-1")];
const MESS_ADMIN: &[(&str, &str)] = &[
    ("x-portal-role", "admin"),
    ("x-portal-user", "a-1"),
    ("x-portal-dept", "mess"),
];
const DRIVER: &[(&str, &str)] = &[("x-portal-role", "driver"), ("x-portal-user", "d-1")];

#[tokio::test]
async fn health_is_public() {
    let response = app(Arc::new(InMemoryStore::seeded()))
        .oneshot(request("GET", "/health", &[], None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn department_view_requires_a_role() {
    let response = app(Arc::new(InMemoryStore::seeded()))
        .oneshot(request("GET", "/v1/departments/mess/complaints", &[], None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_maintenance_view_aggregates_cluster() {
    let response = app(Arc::new(InMemoryStore::seeded()))
        .oneshot(request("GET", "/v1/departments/maintenance/complaints", ADMIN, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    // MAINTENANCE aggregates HOUSEKEEPING and WATER: c-2 and c-3.
    assert_eq!(body["rows"].as_array().unwrap().len(), 2);
    assert_eq!(body["counts"]["total"], 2);
    assert_eq!(body["counts"]["pending"], 1);
    assert_eq!(body["counts"]["resolved"], 1);
    assert_eq!(body["counts"]["in_progress"], 0);
}

#[tokio::test]
async fn student_sees_only_their_complaints() {
    let response = app(Arc::new(InMemoryStore::seeded()))
        .oneshot(request("GET", "/v1/departments/mess/complaints", STUDENT_S1, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "c-1");
    assert_eq!(body["counts"]["total"], 1);
}

#[tokio::test]
async fn driver_view_is_pinned_to_carpool() {
    let response = app(Arc::new(InMemoryStore::seeded()))
        .oneshot(request("GET", "/v1/departments/mess/complaints", DRIVER, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["dept"], "CARPOOL");
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "c-4");
}

#[tokio::test]
async fn status_filter_narrows_rows_but_not_counts() {
    let response = app(Arc::new(InMemoryStore::seeded()))
        .oneshot(request(
            "GET",
            "/v1/departments/maintenance/complaints?status=pending",
            ADMIN,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["rows"].as_array().unwrap().len(), 1);
    assert_eq!(body["counts"]["total"], 2);
}

#[tokio::test]
async fn unknown_department_is_rejected() {
    let response = app(Arc::new(InMemoryStore::seeded()))
        .oneshot(request("GET", "/v1/departments/lawncare/complaints", ADMIN, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_status_filter_is_rejected() {
    let response = app(Arc::new(InMemoryStore::seeded()))
        .oneshot(request(
            "GET",
            "/v1/departments/mess/complaints?status=stalled",
            ADMIN,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn student_files_complaint_under_own_identity() {
    let store = Arc::new(InMemoryStore::seeded());
    let body = serde_json::json!({
        "dept": "NETWORK",
        "title": "No connectivity",
        "description": "WiFi down on floor 3",
        "severity": "high"
    });
    let response = app(store.clone())
        .oneshot(request("POST", "/v1/complaints", STUDENT_S1, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["student_id"], "s-1");
    assert_eq!(created["status"], "pending");
}

#[tokio::test]
async fn empty_title_complaint_never_reaches_the_store() {
    let store = Arc::new(InMemoryStore::seeded());
    let body = serde_json::json!({
        "dept": "NETWORK",
        "title": "  ",
        "description": "WiFi down",
        "severity": "high"
    });
    let response = app(store.clone())
        .oneshot(request("POST", "/v1/complaints", STUDENT_S1, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn driver_cannot_file_complaints() {
    let body = serde_json::json!({
        "dept": "CARPOOL",
        "title": "Flat tyre",
        "description": "Van 2",
        "severity": "low"
    });
    let response = app(Arc::new(InMemoryStore::seeded()))
        .oneshot(request("POST", "/v1/complaints", DRIVER, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_updates_status() {
    let store = Arc::new(InMemoryStore::seeded());
    let response = app(store.clone())
        .oneshot(request(
            "PATCH",
            "/v1/complaints/c-1/status",
            ADMIN,
            Some(serde_json::json!({"status": "in_progress"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["changed"], true);
    assert_eq!(body["complaint"]["status"], "in_progress");
    assert_eq!(store.update_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn same_status_update_skips_the_store() {
    let store = Arc::new(InMemoryStore::seeded());
    let response = app(store.clone())
        .oneshot(request(
            "PATCH",
            "/v1/complaints/c-1/status",
            ADMIN,
            Some(serde_json::json!({"status": "pending"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["changed"], false);
    assert_eq!(store.update_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn student_cannot_update_status() {
    let response = app(Arc::new(InMemoryStore::seeded()))
        .oneshot(request(
            "PATCH",
            "/v1/complaints/c-1/status",
            STUDENT_S1,
            Some(serde_json::json!({"status": "resolved"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn updating_a_missing_complaint_is_404() {
    let response = app(Arc::new(InMemoryStore::seeded()))
        .oneshot(request(
            "PATCH",
            "/v1/complaints/ghost/status",
            ADMIN,
            Some(serde_json::json!({"status": "resolved"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn absent_timetable_is_404() {
    let response = app(Arc::new(InMemoryStore::seeded()))
        .oneshot(request("GET", "/v1/mess/timetable", STUDENT_S1, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mess_admin_uploads_and_students_can_fetch() {
    let store = Arc::new(InMemoryStore::seeded());
    let body = serde_json::json!({
        "filename": "timetable.pdf",
        "content_type": "application/pdf",
        "data": "JVBERi0xLjc="
    });
    let response = app(store.clone())
        .oneshot(request("POST", "/v1/mess/timetable", MESS_ADMIN, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let uploaded = json_body(response).await;
    assert_eq!(uploaded["uploaded_by"], "a-1");

    let response = app(store)
        .oneshot(request("GET", "/v1/mess/timetable", STUDENT_S1, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = json_body(response).await;
    assert_eq!(fetched["filename"], "timetable.pdf");
}

#[tokio::test]
async fn non_pdf_upload_never_reaches_the_store() {
    let store = Arc::new(InMemoryStore::seeded());
    let body = serde_json::json!({
        "filename": "menu.png",
        "content_type": "image/png",
        "data": "aGVsbG8="
    });
    let response = app(store.clone())
        .oneshot(request("POST", "/v1/mess/timetable", MESS_ADMIN, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(store.upload_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn transport_admin_cannot_manage_the_timetable() {
    let transport_admin: &[(&str, &str)] = &[
        ("x-portal-role", "admin"),
        ("x-portal-user", "a-2"),
        ("x-portal-dept", "transport"),
    ];
    let body = serde_json::json!({
        "filename": "timetable.pdf",
        "content_type": "application/pdf",
        "data": "JVBERi0xLjc="
    });
    let response = app(Arc::new(InMemoryStore::seeded()))
        .oneshot(request("POST", "/v1/mess/timetable", transport_admin, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn deleting_the_timetable_clears_the_slot() {
    let store = Arc::new(InMemoryStore::seeded());
    let body = serde_json::json!({
        "filename": "timetable.pdf",
        "content_type": "application/pdf",
        "data": "JVBERi0xLjc="
    });
    let response = app(store.clone())
        .oneshot(request("POST", "/v1/mess/timetable", MESS_ADMIN, Some(body)))
        .await
        .unwrap();
    let uploaded = json_body(response).await;
    let id = uploaded["id"].as_str().unwrap().to_string();

    let response = app(store.clone())
        .oneshot(request(
            "DELETE",
            &format!("/v1/mess/timetable/{id}"),
            MESS_ADMIN,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app(store)
        .oneshot(request("GET", "/v1/mess/timetable", MESS_ADMIN, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chat_generates_a_session_and_answers_in_demo_mode() {
    let response = app(Arc::new(InMemoryStore::seeded()))
        .oneshot(request(
            "POST",
            "/v1/chat",
            STUDENT_S1,
            Some(serde_json::json!({"message": "hello"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(!body["session_id"].as_str().unwrap().is_empty());
    assert_eq!(body["reply"]["success"], true);
    assert_eq!(body["reply"]["intent"], "demo.mode");
    assert_eq!(body["reply"]["confidence"], 1.0);
}

#[tokio::test]
async fn chat_echoes_a_provided_session_id() {
    let response = app(Arc::new(InMemoryStore::seeded()))
        .oneshot(request(
            "POST",
            "/v1/chat",
            DRIVER,
            Some(serde_json::json!({"message": "hi", "session_id": "conv-7"})),
        ))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["session_id"], "conv-7");
}

#[tokio::test]
async fn empty_chat_message_is_rejected() {
    let response = app(Arc::new(InMemoryStore::seeded()))
        .oneshot(request(
            "POST",
            "/v1/chat",
            STUDENT_S1,
            Some(serde_json::json!({"message": "   "})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn chat_requires_a_role() {
    let response = app(Arc::new(InMemoryStore::seeded()))
        .oneshot(request(
            "POST",
            "/v1/chat",
            &[],
            Some(serde_json::json!({"message": "hello"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn demo_chat_contexts_are_empty() {
    let response = app(Arc::new(InMemoryStore::seeded()))
        .oneshot(request("GET", "/v1/chat/conv-7/contexts", STUDENT_S1, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["session_id"], "conv-7");
    assert!(body["contexts"].as_array().unwrap().is_empty());
}
