// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the portal REST API.
//!
//! Every handler re-derives the viewer context from request headers and
//! runs the role guard before composing a view or invoking a mutation.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use dormhub_core::DormhubError;
use dormhub_core::types::{
    Complaint, ComplaintStatus, Department, NewComplaint, Role, SessionId, Severity,
    TimetableId, TimetableUpload,
};
use dormhub_dialogflow::{IntentResponse, NluContext};
use dormhub_views::{ViewFilter, check_route, compose_for, may_update_status, plan_status_update};

use crate::identity::{parse_department, viewer_from_headers};
use crate::server::GatewayState;

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Query string for the department view route.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQueryParams {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
}

impl ViewQueryParams {
    /// Parses the raw query values into a typed filter. Absent values mean
    /// "any"; unrecognized values are rejected.
    fn to_filter(&self) -> Result<ViewFilter, DormhubError> {
        let status = match self.status.as_deref() {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(ComplaintStatus::from_str(raw).map_err(|_| {
                DormhubError::Validation(format!("unknown status filter `{raw}`"))
            })?),
        };
        let severity = match self.severity.as_deref() {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(Severity::from_str(raw).map_err(|_| {
                DormhubError::Validation(format!("unknown severity filter `{raw}`"))
            })?),
        };
        Ok(ViewFilter { status, severity })
    }
}

/// Request body for POST /v1/complaints.
#[derive(Debug, Deserialize)]
pub struct CreateComplaintBody {
    pub dept: Department,
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

/// Request body for PATCH /v1/complaints/{id}/status.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: ComplaintStatus,
}

/// Response body for PATCH /v1/complaints/{id}/status.
///
/// `changed: false` means the complaint already carried the requested
/// status and no store call was made.
#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub changed: bool,
    pub complaint: Complaint,
}

/// Request body for POST /v1/mess/timetable. File bytes travel base64-encoded.
#[derive(Debug, Deserialize)]
pub struct UploadTimetableBody {
    pub filename: String,
    pub content_type: String,
    pub data: String,
}

/// Request body for POST /v1/chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response body for POST /v1/chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: IntentResponse,
}

/// Response body for GET /v1/chat/{session_id}/contexts.
#[derive(Debug, Serialize)]
pub struct ContextsResponse {
    pub session_id: String,
    pub contexts: Vec<NluContext>,
}

/// Maps a portal error to its HTTP status.
fn error_status(err: &DormhubError) -> StatusCode {
    match err {
        DormhubError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DormhubError::Forbidden { .. } => StatusCode::FORBIDDEN,
        DormhubError::Store { .. } | DormhubError::Nlu { .. } => StatusCode::BAD_GATEWAY,
        DormhubError::Config(_) | DormhubError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: DormhubError) -> Response {
    (error_status(&err), Json(ErrorResponse { error: err.to_string() })).into_response()
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorResponse { error: message.to_string() }))
        .into_response()
}

/// GET /health
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /v1/departments/{dept}/complaints
///
/// Returns the role-scoped department view: filtered rows plus counts over
/// the department scope (counts ignore the status/severity filters).
pub async fn get_dept_complaints(
    State(state): State<GatewayState>,
    Path(dept): Path<String>,
    Query(params): Query<ViewQueryParams>,
    headers: HeaderMap,
) -> Response {
    let viewer = viewer_from_headers(&headers);
    let route = format!("/v1/departments/{dept}/complaints");
    if let Err(e) = check_route(&viewer, &route, &[Role::Student, Role::Admin, Role::Driver]) {
        return error_response(e);
    }

    let Some(dept) = parse_department(&dept) else {
        return error_response(DormhubError::Validation(format!("unknown department `{dept}`")));
    };

    let filter = match params.to_filter() {
        Ok(filter) => filter,
        Err(e) => return error_response(e),
    };

    // Students fetch their own complaints; other roles take the full
    // snapshot. Scoping and aggregation happen client-side either way.
    let snapshot = if viewer.role == Role::Student {
        match viewer.user_id.as_deref() {
            Some(student_id) => state.store.list_for_student(student_id).await,
            None => Err(DormhubError::Forbidden { role: viewer.role, route: route.clone() }),
        }
    } else {
        state.store.list_all().await
    };

    let snapshot = match snapshot {
        Ok(snapshot) => snapshot,
        Err(e) => return error_response(e),
    };

    match compose_for(&viewer, dept, &snapshot, &filter) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /v1/complaints
///
/// Students file complaints under their own identity; the body never names
/// the author. Invalid submissions are rejected before any store call.
pub async fn create_complaint(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(body): Json<CreateComplaintBody>,
) -> Response {
    let viewer = viewer_from_headers(&headers);
    if let Err(e) = check_route(&viewer, "/v1/complaints", &[Role::Student]) {
        return error_response(e);
    }
    let Some(student_id) = viewer.user_id else {
        return error_response(DormhubError::Forbidden {
            role: viewer.role,
            route: "/v1/complaints".to_string(),
        });
    };

    let complaint = NewComplaint {
        student_id,
        dept: body.dept,
        title: body.title,
        description: body.description,
        severity: body.severity,
    };
    if let Err(e) = complaint.validate() {
        return error_response(e);
    }

    match state.store.create(complaint).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => error_response(e),
    }
}

/// PATCH /v1/complaints/{id}/status
///
/// Admin-only. Requesting the complaint's current status is an idempotent
/// no-op: the gateway answers `changed: false` without a store round-trip.
pub async fn update_status(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<UpdateStatusBody>,
) -> Response {
    let viewer = viewer_from_headers(&headers);
    let route = format!("/v1/complaints/{id}/status");
    if let Err(e) = check_route(&viewer, &route, &[Role::Admin]) {
        return error_response(e);
    }
    if !may_update_status(viewer.role) {
        return error_response(DormhubError::Forbidden { role: viewer.role, route });
    }

    let snapshot = match state.store.list_all().await {
        Ok(snapshot) => snapshot,
        Err(e) => return error_response(e),
    };
    let Some(current) = snapshot.into_iter().find(|c| c.id.0 == id) else {
        return not_found("complaint not found");
    };

    match plan_status_update(current.status, body.status) {
        None => (
            StatusCode::OK,
            Json(StatusUpdateResponse { changed: false, complaint: current }),
        )
            .into_response(),
        Some(next) => match state.store.update_status(&current.id, next).await {
            Ok(updated) => (
                StatusCode::OK,
                Json(StatusUpdateResponse { changed: true, complaint: updated }),
            )
                .into_response(),
            Err(e) => error_response(e),
        },
    }
}

/// Admins may only manage the timetable from the mess cluster.
fn check_mess_admin(
    viewer: &dormhub_views::ViewerContext,
    route: &str,
) -> Result<(), DormhubError> {
    check_route(viewer, route, &[Role::Admin])?;
    if viewer.admin_dept.is_some_and(|dept| dept != Department::Mess) {
        return Err(DormhubError::Forbidden {
            role: viewer.role,
            route: route.to_string(),
        });
    }
    Ok(())
}

/// GET /v1/mess/timetable
pub async fn get_timetable(State(state): State<GatewayState>, headers: HeaderMap) -> Response {
    let viewer = viewer_from_headers(&headers);
    if let Err(e) = check_route(
        &viewer,
        "/v1/mess/timetable",
        &[Role::Student, Role::Admin, Role::Driver],
    ) {
        return error_response(e);
    }

    match state.store.current_timetable().await {
        Ok(Some(timetable)) => (StatusCode::OK, Json(timetable)).into_response(),
        Ok(None) => not_found("no timetable published"),
        Err(e) => error_response(e),
    }
}

/// POST /v1/mess/timetable
///
/// Mess-admin only. The PDF gate runs before any store call.
pub async fn upload_timetable(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(body): Json<UploadTimetableBody>,
) -> Response {
    let viewer = viewer_from_headers(&headers);
    if let Err(e) = check_mess_admin(&viewer, "/v1/mess/timetable") {
        return error_response(e);
    }
    let Some(uploader) = viewer.user_id else {
        return error_response(DormhubError::Forbidden {
            role: viewer.role,
            route: "/v1/mess/timetable".to_string(),
        });
    };

    let bytes = match base64::engine::general_purpose::STANDARD.decode(&body.data) {
        Ok(bytes) => bytes,
        Err(e) => {
            return error_response(DormhubError::Validation(format!(
                "timetable data is not valid base64: {e}"
            )));
        }
    };
    let upload = TimetableUpload {
        filename: body.filename,
        content_type: body.content_type,
        bytes,
    };
    if let Err(e) = upload.validate() {
        return error_response(e);
    }

    match state.store.upload_timetable(upload, &uploader).await {
        Ok(timetable) => (StatusCode::CREATED, Json(timetable)).into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /v1/mess/timetable/{id}
pub async fn delete_timetable(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let viewer = viewer_from_headers(&headers);
    let route = format!("/v1/mess/timetable/{id}");
    if let Err(e) = check_mess_admin(&viewer, &route) {
        return error_response(e);
    }

    match state.store.delete_timetable(&TimetableId(id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /v1/chat
///
/// Forwards the message to the NLU adapter. A missing session id means a
/// new conversation: the gateway generates a fresh token and returns it so
/// the caller can persist it. NLU failures still answer 200: the reply
/// carries `success: false` and an apology.
pub async fn post_chat(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(body): Json<ChatRequest>,
) -> Response {
    let viewer = viewer_from_headers(&headers);
    if let Err(e) = check_route(&viewer, "/v1/chat", &[Role::Student, Role::Admin, Role::Driver]) {
        return error_response(e);
    }
    if body.message.trim().is_empty() {
        return error_response(DormhubError::Validation("chat message must not be empty".into()));
    }

    let session_id = body
        .session_id
        .filter(|s| !s.trim().is_empty())
        .map(SessionId)
        .unwrap_or_else(|| state.nlu.generate_session_id());

    let reply = state.nlu.detect_intent(&session_id, &body.message).await;

    (
        StatusCode::OK,
        Json(ChatResponse { session_id: session_id.0, reply }),
    )
        .into_response()
}

/// GET /v1/chat/{session_id}/contexts
pub async fn get_chat_contexts(
    State(state): State<GatewayState>,
    Path(session_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let viewer = viewer_from_headers(&headers);
    let route = format!("/v1/chat/{session_id}/contexts");
    if let Err(e) = check_route(&viewer, &route, &[Role::Student, Role::Admin, Role::Driver]) {
        return error_response(e);
    }

    let session = SessionId(session_id.clone());
    let contexts = state.nlu.get_contexts(&session).await;
    (
        StatusCode::OK,
        Json(ContextsResponse { session_id, contexts }),
    )
        .into_response()
}
