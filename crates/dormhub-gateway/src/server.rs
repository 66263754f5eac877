// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, CORS, and shared state for the portal surface.

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use dormhub_core::{ComplaintStore, DormhubError};
use dormhub_dialogflow::DialogflowAdapter;
use tower_http::cors::CorsLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Adapter over the remote complaint/timetable store.
    pub store: Arc<dyn ComplaintStore>,
    /// Chatbot NLU adapter (live or demo).
    pub nlu: Arc<DialogflowAdapter>,
}

/// Gateway server configuration (mirrors GatewayConfig from dormhub-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the portal router. Exposed separately from [`start_server`] so
/// tests can drive it without binding a socket.
pub fn router(state: GatewayState) -> Router {
    // Public routes (health for orchestration probes).
    let public_routes = Router::new().route("/health", get(handlers::get_health));

    // Portal routes; the viewer guard runs inside each handler, re-evaluated
    // on every request.
    let portal_routes = Router::new()
        .route(
            "/v1/departments/{dept}/complaints",
            get(handlers::get_dept_complaints),
        )
        .route("/v1/complaints", post(handlers::create_complaint))
        .route("/v1/complaints/{id}/status", patch(handlers::update_status))
        .route("/v1/mess/timetable", get(handlers::get_timetable))
        .route("/v1/mess/timetable", post(handlers::upload_timetable))
        .route("/v1/mess/timetable/{id}", delete(handlers::delete_timetable))
        .route("/v1/chat", post(handlers::post_chat))
        .route("/v1/chat/{session_id}/contexts", get(handlers::get_chat_contexts));

    Router::new()
        .merge(public_routes)
        .merge(portal_routes)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), DormhubError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| DormhubError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| DormhubError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 7070,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
        assert!(debug.contains("7070"));
    }
}
