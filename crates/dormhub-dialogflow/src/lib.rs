// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dialogflow NLU adapter for the Dormhub chatbot.
//!
//! The adapter is decided at construction time: [`DialogflowAdapter::Live`]
//! wraps an authenticated HTTP client, while [`DialogflowAdapter::Demo`]
//! answers every query with a fixed informational message. Missing or
//! invalid credentials degrade to demo mode instead of failing, so the
//! surrounding portal never needs a "service unavailable" branch.

pub mod client;
pub mod types;

use dormhub_config::NluConfig;
use dormhub_core::types::SessionId;
use tracing::{info, warn};
use uuid::Uuid;

pub use client::DialogflowClient;
pub use types::{ContextResult, IntentResponse, NluContext, NluCredential};

/// Fixed reply returned for every query in demo mode.
pub const DEMO_FULFILLMENT: &str = "Hello! The chatbot is running in demo mode. \
Install the portal's NLU credential file and set an agent project id to enable live answers.";

/// Intent name reported in demo mode.
pub const DEMO_INTENT: &str = "demo.mode";

/// Generic apology returned when the live NLU service fails.
const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

/// The chatbot NLU adapter, split into live and demo variants at
/// construction.
pub enum DialogflowAdapter {
    /// Credentials resolved; queries go to the Dialogflow service.
    Live(DialogflowClient),
    /// Credentials absent or invalid; every call answers locally.
    Demo,
}

impl DialogflowAdapter {
    /// Builds the adapter from configuration.
    ///
    /// Goes live only when a project id is known (config or credential
    /// file) and the credential file parses to a usable bearer token. Any
    /// missing piece degrades to demo mode with a logged warning; this
    /// constructor never fails.
    pub fn from_config(config: &NluConfig) -> Self {
        let raw = match std::fs::read_to_string(&config.credentials_file) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    path = %config.credentials_file,
                    error = %e,
                    "NLU credential file not readable, chatbot running in demo mode"
                );
                return Self::Demo;
            }
        };

        let credential: NluCredential = match serde_json::from_str(&raw) {
            Ok(credential) => credential,
            Err(e) => {
                warn!(
                    path = %config.credentials_file,
                    error = %e,
                    "NLU credential file invalid, chatbot running in demo mode"
                );
                return Self::Demo;
            }
        };

        if credential.access_token.trim().is_empty() {
            warn!("NLU credential has an empty access token, chatbot running in demo mode");
            return Self::Demo;
        }

        let project_id = match config.project_id.clone().or(credential.project_id) {
            Some(project) if !project.trim().is_empty() => project,
            _ => {
                warn!("no NLU project id configured, chatbot running in demo mode");
                return Self::Demo;
            }
        };

        match DialogflowClient::new(
            config.endpoint.clone(),
            project_id,
            &credential.access_token,
            config.language_code.clone(),
        ) {
            Ok(client) => {
                info!(project = client.project_id(), "Dialogflow adapter initialized");
                Self::Live(client)
            }
            Err(e) => {
                warn!(error = %e, "failed to build NLU client, chatbot running in demo mode");
                Self::Demo
            }
        }
    }

    /// True when queries reach the external NLU service.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    /// Generates a fresh opaque session token. The caller persists it for
    /// the conversation's duration.
    pub fn generate_session_id(&self) -> SessionId {
        SessionId(Uuid::new_v4().to_string())
    }

    /// Forwards a text query and normalizes the response.
    ///
    /// Never fails past this boundary: transport or service errors come
    /// back as `success: false` with a generic apology.
    pub async fn detect_intent(&self, session_id: &SessionId, query: &str) -> IntentResponse {
        match self {
            Self::Demo => IntentResponse {
                success: true,
                fulfillment_text: DEMO_FULFILLMENT.to_string(),
                intent: Some(DEMO_INTENT.to_string()),
                confidence: 1.0,
                parameters: serde_json::json!({}),
                all_required_params_present: true,
                error: None,
            },
            Self::Live(client) => match client.detect_intent(session_id, query).await {
                Ok(result) => IntentResponse {
                    success: true,
                    fulfillment_text: result.fulfillment_text,
                    intent: result.intent.map(|i| i.display_name),
                    confidence: result.intent_detection_confidence,
                    parameters: if result.parameters.is_null() {
                        serde_json::json!({})
                    } else {
                        result.parameters
                    },
                    all_required_params_present: result.all_required_params_present,
                    error: None,
                },
                Err(e) => {
                    warn!(session = %session_id.0, error = %e, "detectIntent failed");
                    IntentResponse {
                        success: false,
                        fulfillment_text: APOLOGY.to_string(),
                        intent: None,
                        confidence: 0.0,
                        parameters: serde_json::json!({}),
                        all_required_params_present: false,
                        error: Some(e.to_string()),
                    }
                }
            },
        }
    }

    /// Lists the active contexts for a session. Failures are swallowed and
    /// reported as an empty list.
    pub async fn get_contexts(&self, session_id: &SessionId) -> Vec<NluContext> {
        match self {
            Self::Demo => Vec::new(),
            Self::Live(client) => match client.list_contexts(session_id).await {
                Ok(contexts) => contexts,
                Err(e) => {
                    warn!(session = %session_id.0, error = %e, "context listing failed");
                    Vec::new()
                }
            },
        }
    }

    /// Creates a context for a session. Failures are swallowed into the
    /// `{success, error}` result shape.
    pub async fn create_context(
        &self,
        session_id: &SessionId,
        context_name: &str,
        parameters: serde_json::Value,
        lifespan_count: u32,
    ) -> ContextResult {
        match self {
            Self::Demo => ContextResult { success: true, error: None },
            Self::Live(client) => {
                match client
                    .create_context(session_id, context_name, parameters, lifespan_count)
                    .await
                {
                    Ok(_) => ContextResult { success: true, error: None },
                    Err(e) => {
                        warn!(session = %session_id.0, error = %e, "context creation failed");
                        ContextResult { success: false, error: Some(e.to_string()) }
                    }
                }
            }
        }
    }
}
