// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Dialogflow v2 REST API and the normalized response
//! shape the rest of the portal consumes.

use serde::{Deserialize, Serialize};

/// Portal NLU credential file contents.
///
/// Token minting against Google OAuth is the deployment tooling's job; this
/// file carries the ready-to-use bearer token (and optionally the project id)
/// the adapter sends with every request.
#[derive(Debug, Clone, Deserialize)]
pub struct NluCredential {
    #[serde(default)]
    pub project_id: Option<String>,
    pub access_token: String,
}

/// Request body for `sessions/{session}:detectIntent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectIntentRequest {
    pub query_input: QueryInput,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryInput {
    pub text: TextInput,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInput {
    pub text: String,
    pub language_code: String,
}

/// Response body for `sessions/{session}:detectIntent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectIntentResponse {
    pub query_result: QueryResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub fulfillment_text: String,
    #[serde(default)]
    pub intent: Option<IntentRef>,
    #[serde(default)]
    pub intent_detection_confidence: f32,
    #[serde(default)]
    pub parameters: serde_json::Value,
    #[serde(default)]
    pub all_required_params_present: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRef {
    #[serde(default)]
    pub display_name: String,
}

/// An active conversation context, addressed as
/// `{session_path}/contexts/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NluContext {
    pub name: String,
    #[serde(default)]
    pub lifespan_count: u32,
    #[serde(default)]
    pub parameters: serde_json::Value,
}

/// Response body for the context list call.
#[derive(Debug, Clone, Deserialize)]
pub struct ListContextsResponse {
    #[serde(default)]
    pub contexts: Vec<NluContext>,
}

/// Normalized intent detection result handed to callers.
///
/// Failures never escape the adapter: transport or service errors surface
/// here as `success: false` with a generic apology in `fulfillment_text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResponse {
    pub success: bool,
    pub fulfillment_text: String,
    pub intent: Option<String>,
    pub confidence: f32,
    pub parameters: serde_json::Value,
    pub all_required_params_present: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Fail-soft result of a context creation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
