// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Dialogflow v2 REST API.
//!
//! Session path convention: `projects/{project}/agent/sessions/{session}`,
//! with contexts addressed as `{session_path}/contexts/{name}`.

use std::time::Duration;

use dormhub_core::DormhubError;
use dormhub_core::types::SessionId;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{
    DetectIntentRequest, DetectIntentResponse, ListContextsResponse, NluContext, QueryInput,
    QueryResult, TextInput,
};

/// HTTP client for Dialogflow session calls.
///
/// Errors here are raw transport/service failures; the adapter layer above
/// converts them into the portal's fail-soft response shapes.
#[derive(Debug, Clone)]
pub struct DialogflowClient {
    client: reqwest::Client,
    endpoint: String,
    project_id: String,
    language_code: String,
}

impl DialogflowClient {
    /// Creates a new Dialogflow client with bearer authentication.
    pub fn new(
        endpoint: String,
        project_id: String,
        access_token: &str,
        language_code: String,
    ) -> Result<Self, DormhubError> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&format!("Bearer {access_token}"))
            .map_err(|e| DormhubError::Config(format!("invalid NLU access token: {e}")))?;
        headers.insert("authorization", value);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DormhubError::Nlu {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id,
            language_code,
        })
    }

    /// Returns the project id this client is bound to.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Overrides the endpoint (for testing with wiremock).
    #[cfg(test)]
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// Builds the session path for a conversation.
    pub fn session_path(&self, session_id: &SessionId) -> String {
        format!("projects/{}/agent/sessions/{}", self.project_id, session_id.0)
    }

    /// Sends a text query and returns the raw query result.
    pub async fn detect_intent(
        &self,
        session_id: &SessionId,
        query: &str,
    ) -> Result<QueryResult, DormhubError> {
        let url = format!(
            "{}/v2/{}:detectIntent",
            self.endpoint,
            self.session_path(session_id)
        );
        let request = DetectIntentRequest {
            query_input: QueryInput {
                text: TextInput {
                    text: query.to_string(),
                    language_code: self.language_code.clone(),
                },
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DormhubError::Nlu {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, session = %session_id.0, "detectIntent response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DormhubError::Nlu {
                message: format!("NLU service returned {status}: {body}"),
                source: None,
            });
        }

        let body: DetectIntentResponse =
            response.json().await.map_err(|e| DormhubError::Nlu {
                message: format!("failed to parse detectIntent response: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(body.query_result)
    }

    /// Lists the active contexts for a session.
    pub async fn list_contexts(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<NluContext>, DormhubError> {
        let url = format!(
            "{}/v2/{}/contexts",
            self.endpoint,
            self.session_path(session_id)
        );

        let response = self.client.get(&url).send().await.map_err(|e| DormhubError::Nlu {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DormhubError::Nlu {
                message: format!("NLU service returned {status}: {body}"),
                source: None,
            });
        }

        let body: ListContextsResponse =
            response.json().await.map_err(|e| DormhubError::Nlu {
                message: format!("failed to parse contexts response: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(body.contexts)
    }

    /// Creates a context for a session. The context name is expanded to the
    /// full `{session_path}/contexts/{name}` form.
    pub async fn create_context(
        &self,
        session_id: &SessionId,
        context_name: &str,
        parameters: serde_json::Value,
        lifespan_count: u32,
    ) -> Result<NluContext, DormhubError> {
        let session_path = self.session_path(session_id);
        let url = format!("{}/v2/{}/contexts", self.endpoint, session_path);
        let context = NluContext {
            name: format!("{session_path}/contexts/{context_name}"),
            lifespan_count,
            parameters,
        };

        let response = self
            .client
            .post(&url)
            .json(&context)
            .send()
            .await
            .map_err(|e| DormhubError::Nlu {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DormhubError::Nlu {
                message: format!("NLU service returned {status}: {body}"),
                source: None,
            });
        }

        response.json().await.map_err(|e| DormhubError::Nlu {
            message: format!("failed to parse context response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
