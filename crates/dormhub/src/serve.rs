// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dormhub serve` command implementation.
//!
//! Wires the store client and the NLU adapter into the gateway and runs
//! the HTTP server until shutdown.

use std::sync::Arc;

use dormhub_client::ComplaintApiClient;
use dormhub_config::DormhubConfig;
use dormhub_core::DormhubError;
use dormhub_dialogflow::DialogflowAdapter;
use dormhub_gateway::{GatewayState, ServerConfig, start_server};
use tracing::info;

/// Runs the `dormhub serve` command.
pub async fn run_serve(config: DormhubConfig) -> Result<(), DormhubError> {
    init_tracing(&config.portal.log_level);

    let store = ComplaintApiClient::new(
        config.store.base_url.clone(),
        config.store.api_token.clone(),
    )?;
    info!(base_url = %config.store.base_url, "complaint store client initialized");

    let nlu = DialogflowAdapter::from_config(&config.nlu);
    if !nlu.is_live() {
        info!("chatbot running in demo mode");
    }

    let state = GatewayState {
        store: Arc::new(store),
        nlu: Arc::new(nlu),
    };
    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    start_server(&server_config, state).await
}

/// Initializes the tracing subscriber from the configured log level.
/// `RUST_LOG` takes precedence when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
