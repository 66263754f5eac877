// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dormhub chat` command implementation.
//!
//! One-shot chatbot exchange from the terminal. Without NLU credentials
//! this exercises demo mode, which is handy for checking a deployment
//! before wiring the real agent.

use dormhub_config::DormhubConfig;
use dormhub_dialogflow::DialogflowAdapter;

/// Runs the `dormhub chat` command.
pub async fn run_chat(config: &DormhubConfig, message: &str) {
    let adapter = DialogflowAdapter::from_config(&config.nlu);
    let session_id = adapter.generate_session_id();
    let reply = adapter.detect_intent(&session_id, message).await;

    println!("{}", reply.fulfillment_text);
    if let Some(intent) = &reply.intent {
        println!(
            "[intent: {intent}, confidence: {:.2}, session: {}]",
            reply.confidence, session_id.0
        );
    }
    if let Some(error) = &reply.error {
        eprintln!("[nlu error: {error}]");
    }
}
