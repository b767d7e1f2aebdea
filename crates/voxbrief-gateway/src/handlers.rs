// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! The webhook handler authenticates, then acknowledges before any work
//! happens: Telegram retries webhooks that answer slowly or with errors, and
//! a retry storm is worse than a lost malformed update. Everything after
//! authentication runs in a spawned task.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, info};
use voxbrief_core::{JobPayload, ProcessingResult, SkipReason};

use crate::ingress;
use crate::server::GatewayState;
use crate::update::Update;

/// Header Telegram echoes back when a webhook secret is registered.
const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Response body for POST /jobs/process.
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub ok: bool,
    pub outcome: String,
}

/// POST /telegram/webhook
///
/// Authenticates the secret header, then answers 200 immediately. The update
/// body is parsed leniently: an unparseable body is logged and dropped, never
/// bounced back to Telegram.
pub async fn post_webhook(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(expected) = &state.settings.secret_token {
        let presented = headers
            .get(SECRET_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if presented != expected {
            info!("webhook rejected: secret token mismatch");
            return (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "ok": false, "error": "unauthorized" })),
            )
                .into_response();
        }
    }

    if !state.settings.enabled {
        debug!("bot disabled, acknowledging and discarding update");
        return Json(serde_json::json!({ "ok": true, "disabled": true })).into_response();
    }

    match serde_json::from_slice::<Update>(&body) {
        Ok(update) => {
            tokio::spawn(ingress::handle_update(state, update));
        }
        Err(e) => {
            info!(error = %e, "discarding unparseable webhook body");
        }
    }

    Json(serde_json::json!({ "ok": true })).into_response()
}

/// POST /jobs/process
///
/// Queue callback: runs the delivered payload through the pipeline and
/// reports the outcome. Always 200; the pipeline result is informational so
/// the queue never retries a job that resolved.
pub async fn post_process_job(
    State(state): State<GatewayState>,
    Json(payload): Json<JobPayload>,
) -> Json<ProcessResponse> {
    let result = state.processor.process(&payload).await;

    Json(ProcessResponse {
        ok: true,
        outcome: outcome_name(&result),
    })
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

fn outcome_name(result: &ProcessingResult) -> String {
    match result {
        ProcessingResult::Succeeded => "succeeded".to_string(),
        ProcessingResult::Skipped(SkipReason::Invalid) => "skipped_invalid".to_string(),
        ProcessingResult::Skipped(SkipReason::Duplicate) => "skipped_duplicate".to_string(),
        ProcessingResult::EmptyTranscript => "empty_transcript".to_string(),
        ProcessingResult::Failed { stage, .. } => format!("failed_{stage}"),
    }
}
