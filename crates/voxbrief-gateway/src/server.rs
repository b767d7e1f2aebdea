// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the webhook gateway.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use voxbrief_config::model::MessagesConfig;
use voxbrief_core::{ChatApi, KeyValueStore, VoxbriefError};
use voxbrief_jobs::JobProcessor;
use voxbrief_queue::Dispatcher;
use voxbrief_store::RateLimiter;

use crate::handlers;
use crate::ingress::IngressSettings;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The job pipeline, used by the queue callback and inline fallback.
    pub processor: Arc<JobProcessor>,
    /// Queue publisher for asynchronous dispatch.
    pub dispatcher: Arc<Dispatcher>,
    /// Shared store for the ingress idempotency pre-check.
    pub store: Arc<dyn KeyValueStore>,
    /// Rate limiter for the ingress pre-check.
    pub limiter: Arc<RateLimiter>,
    /// Outbound chat client for ingress notices.
    pub chat: Arc<dyn ChatApi>,
    /// Ingress policy.
    pub settings: Arc<IngressSettings>,
    /// User-facing message text.
    pub messages: Arc<MessagesConfig>,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

/// Listen address for the gateway.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Builds the gateway router.
///
/// Routes:
/// - POST /telegram/webhook (secret header auth, immediate 200)
/// - POST /jobs/process (queue callback)
/// - GET /health
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/telegram/webhook", post(handlers::post_webhook))
        .route("/jobs/process", post(handlers::post_process_job))
        .route("/health", get(handlers::get_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the gateway HTTP server and serves until the process exits.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), VoxbriefError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| VoxbriefError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| VoxbriefError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
