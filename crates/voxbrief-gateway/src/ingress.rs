// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The asynchronous half of the webhook: filtering, pre-checks, and dispatch.
//!
//! Runs after the webhook has already been acknowledged, so nothing here can
//! delay or fail the platform's delivery. A validated, rate-permitted,
//! non-duplicate voice message leaves this module either published to the
//! queue or processed inline; it is never silently dropped past those gates.

use tracing::{debug, info, warn};
use voxbrief_core::StoreResult;
use voxbrief_queue::PublishOutcome;

use crate::server::GatewayState;
use crate::update::Update;

/// Ingress policy, taken from the bot configuration at startup.
#[derive(Debug, Clone)]
pub struct IngressSettings {
    /// Kill switch: when false the webhook acknowledges and discards.
    pub enabled: bool,
    /// Expected value of the webhook secret header, when configured.
    pub secret_token: Option<String>,
    /// Clips longer than this are refused without processing.
    pub max_audio_duration_secs: u32,
}

/// Handles one authenticated update end to end.
pub async fn handle_update(state: GatewayState, update: Update) {
    let Some(message) = update.message else {
        debug!("update carries no message, ignoring");
        return;
    };

    let Some(attachment) = message.attachment().cloned() else {
        debug!(
            chat_id = message.chat.id,
            message_id = message.message_id,
            "message carries no voice or audio, ignoring"
        );
        return;
    };

    let Some(user) = &message.from else {
        info!(
            chat_id = message.chat.id,
            message_id = message.message_id,
            "message has no sender, ignoring"
        );
        return;
    };

    let payload = message.to_payload(&attachment);
    let messages = &state.messages;

    // Cheap duplicate filter; the pipeline re-checks authoritatively.
    if let StoreResult::Ok(true) = state.store.exists(&payload.idempotency_key()).await {
        info!(
            chat_id = payload.chat_id,
            message_id = payload.message_id,
            "duplicate update, not dispatching"
        );
        return;
    }

    let max = state.settings.max_audio_duration_secs;
    if payload.duration > max {
        info!(
            chat_id = payload.chat_id,
            duration = payload.duration,
            max,
            "audio exceeds duration cap"
        );
        notify(&state, payload.chat_id, &messages.too_long_text(payload.duration, max)).await;
        return;
    }

    if !state.limiter.allow(payload.principal()).await.is_allowed() {
        info!(
            chat_id = payload.chat_id,
            user_id = user.id,
            "rate limited at ingress"
        );
        notify(&state, payload.chat_id, &messages.rate_limited).await;
        return;
    }

    match state.dispatcher.publish(&payload).await {
        PublishOutcome::Accepted => {
            info!(
                chat_id = payload.chat_id,
                message_id = payload.message_id,
                "job dispatched to queue"
            );
            metrics::counter!("voxbrief_ingress_total", "path" => "queued").increment(1);
        }
        PublishOutcome::NotAccepted { reason } => {
            info!(
                chat_id = payload.chat_id,
                message_id = payload.message_id,
                reason,
                "running job inline"
            );
            metrics::counter!("voxbrief_ingress_total", "path" => "inline").increment(1);
            notify(&state, payload.chat_id, &messages.ack).await;
            state.processor.process(&payload).await;
        }
    }
}

async fn notify(state: &GatewayState, chat_id: i64, text: &str) {
    if let Err(e) = state.chat.send_message(chat_id, text).await {
        warn!(chat_id, error = %e, "failed to send user notice");
    }
}
