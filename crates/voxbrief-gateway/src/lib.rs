// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook HTTP gateway for the Voxbrief bot.
//!
//! Serves three routes: the Telegram webhook (secret-token authenticated,
//! acknowledged immediately, processed asynchronously), the queue callback
//! that runs a job payload through the pipeline, and a health endpoint.
//!
//! The webhook handler never makes Telegram wait on processing: it answers
//! 200 as soon as the update is authenticated, then filters, pre-checks, and
//! dispatches in a spawned task. When the queue does not accept the job, the
//! same task runs it inline so a validated voice message is never dropped.

pub mod handlers;
pub mod ingress;
pub mod server;
pub mod update;

pub use ingress::IngressSettings;
pub use server::{GatewayState, build_router, start_server};
