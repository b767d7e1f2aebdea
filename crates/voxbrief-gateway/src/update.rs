// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram update envelope types.
//!
//! Deliberately partial: only the fields the ingress needs. Everything else
//! in an update is ignored, and every field the Bot API marks optional is
//! optional here, so an unexpected update shape never fails the webhook.

use serde::Deserialize;
use voxbrief_core::JobPayload;

/// An incoming webhook update.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub message: Option<Message>,
}

/// The message object inside an update.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub voice: Option<AudioAttachment>,
    #[serde(default)]
    pub audio: Option<AudioAttachment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
}

/// A voice note or audio file attachment.
#[derive(Debug, Clone, Deserialize)]
pub struct AudioAttachment {
    pub file_id: String,
    #[serde(default)]
    pub duration: u32,
}

impl Message {
    /// The actionable attachment, preferring voice notes over audio files.
    pub fn attachment(&self) -> Option<&AudioAttachment> {
        self.voice.as_ref().or(self.audio.as_ref())
    }

    /// Builds a job payload from this message and its attachment.
    pub fn to_payload(&self, attachment: &AudioAttachment) -> JobPayload {
        JobPayload {
            chat_id: self.chat.id,
            message_id: self.message_id,
            file_id: attachment.file_id.clone(),
            duration: attachment.duration,
            user_id: self.from.as_ref().map(|user| user.id),
        }
    }
}
