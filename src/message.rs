// src/message.rs
// Notification messages and the text sent for each game outcome.

use serde::{Deserialize, Serialize};

use crate::defs::{LOSS_TEMPLATE, SUCCESS_TEMPLATE_PREFIX, SUCCESS_TEMPLATE_SUFFIX};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
}

/// One message object as the messaging API expects it:
/// `{"type": "text", "text": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub text: String,
}

impl NotificationMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::Text, text: text.into() }
    }
}

/// Build the message for a finished round. A loss always reports zero,
/// whatever score was sent.
pub fn compose_message(score: f64, is_game_over: bool) -> NotificationMessage {
    if is_game_over {
        NotificationMessage::text(LOSS_TEMPLATE)
    } else {
        NotificationMessage::text(format!("{SUCCESS_TEMPLATE_PREFIX}{score}{SUCCESS_TEMPLATE_SUFFIX}"))
    }
}
