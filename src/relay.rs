// src/relay.rs
// Turns a reported game outcome into a push notification:
// user lookup -> message composition -> provider push.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::RelayError;
use crate::logging::log_info;
use crate::line::MessagingProvider;
use crate::message::{compose_message, NotificationMessage};
use crate::user::UserStore;

/// Outcome body posted by the game client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyRequest {
    pub user_id: String,
    pub score: f64,
    pub is_game_over: bool,
}

#[derive(Clone)]
pub struct Relay {
    store: Arc<dyn UserStore>,
    messenger: Arc<dyn MessagingProvider>,
}

impl Relay {
    pub fn new(store: Arc<dyn UserStore>, messenger: Arc<dyn MessagingProvider>) -> Self {
        Self { store, messenger }
    }

    /// Resolve the user, compose the outcome message and push it.
    ///
    /// Nothing is sent unless the user exists and has a messaging id. The
    /// push happens at most once per call; there is no retry.
    pub async fn notify(&self, request: &NotifyRequest) -> Result<NotificationMessage, RelayError> {
        let record = self.store
            .get_user(&request.user_id)
            .await?
            .ok_or_else(|| RelayError::UserNotFound(request.user_id.clone()))?;

        let line_user_id = record
            .messaging_id()
            .ok_or_else(|| RelayError::MessagingIdMissing(request.user_id.clone()))?;

        let message = compose_message(request.score, request.is_game_over);
        self.messenger.push_message(line_user_id, &message).await?;

        log_info(&format!(
            "Pushed {} notification for user '{}'",
            if request.is_game_over { "game-over" } else { "clear" },
            request.user_id
        ));
        Ok(message)
    }
}
