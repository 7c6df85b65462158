use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::defs::{
    ERR_INVALID_REQUEST, ERR_MESSAGING_ID_MISSING, ERR_NOTIFICATION_FAILED, ERR_USER_NOT_FOUND,
};
use crate::error::RelayError;
use crate::logging::{log_error, log_info, log_warning};
use crate::relay::NotifyRequest;
use crate::server::AppState;

// Response structures for JSON serialization
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotifyResponse {
    pub success: bool,
}

// Custom error type for handlers
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_response = ErrorResponse {
            error: self.message,
        };
        (self.status, Json(error_response)).into_response()
    }
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

// Client errors keep their own status; everything else collapses into a
// generic 500 so provider details stay in the log.
impl From<RelayError> for ApiError {
    fn from(error: RelayError) -> Self {
        match &error {
            RelayError::UserNotFound(user_id) => {
                log_warning(&format!("Notify rejected, unknown user '{user_id}'"));
                ApiError::new(StatusCode::NOT_FOUND, ERR_USER_NOT_FOUND)
            }
            RelayError::MessagingIdMissing(user_id) => {
                log_warning(&format!("Notify rejected, user '{user_id}' has no LINE user id"));
                ApiError::new(StatusCode::BAD_REQUEST, ERR_MESSAGING_ID_MISSING)
            }
            RelayError::Store(_) | RelayError::Provider(_) => {
                log_error(&format!("LINE notification failed: {error}"));
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, ERR_NOTIFICATION_FAILED)
            }
        }
    }
}

pub async fn handle_line_notify(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<NotifyRequest>, JsonRejection>,
) -> Result<Json<NotifyResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        log_warning(&format!("Notify rejected, malformed body: {rejection}"));
        ApiError::new(StatusCode::BAD_REQUEST, ERR_INVALID_REQUEST)
    })?;

    if request.user_id.trim().is_empty() {
        log_warning("Notify rejected, empty userId");
        return Err(ApiError::new(StatusCode::BAD_REQUEST, ERR_INVALID_REQUEST));
    }

    log_info(&format!(
        "Notify request: user '{}', score {}, game over: {}",
        request.user_id, request.score, request.is_game_over
    ));

    app_state.relay.notify(&request).await?;

    Ok(Json(NotifyResponse { success: true }))
}
