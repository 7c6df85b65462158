// src/clients/notifier.rs
// Reports a finished round to the relay server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::defs::NOTIFY_ROUTE;
use crate::game::SessionOutcome;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("notification rejected with status {0}")]
    Status(StatusCode),
}

#[async_trait]
pub trait OutcomeReporter: Send + Sync {
    async fn report(&self, outcome: &SessionOutcome) -> Result<(), NotifyError>;
}

/// Posts outcomes as JSON to the relay's notify route.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    http: reqwest::Client,
    notify_url: String,
}

impl HttpNotifier {
    pub fn new(server_url: &str, timeout_secs: u64) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            notify_url: format!("{}{NOTIFY_ROUTE}", server_url.trim_end_matches('/')),
        })
    }

    pub fn notify_url(&self) -> &str {
        &self.notify_url
    }
}

#[async_trait]
impl OutcomeReporter for HttpNotifier {
    async fn report(&self, outcome: &SessionOutcome) -> Result<(), NotifyError> {
        let response = self.http
            .post(&self.notify_url)
            .json(outcome)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(NotifyError::Status(response.status()))
        }
    }
}
