// src/line.rs
// Outbound messaging: the provider seam and the LINE Messaging API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::LineCredentials;
use crate::error::ProviderError;
use crate::message::NotificationMessage;

const PUSH_PATH: &str = "/v2/bot/message/push";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[async_trait]
pub trait MessagingProvider: Send + Sync {
    /// Push one message to an external messaging id.
    async fn push_message(&self, to: &str, message: &NotificationMessage) -> Result<(), ProviderError>;
}

#[derive(Debug, Serialize)]
struct PushRequest<'a> {
    to: &'a str,
    messages: [&'a NotificationMessage; 1],
}

/// Push-message client for the LINE Messaging API.
#[derive(Debug, Clone)]
pub struct LineClient {
    http: reqwest::Client,
    api_base: String,
    credentials: LineCredentials,
}

impl LineClient {
    pub fn new(api_base: &str, credentials: LineCredentials) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn push_url(&self) -> String {
        format!("{}{PUSH_PATH}", self.api_base)
    }
}

#[async_trait]
impl MessagingProvider for LineClient {
    async fn push_message(&self, to: &str, message: &NotificationMessage) -> Result<(), ProviderError> {
        let body = PushRequest { to, messages: [message] };

        let response = self.http
            .post(self.push_url())
            .bearer_auth(&self.credentials.channel_access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ProviderError::Rejected { status: status.as_u16(), body })
        }
    }
}
