// src/error.rs
// Error types for configuration, storage, messaging and the relay flow.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure reading the user store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read user store: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed user store: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

/// Failure pushing a message through the messaging provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("messaging API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("messaging API returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("user '{0}' not found")]
    UserNotFound(String),
    #[error("user '{0}' has no messaging identifier")]
    MessagingIdMissing(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
