// src/user.rs
// User records and the stores that resolve them.
//
// The record is owned by an external system; the relay only ever reads it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Stored user profile, keyed by internal user id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default)]
    pub line_user_id: Option<String>,
}

impl UserRecord {
    pub fn with_line_user_id(line_user_id: &str) -> Self {
        Self { line_user_id: Some(line_user_id.to_string()) }
    }

    /// External messaging id, treating an empty string as absent
    pub fn messaging_id(&self) -> Option<&str> {
        self.line_user_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user record; `Ok(None)` when no record exists.
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError>;
}

/// Store held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user_id: &str, record: UserRecord) -> Result<(), StoreError> {
        let mut users = self.users.lock()
            .map_err(|_| StoreError::Unavailable("user map lock poisoned".to_string()))?;
        users.insert(user_id.to_string(), record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.users.lock().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<(String, UserRecord)> for InMemoryUserStore {
    fn from_iter<I: IntoIterator<Item = (String, UserRecord)>>(iter: I) -> Self {
        Self { users: Mutex::new(iter.into_iter().collect()) }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.lock()
            .map_err(|_| StoreError::Unavailable("user map lock poisoned".to_string()))?;
        Ok(users.get(user_id).cloned())
    }
}

/// Store backed by a JSON document mapping user id to record:
///
/// ```json
/// { "u1": { "lineUserId": "U4af4980629..." } }
/// ```
///
/// `open` fails unless the file exists and parses. After that the file is
/// re-read on every lookup so edits by its owner are picked up without a
/// restart; a lookup fails if the file has since gone missing or broken.
#[derive(Debug, Clone)]
pub struct JsonFileUserStore {
    path: PathBuf,
}

impl JsonFileUserStore {
    /// Open the store, failing if the file is missing or malformed.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let store = Self { path: path.as_ref().to_path_buf() };
        store.load().await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn user_count(&self) -> Result<usize, StoreError> {
        Ok(self.load().await?.len())
    }

    async fn load(&self) -> Result<HashMap<String, UserRecord>, StoreError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl UserStore for JsonFileUserStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        let mut users = self.load().await?;
        Ok(users.remove(user_id))
    }
}
