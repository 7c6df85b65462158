// src/test_support.rs
// Fakes shared by the unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::clients::notifier::{NotifyError, OutcomeReporter};
use crate::clients::screen::GameScreen;
use crate::error::{ProviderError, StoreError};
use crate::game::SessionOutcome;
use crate::line::MessagingProvider;
use crate::message::NotificationMessage;
use crate::user::{InMemoryUserStore, UserRecord, UserStore};

pub fn store_with(users: &[(&str, UserRecord)]) -> Arc<dyn UserStore> {
    Arc::new(
        users.iter()
            .map(|(id, record)| (id.to_string(), record.clone()))
            .collect::<InMemoryUserStore>(),
    )
}

/// Records every push instead of sending it
#[derive(Default)]
pub struct RecordingMessenger {
    pushes: Mutex<Vec<(String, NotificationMessage)>>,
}

impl RecordingMessenger {
    pub fn pushes(&self) -> Vec<(String, NotificationMessage)> {
        self.pushes.lock().unwrap().clone()
    }

    pub fn push_count(&self) -> usize {
        self.pushes.lock().unwrap().len()
    }
}

#[async_trait]
impl MessagingProvider for RecordingMessenger {
    async fn push_message(&self, to: &str, message: &NotificationMessage) -> Result<(), ProviderError> {
        self.pushes.lock().unwrap().push((to.to_string(), message.clone()));
        Ok(())
    }
}

pub struct FailingMessenger;

#[async_trait]
impl MessagingProvider for FailingMessenger {
    async fn push_message(&self, _to: &str, _message: &NotificationMessage) -> Result<(), ProviderError> {
        Err(ProviderError::Rejected { status: 500, body: "internal provider detail".to_string() })
    }
}

pub struct FailingStore;

#[async_trait]
impl UserStore for FailingStore {
    async fn get_user(&self, _user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        Err(StoreError::Unavailable("connection reset".to_string()))
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    outcomes: Mutex<Vec<SessionOutcome>>,
}

impl RecordingReporter {
    pub fn outcomes(&self) -> Vec<SessionOutcome> {
        self.outcomes.lock().unwrap().clone()
    }
}

#[async_trait]
impl OutcomeReporter for RecordingReporter {
    async fn report(&self, outcome: &SessionOutcome) -> Result<(), NotifyError> {
        self.outcomes.lock().unwrap().push(outcome.clone());
        Ok(())
    }
}

/// Fails like an unreachable server would
pub struct FailingReporter;

#[async_trait]
impl OutcomeReporter for FailingReporter {
    async fn report(&self, _outcome: &SessionOutcome) -> Result<(), NotifyError> {
        Err(NotifyError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    GameOver,
    Clear(u32),
}

#[derive(Default)]
pub struct RecordingScreen {
    pub events: Vec<ScreenEvent>,
}

impl GameScreen for RecordingScreen {
    fn show_game_over(&mut self) {
        self.events.push(ScreenEvent::GameOver);
    }

    fn show_clear(&mut self, score: u32) {
        self.events.push(ScreenEvent::Clear(score));
    }
}
