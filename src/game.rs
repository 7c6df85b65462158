// src/game.rs
// Client-side round state. Ending a round reports the outcome to the relay
// in the background and switches to the end screen straight away.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::clients::notifier::OutcomeReporter;
use crate::clients::screen::GameScreen;
use crate::logging::{log_error, log_info, log_warning};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    GameOver,
    Cleared,
}

/// What the client reports when a round ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOutcome {
    pub user_id: String,
    pub score: u32,
    pub is_game_over: bool,
}

pub struct GameSession {
    user_id: String,
    score: u32,
    state: GameState,
    is_game_over: bool,
    reporter: Arc<dyn OutcomeReporter>,
}

impl GameSession {
    pub fn new(user_id: &str, reporter: Arc<dyn OutcomeReporter>) -> Self {
        Self {
            user_id: user_id.to_string(),
            score: 0,
            state: GameState::Playing,
            is_game_over: false,
            reporter,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    /// Add points to a round in progress. Ignored once the round has ended.
    pub fn add_score(&mut self, points: u32) {
        if self.state == GameState::Playing {
            self.score = self.score.saturating_add(points);
        }
    }

    /// Lose the round: the score is forfeited, the loss is reported and the
    /// game-over screen is shown whether or not the report goes through.
    ///
    /// The returned handle only lets a caller wait for the report before
    /// exiting; its outcome never affects the session.
    pub fn game_over(&mut self, screen: &mut dyn GameScreen) -> Option<JoinHandle<()>> {
        self.is_game_over = true;
        self.state = GameState::GameOver;
        self.score = 0;

        let handle = self.report_detached(SessionOutcome {
            user_id: self.user_id.clone(),
            score: 0,
            is_game_over: true,
        });

        screen.show_game_over();
        handle
    }

    /// Win the round: the accumulated score is reported and the clear
    /// screen is shown.
    pub fn game_clear(&mut self, screen: &mut dyn GameScreen) -> Option<JoinHandle<()>> {
        self.is_game_over = false;
        self.state = GameState::Cleared;

        let handle = self.report_detached(SessionOutcome {
            user_id: self.user_id.clone(),
            score: self.score,
            is_game_over: false,
        });

        screen.show_clear(self.score);
        handle
    }

    fn report_detached(&self, outcome: SessionOutcome) -> Option<JoinHandle<()>> {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                log_warning("No async runtime available, outcome notification skipped");
                return None;
            }
        };

        let reporter = Arc::clone(&self.reporter);
        Some(runtime.spawn(async move {
            match reporter.report(&outcome).await {
                Ok(()) => log_info(&format!("Outcome notification sent for user '{}'", outcome.user_id)),
                Err(e) => log_error(&format!("Failed to send outcome notification: {e}")),
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingReporter, RecordingReporter, RecordingScreen, ScreenEvent};

    #[tokio::test]
    async fn test_game_over_resets_and_reports_zero() {
        let reporter = Arc::new(RecordingReporter::default());
        let mut screen = RecordingScreen::default();
        let mut session = GameSession::new("u1", reporter.clone());
        session.add_score(150);

        let handle = session.game_over(&mut screen);

        assert_eq!(session.state(), GameState::GameOver);
        assert!(session.is_game_over());
        assert_eq!(session.score(), 0);
        assert_eq!(screen.events, vec![ScreenEvent::GameOver]);

        handle.unwrap().await.unwrap();
        assert_eq!(
            reporter.outcomes(),
            vec![SessionOutcome { user_id: "u1".to_string(), score: 0, is_game_over: true }]
        );
    }

    #[tokio::test]
    async fn test_game_over_screen_shown_when_report_fails() {
        let mut screen = RecordingScreen::default();
        let mut session = GameSession::new("u1", Arc::new(FailingReporter));

        let handle = session.game_over(&mut screen);

        assert_eq!(screen.events, vec![ScreenEvent::GameOver]);
        // The failure is logged inside the task and never surfaces
        assert!(handle.unwrap().await.is_ok());
        assert_eq!(session.state(), GameState::GameOver);
    }

    #[tokio::test]
    async fn test_game_over_screen_shown_when_server_unreachable() {
        use crate::clients::notifier::HttpNotifier;

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let notifier = HttpNotifier::new(&format!("http://{addr}"), 2).unwrap();
        let mut screen = RecordingScreen::default();
        let mut session = GameSession::new("u1", Arc::new(notifier));

        let handle = session.game_over(&mut screen);

        assert_eq!(screen.events, vec![ScreenEvent::GameOver]);
        assert!(handle.unwrap().await.is_ok());
    }

    #[tokio::test]
    async fn test_clear_reports_accumulated_score() {
        let reporter = Arc::new(RecordingReporter::default());
        let mut screen = RecordingScreen::default();
        let mut session = GameSession::new("u2", reporter.clone());
        session.add_score(40);
        session.add_score(2);

        let handle = session.game_clear(&mut screen);

        assert_eq!(session.state(), GameState::Cleared);
        assert!(!session.is_game_over());
        assert_eq!(screen.events, vec![ScreenEvent::Clear(42)]);

        handle.unwrap().await.unwrap();
        assert_eq!(
            reporter.outcomes(),
            vec![SessionOutcome { user_id: "u2".to_string(), score: 42, is_game_over: false }]
        );
    }

    #[tokio::test]
    async fn test_score_frozen_after_round_ends() {
        let reporter = Arc::new(RecordingReporter::default());
        let mut screen = RecordingScreen::default();
        let mut session = GameSession::new("u1", reporter);
        session.add_score(10);
        let _ = session.game_over(&mut screen);

        session.add_score(5);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_game_over_without_runtime_still_shows_screen() {
        let reporter = Arc::new(RecordingReporter::default());
        let mut screen = RecordingScreen::default();
        let mut session = GameSession::new("u1", reporter.clone());

        let handle = session.game_over(&mut screen);

        assert!(handle.is_none());
        assert_eq!(screen.events, vec![ScreenEvent::GameOver]);
        assert!(reporter.outcomes().is_empty());
    }

    #[test]
    fn test_outcome_wire_names() {
        let outcome = SessionOutcome { user_id: "u1".to_string(), score: 0, is_game_over: true };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({"userId": "u1", "score": 0, "isGameOver": true})
        );
    }
}
