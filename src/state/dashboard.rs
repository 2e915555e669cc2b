//! Ties the selection, poller and dispatcher together

use std::time::Duration;

use crate::api::{ServerAction, ServerBackend};
use crate::config::DashboardConfig;
use crate::registry;
use crate::state::StateEvent;
use crate::state::action::ActionDispatcher;
use crate::state::poller::Poller;
use crate::state::server::ServerState;

/// Live state of the dashboard for one backend
pub struct Dashboard<B: ServerBackend> {
    /// Reconciled status of the selected server
    pub server: ServerState,
    poller: Poller<B>,
    dispatcher: ActionDispatcher<B>,
    recheck_delay: Duration,
}

impl<B: ServerBackend> Dashboard<B> {
    /// Create the dashboard and start polling the configured default game
    pub fn new(backend: B, settings: &DashboardConfig) -> Self {
        let selected = registry::find_or_default(&settings.default_game);
        let mut poller = Poller::new(
            backend.clone(),
            settings.poll_interval(),
            settings.track_joinability,
        );
        poller.restart(selected.id);

        Self {
            server: ServerState::new(selected, settings.track_joinability),
            poller,
            dispatcher: ActionDispatcher::new(backend),
            recheck_delay: settings.recheck_delay(),
        }
    }

    /// Switch to another game and restart polling for it
    pub fn select_game(&mut self, game_id: &str) -> Option<StateEvent> {
        if !self.server.select(game_id) {
            return None;
        }
        let game = self.server.selected;
        self.poller.restart(game.id);
        tracing::info!(
            "Selected {} (poll generation {})",
            game.id,
            self.poller.generation()
        );
        Some(StateEvent::StatusMessage(format!("Checking {}...", game.name)))
    }

    /// Send start/stop for the selected game if the controls allow it
    pub fn request_action(&mut self, action: ServerAction) -> Option<StateEvent> {
        if !self.server.allows(action) {
            tracing::debug!("Ignoring {} request, control is disabled", action);
            return None;
        }
        let game = self.server.selected;
        if self.dispatcher.is_busy() || !self.server.begin_action() {
            return None;
        }
        self.dispatcher.dispatch(action, game.id);
        Some(StateEvent::StatusMessage(format!(
            "Sending {} to {}...",
            action, game.name
        )))
    }

    /// Fold finished polls and actions into the state
    pub fn tick(&mut self) -> Vec<StateEvent> {
        let mut events = Vec::new();

        for report in self.poller.drain() {
            self.server.apply_poll(report.outcome, report.at);
        }

        if let Some(outcome) = self.dispatcher.poll() {
            self.server.finish_action();
            self.poller.recheck_after(self.recheck_delay);

            match outcome.result {
                Ok(()) => {
                    events.push(StateEvent::LogInfo(format!(
                        "{} request for {} accepted",
                        outcome.action, outcome.game_id
                    )));
                    events.push(StateEvent::StatusMessage(format!(
                        "{} requested for {}",
                        outcome.action, outcome.game_id
                    )));
                }
                Err(msg) => {
                    events.push(StateEvent::LogError(format!(
                        "Failed to {} {}: {}",
                        outcome.action, outcome.game_id, msg
                    )));
                    events.push(StateEvent::StatusMessage(format!(
                        "Failed to {} server",
                        outcome.action
                    )));
                }
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeBackend, Reply};
    use crate::display::DisplayState;
    use crate::registry::GAMES;
    use crate::status::ProcessStatus;

    fn settings(track_joinability: bool) -> DashboardConfig {
        DashboardConfig {
            track_joinability,
            ..DashboardConfig::default()
        }
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_resets_before_any_poll() {
        let backend = FakeBackend::new();
        backend.push_status(Reply::Status("ONLINE"));
        backend.set_joinable(Some(true));
        let mut dash = Dashboard::new(backend, &settings(true));

        settle().await;
        dash.tick();
        assert_eq!(dash.server.display(), DisplayState::Joinable);

        for game in GAMES.iter().skip(1) {
            assert!(dash.select_game(game.id).is_some());
            assert_eq!(dash.server.status, ProcessStatus::Unknown);
            assert!(!dash.server.joinable);
            assert_eq!(dash.server.display(), DisplayState::Unknown);
            settle().await;
            dash.tick();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_online_label_without_joinability() {
        let backend = FakeBackend::new();
        backend.push_status(Reply::Status("ONLINE"));
        let mut dash = Dashboard::new(backend, &settings(false));

        settle().await;
        dash.tick();
        assert_eq!(dash.server.display().label(), "Online");
    }

    #[tokio::test(start_paused = true)]
    async fn test_joinable_and_loading_labels() {
        let backend = FakeBackend::new();
        backend.push_status(Reply::Status("ONLINE"));
        backend.set_joinable(Some(true));
        let mut dash = Dashboard::new(backend.clone(), &settings(true));

        settle().await;
        dash.tick();
        assert_eq!(dash.server.display().label(), "Joinable");

        backend.set_joinable(Some(false));
        tokio::time::sleep(Duration::from_secs(5)).await;
        dash.tick();
        assert_eq!(dash.server.display().label(), "Loading Map");
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_failure_forces_unknown() {
        let backend = FakeBackend::new();
        backend.push_status(Reply::Status("STARTED"));
        backend.push_status(Reply::Fail);
        backend.set_joinable(Some(true));
        let mut dash = Dashboard::new(backend, &settings(true));

        settle().await;
        dash.tick();
        assert_eq!(dash.server.display(), DisplayState::Joinable);
        let first_check = dash.server.last_checked;

        tokio::time::sleep(Duration::from_secs(5)).await;
        dash.tick();
        assert_eq!(dash.server.status, ProcessStatus::Unknown);
        assert!(!dash.server.joinable);
        assert!(dash.server.last_checked.is_some());
        assert!(dash.server.last_checked >= first_check);
    }

    #[tokio::test(start_paused = true)]
    async fn test_identical_polls_do_not_flicker() {
        let backend = FakeBackend::new();
        backend.push_status(Reply::Status("STARTED"));
        backend.set_joinable(Some(false));
        let mut dash = Dashboard::new(backend, &settings(true));

        settle().await;
        dash.tick();
        let before = (
            dash.server.display(),
            dash.server.can_start(),
            dash.server.can_stop(),
        );

        tokio::time::sleep(Duration::from_secs(5)).await;
        dash.tick();
        assert_eq!(
            (
                dash.server.display(),
                dash.server.can_start(),
                dash.server.can_stop()
            ),
            before
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_control_is_not_dispatched() {
        let backend = FakeBackend::new();
        backend.push_status(Reply::Status("OFFLINE"));
        let mut dash = Dashboard::new(backend.clone(), &settings(true));

        settle().await;
        dash.tick();
        assert!(dash.request_action(ServerAction::Stop).is_none());
        assert!(!dash.server.action_in_flight);
        assert!(backend.actions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_action_holds_in_flight_until_settled() {
        let backend = FakeBackend::new();
        backend.push_status(Reply::Status("OFFLINE"));
        backend.delay_actions(Duration::from_secs(1));
        let mut dash = Dashboard::new(backend, &settings(true));

        settle().await;
        dash.tick();
        assert!(dash.request_action(ServerAction::Start).is_some());
        assert!(dash.server.action_in_flight);
        assert!(dash.request_action(ServerAction::Start).is_none());

        tokio::time::sleep(Duration::from_millis(500)).await;
        dash.tick();
        assert!(dash.server.action_in_flight);

        tokio::time::sleep(Duration::from_millis(600)).await;
        dash.tick();
        assert!(!dash.server.action_in_flight);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_action_still_rechecks_once() {
        let backend = FakeBackend::new();
        backend.push_status(Reply::Status("OFFLINE"));
        backend.fail_actions(true);
        let mut dash = Dashboard::new(backend.clone(), &settings(true));

        settle().await;
        dash.tick();
        dash.request_action(ServerAction::Start);
        settle().await;

        let events = dash.tick();
        assert!(!dash.server.action_in_flight);
        assert!(events.iter().any(|e| matches!(e, StateEvent::LogError(_))));
        assert_eq!(backend.status_calls().len(), 1);

        tokio::time::sleep(Duration::from_millis(2100)).await;
        dash.tick();
        assert_eq!(backend.status_calls().len(), 2);

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(backend.status_calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_minecraft_end_to_end() {
        let backend = FakeBackend::new();
        backend.set_joinable(Some(false));
        let mut dash = Dashboard::new(backend.clone(), &settings(true));

        // Select before the default game's first poll has a chance to run
        dash.select_game("minecraft");
        backend.push_status(Reply::Status("OFFLINE"));
        settle().await;
        dash.tick();
        assert_eq!(dash.server.display().label(), "Offline");
        assert!(dash.server.can_start());
        assert!(!dash.server.can_stop());

        backend.push_status(Reply::Status("STARTED"));
        dash.request_action(ServerAction::Start);
        assert!(dash.server.action_in_flight);
        assert!(!dash.server.can_start());
        assert!(!dash.server.can_stop());

        settle().await;
        dash.tick();
        assert!(!dash.server.action_in_flight);
        assert_eq!(dash.server.display().label(), "Offline");

        tokio::time::sleep(Duration::from_millis(2100)).await;
        dash.tick();
        assert_eq!(dash.server.status, ProcessStatus::Started);
        assert_eq!(dash.server.display().label(), "Loading Map");
        assert!(!dash.server.can_start());
        assert!(dash.server.can_stop());

        assert_eq!(
            backend.actions(),
            vec![(ServerAction::Start, "minecraft".to_string())]
        );
        assert!(backend.status_calls().iter().all(|c| c == "minecraft"));
    }
}
