//! Reconciled status of the selected game server

use chrono::{DateTime, Local};

use crate::api::ServerAction;
use crate::display::{self, DisplayState};
use crate::registry::{self, GameProfile};
use crate::status::{PollOutcome, ProcessStatus};

/// What the dashboard currently believes about the selected server.
///
/// Only poll results and action bookkeeping move these fields; the display
/// label and button gates are derived on demand.
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Currently selected game
    pub selected: &'static GameProfile,
    /// Last reported process status
    pub status: ProcessStatus,
    /// Last reported joinability
    pub joinable: bool,
    /// A start/stop request is outstanding
    pub action_in_flight: bool,
    /// When the last poll finished, successful or not
    pub last_checked: Option<DateTime<Local>>,
    /// Whether joinability is part of the picture
    pub track_joinability: bool,
}

impl ServerState {
    pub fn new(selected: &'static GameProfile, track_joinability: bool) -> Self {
        Self {
            selected,
            status: ProcessStatus::default(),
            joinable: false,
            action_in_flight: false,
            last_checked: None,
            track_joinability,
        }
    }

    /// Switch to another game.
    ///
    /// Returns false (and changes nothing) for an unknown id or the game
    /// that is already selected.
    pub fn select(&mut self, game_id: &str) -> bool {
        let Some(game) = registry::find(game_id) else {
            tracing::warn!("Ignoring selection of unknown game '{}'", game_id);
            return false;
        };
        if game.id == self.selected.id {
            return false;
        }

        self.selected = game;
        self.status = ProcessStatus::Unknown;
        self.joinable = false;
        true
    }

    /// Record the outcome of a poll cycle
    pub fn apply_poll(&mut self, outcome: PollOutcome, at: DateTime<Local>) {
        match outcome {
            PollOutcome::Reported { status, joinable } => {
                self.status = status;
                self.joinable = self.track_joinability && joinable;
            }
            PollOutcome::Failed => {
                self.status = ProcessStatus::Unknown;
                self.joinable = false;
            }
        }
        self.last_checked = Some(at);
    }

    /// Mark an action as outstanding. Returns false if one already is.
    pub fn begin_action(&mut self) -> bool {
        if self.action_in_flight {
            return false;
        }
        self.action_in_flight = true;
        true
    }

    pub fn finish_action(&mut self) {
        self.action_in_flight = false;
    }

    pub fn display(&self) -> DisplayState {
        display::reduce(
            self.status,
            self.joinable,
            self.action_in_flight,
            self.track_joinability,
        )
    }

    pub fn can_start(&self) -> bool {
        display::can_start(
            self.status,
            self.joinable,
            self.action_in_flight,
            self.track_joinability,
        )
    }

    pub fn can_stop(&self) -> bool {
        display::can_stop(self.status, self.action_in_flight, self.track_joinability)
    }

    /// Gate for a specific action
    pub fn allows(&self, action: ServerAction) -> bool {
        match action {
            ServerAction::Start => self.can_start(),
            ServerAction::Stop => self.can_stop(),
        }
    }
}
