//! What the dashboard shows for a server, derived from polled state.
//!
//! Nothing here is stored. Every frame recomputes the label, accent and
//! button gates from `(status, joinable, action_in_flight)`.

use serde::Serialize;

use crate::status::ProcessStatus;

/// Display state of the selected server, highest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    /// A start/stop request is outstanding
    Pending,
    /// Running and accepting players
    Joinable,
    /// Running, world still loading
    LoadingMap,
    /// Running, joinability not tracked
    Online,
    /// Last poll failed or no poll has completed yet
    Unknown,
    Offline,
}

/// Which color family the status card uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    /// The selected game's own color
    Game,
    Warning,
    Neutral,
}

impl DisplayState {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayState::Pending => "...",
            DisplayState::Joinable => "Joinable",
            DisplayState::LoadingMap => "Loading Map",
            DisplayState::Online => "Online",
            DisplayState::Unknown => "Unknown",
            DisplayState::Offline => "Offline",
        }
    }

    pub fn accent(&self) -> Accent {
        match self {
            DisplayState::Joinable | DisplayState::Online => Accent::Game,
            DisplayState::LoadingMap | DisplayState::Unknown => Accent::Warning,
            DisplayState::Offline | DisplayState::Pending => Accent::Neutral,
        }
    }
}

/// Derive the display state.
///
/// Without joinability tracking a running process is simply `Online`.
pub fn reduce(
    status: ProcessStatus,
    joinable: bool,
    in_flight: bool,
    track_joinability: bool,
) -> DisplayState {
    if in_flight {
        return DisplayState::Pending;
    }
    match (status.is_running(), track_joinability, joinable) {
        (true, false, _) => DisplayState::Online,
        (true, true, true) => DisplayState::Joinable,
        (true, true, false) => DisplayState::LoadingMap,
        (false, ..) if status == ProcessStatus::Unknown => DisplayState::Unknown,
        (false, ..) => DisplayState::Offline,
    }
}

/// Whether the server already counts as up for gating `start`
fn is_up(status: ProcessStatus, joinable: bool, track_joinability: bool) -> bool {
    if track_joinability {
        joinable || status == ProcessStatus::Started
    } else {
        status.is_running()
    }
}

/// Whether the server already counts as down for gating `stop`
fn is_down(status: ProcessStatus, track_joinability: bool) -> bool {
    if track_joinability {
        matches!(status, ProcessStatus::Offline | ProcessStatus::Unknown)
    } else {
        matches!(status, ProcessStatus::Stopped | ProcessStatus::Offline)
    }
}

/// `start` is offered unless a request is outstanding or the server is up
pub fn can_start(
    status: ProcessStatus,
    joinable: bool,
    in_flight: bool,
    track_joinability: bool,
) -> bool {
    !in_flight && !is_up(status, joinable, track_joinability)
}

/// `stop` is offered unless a request is outstanding or the server is down
pub fn can_stop(status: ProcessStatus, in_flight: bool, track_joinability: bool) -> bool {
    !in_flight && !is_down(status, track_joinability)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ProcessStatus; 5] = [
        ProcessStatus::Online,
        ProcessStatus::Started,
        ProcessStatus::Stopped,
        ProcessStatus::Offline,
        ProcessStatus::Unknown,
    ];

    #[test]
    fn test_pending_wins_over_everything() {
        for status in ALL {
            for joinable in [false, true] {
                for track in [false, true] {
                    assert_eq!(reduce(status, joinable, true, track), DisplayState::Pending);
                }
            }
        }
    }

    #[test]
    fn test_labels_with_joinability() {
        assert_eq!(reduce(ProcessStatus::Online, true, false, true).label(), "Joinable");
        assert_eq!(reduce(ProcessStatus::Started, true, false, true).label(), "Joinable");
        assert_eq!(reduce(ProcessStatus::Online, false, false, true).label(), "Loading Map");
        assert_eq!(reduce(ProcessStatus::Started, false, false, true).label(), "Loading Map");
        assert_eq!(reduce(ProcessStatus::Unknown, false, false, true).label(), "Unknown");
        assert_eq!(reduce(ProcessStatus::Offline, false, false, true).label(), "Offline");
        assert_eq!(reduce(ProcessStatus::Stopped, false, false, true).label(), "Offline");
    }

    #[test]
    fn test_labels_without_joinability() {
        assert_eq!(reduce(ProcessStatus::Online, false, false, false).label(), "Online");
        assert_eq!(reduce(ProcessStatus::Started, true, false, false).label(), "Online");
        assert_eq!(reduce(ProcessStatus::Unknown, false, false, false).label(), "Unknown");
        assert_eq!(reduce(ProcessStatus::Stopped, false, false, false).label(), "Offline");
    }

    #[test]
    fn test_stale_joinable_ignored_when_not_running() {
        // Joinable without a running process reads as whatever the status says
        assert_eq!(
            reduce(ProcessStatus::Offline, true, false, true),
            DisplayState::Offline
        );
        assert_eq!(
            reduce(ProcessStatus::Unknown, true, false, true),
            DisplayState::Unknown
        );
    }

    #[test]
    fn test_accents() {
        assert_eq!(DisplayState::Joinable.accent(), Accent::Game);
        assert_eq!(DisplayState::Online.accent(), Accent::Game);
        assert_eq!(DisplayState::LoadingMap.accent(), Accent::Warning);
        assert_eq!(DisplayState::Unknown.accent(), Accent::Warning);
        assert_eq!(DisplayState::Offline.accent(), Accent::Neutral);
        assert_eq!(DisplayState::Pending.accent(), Accent::Neutral);
    }

    #[test]
    fn test_gates_closed_while_in_flight() {
        for status in ALL {
            for joinable in [false, true] {
                for track in [false, true] {
                    assert!(!can_start(status, joinable, true, track));
                    assert!(!can_stop(status, true, track));
                }
            }
        }
    }

    #[test]
    fn test_gates_with_joinability() {
        // start: closed when joinable or STARTED
        assert!(can_start(ProcessStatus::Offline, false, false, true));
        assert!(can_start(ProcessStatus::Unknown, false, false, true));
        assert!(can_start(ProcessStatus::Online, false, false, true));
        assert!(!can_start(ProcessStatus::Started, false, false, true));
        assert!(!can_start(ProcessStatus::Online, true, false, true));

        // stop: closed when OFFLINE or UNKNOWN
        assert!(!can_stop(ProcessStatus::Offline, false, true));
        assert!(!can_stop(ProcessStatus::Unknown, false, true));
        assert!(can_stop(ProcessStatus::Started, false, true));
        assert!(can_stop(ProcessStatus::Online, false, true));
        assert!(can_stop(ProcessStatus::Stopped, false, true));
    }

    #[test]
    fn test_gates_without_joinability() {
        assert!(!can_start(ProcessStatus::Online, false, false, false));
        assert!(!can_start(ProcessStatus::Started, false, false, false));
        assert!(can_start(ProcessStatus::Stopped, false, false, false));
        assert!(can_start(ProcessStatus::Unknown, false, false, false));

        assert!(!can_stop(ProcessStatus::Stopped, false, false));
        assert!(!can_stop(ProcessStatus::Offline, false, false));
        assert!(can_stop(ProcessStatus::Online, false, false));
        assert!(can_stop(ProcessStatus::Unknown, false, false));
    }
}
