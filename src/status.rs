//! Process status as reported by the server manager.
//!
//! The manager has answered in two shapes over time: a flat
//! `{"status": "ONLINE"}` object and a `{"servers": [{..}, ..]}` list.
//! Both are accepted here and resolved to a single [`ProcessStatus`] for the
//! requested game.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether the game server process is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProcessStatus {
    Online,
    Started,
    Stopped,
    Offline,
    /// Initial value, and the value forced after a failed poll or a new selection
    #[default]
    Unknown,
}

impl ProcessStatus {
    /// Wire token, as the server manager spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessStatus::Online => "ONLINE",
            ProcessStatus::Started => "STARTED",
            ProcessStatus::Stopped => "STOPPED",
            ProcessStatus::Offline => "OFFLINE",
            ProcessStatus::Unknown => "UNKNOWN",
        }
    }

    /// True when the process is up (it may still be loading its world)
    pub fn is_running(&self) -> bool {
        matches!(self, ProcessStatus::Online | ProcessStatus::Started)
    }

    /// Parse a reported status, treating anything unrecognized as `Unknown`
    pub fn from_reported(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Unrecognized server status '{}'", raw);
            ProcessStatus::Unknown
        })
    }
}

impl FromStr for ProcessStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ONLINE" => Ok(ProcessStatus::Online),
            "STARTED" => Ok(ProcessStatus::Started),
            "STOPPED" => Ok(ProcessStatus::Stopped),
            "OFFLINE" => Ok(ProcessStatus::Offline),
            "UNKNOWN" => Ok(ProcessStatus::Unknown),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response body of `GET /server/status`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusPayload {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub servers: Option<Vec<ServerEntry>>,
}

/// One entry of the list-shaped status response
#[derive(Debug, Clone, Deserialize)]
pub struct ServerEntry {
    #[serde(default, alias = "server", alias = "name")]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl StatusPayload {
    /// Resolve the status for one game.
    ///
    /// A missing status field means the manager has nothing running for
    /// that game, so it reads as `Offline`. An anonymous list falls back to
    /// its first entry; a list naming only other games reads as `Offline`.
    pub fn status_for(&self, game_id: &str) -> ProcessStatus {
        if let Some(ref status) = self.status {
            return ProcessStatus::from_reported(status);
        }

        let entry = self.servers.as_ref().and_then(|servers| {
            let anonymous = servers.iter().all(|s| s.id.is_none());
            servers
                .iter()
                .find(|s| s.id.as_deref() == Some(game_id))
                .or_else(|| if anonymous { servers.first() } else { None })
        });

        entry
            .and_then(|e| e.status.as_deref())
            .map(ProcessStatus::from_reported)
            .unwrap_or(ProcessStatus::Offline)
    }
}

/// Response body of `GET /server/joinable`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JoinablePayload {
    #[serde(default)]
    pub joinable: Option<bool>,
}

impl JoinablePayload {
    pub fn is_joinable(&self) -> bool {
        self.joinable.unwrap_or(false)
    }
}

/// Result of one poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Both reads succeeded
    Reported { status: ProcessStatus, joinable: bool },
    /// A read failed; nothing the server said can be trusted
    Failed,
}
