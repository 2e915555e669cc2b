//! Application state modules
//!
//! `Dashboard` owns the reconciled server state and the tasks that feed it;
//! `UiState` holds presentation-only settings.

mod action;
mod dashboard;
mod poller;
mod server;
mod ui;

pub use dashboard::Dashboard;
pub use server::ServerState;
pub use ui::UiState;

/// Events that state poll methods can return.
/// These communicate results back to the app without direct mutation.
#[derive(Debug)]
pub enum StateEvent {
    /// Update the status message
    StatusMessage(String),

    /// Log an error message
    LogError(String),

    /// Log an info message
    LogInfo(String),
}
