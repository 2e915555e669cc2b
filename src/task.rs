//! Task polling utilities
//!
//! Lets the frame loop check on tokio tasks without blocking.

use futures::FutureExt;
use tokio::task::JoinHandle;

/// Result of polling a task
pub enum PollResult<T> {
    /// No task to poll (task was None)
    NoTask,
    /// Task is still running
    Pending,
    /// Task completed with result (may be Ok or join error)
    Complete(Result<T, tokio::task::JoinError>),
}

/// Poll an optional task handle and return its result if finished.
///
/// A finished task is taken out of `task`; a running one is left in place.
pub fn poll_task<T>(task: &mut Option<JoinHandle<T>>) -> PollResult<T> {
    let Some(mut handle) = task.take() else {
        return PollResult::NoTask;
    };

    if !handle.is_finished() {
        *task = Some(handle);
        return PollResult::Pending;
    }

    match (&mut handle).now_or_never() {
        Some(result) => PollResult::Complete(result),
        None => {
            tracing::warn!("Task not ready despite is_finished()");
            *task = Some(handle);
            PollResult::Pending
        }
    }
}
