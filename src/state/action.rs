//! Start/stop requests sent to the process manager

use tokio::task::JoinHandle;

use crate::api::{ApiError, ServerAction, ServerBackend};
use crate::task::{PollResult, poll_task};

/// How a dispatched action ended
#[derive(Debug)]
pub struct ActionOutcome {
    pub action: ServerAction,
    pub game_id: &'static str,
    pub result: Result<(), String>,
}

/// Runs at most one start/stop request at a time
pub struct ActionDispatcher<B: ServerBackend> {
    backend: B,
    task: Option<JoinHandle<Result<(), ApiError>>>,
    current: Option<(ServerAction, &'static str)>,
}

impl<B: ServerBackend> ActionDispatcher<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            task: None,
            current: None,
        }
    }

    /// Check if a request is outstanding
    pub fn is_busy(&self) -> bool {
        self.task.is_some()
    }

    /// Send `action` for `game_id`. Returns false if a request is already outstanding.
    pub fn dispatch(&mut self, action: ServerAction, game_id: &'static str) -> bool {
        if self.task.is_some() {
            return false;
        }

        tracing::info!("Requesting {} of {}", action, game_id);

        let backend = self.backend.clone();
        self.current = Some((action, game_id));
        self.task = Some(tokio::spawn(async move {
            backend.dispatch(action, game_id).await
        }));
        true
    }

    /// Check on the outstanding request, returning its outcome once it settles
    pub fn poll(&mut self) -> Option<ActionOutcome> {
        let result = match poll_task(&mut self.task) {
            PollResult::Complete(Ok(Ok(()))) => Ok(()),
            PollResult::Complete(Ok(Err(e))) => Err(e.to_string()),
            PollResult::Complete(Err(e)) => Err(format!("Task panicked: {}", e)),
            PollResult::Pending | PollResult::NoTask => return None,
        };

        let (action, game_id) = self.current.take()?;
        Some(ActionOutcome {
            action,
            game_id,
            result,
        })
    }
}
