//! Timer-driven status polling bound to the selected game.
//!
//! Each selection gets its own polling loop, tagged with a generation
//! number. Selecting another game aborts the loop (and any pending
//! re-check), so a slow response for the old game can neither arrive late
//! nor overwrite the freshly reset state of the new one. Reports that were
//! already queued are dropped by generation in [`Poller::drain`].

use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

use crate::api::{self, ServerBackend};
use crate::status::PollOutcome;

/// A finished poll cycle
#[derive(Debug, Clone)]
pub struct PollReport {
    pub generation: u64,
    pub game_id: &'static str,
    pub outcome: PollOutcome,
    pub at: DateTime<Local>,
}

/// Owns the polling task for the current selection
pub struct Poller<B: ServerBackend> {
    backend: B,
    interval: Duration,
    track_joinability: bool,
    generation: u64,
    game_id: Option<&'static str>,
    tx: mpsc::UnboundedSender<PollReport>,
    rx: mpsc::UnboundedReceiver<PollReport>,
    ticker: Option<JoinHandle<()>>,
    rechecks: JoinSet<()>,
}

impl<B: ServerBackend> Poller<B> {
    pub fn new(backend: B, interval: Duration, track_joinability: bool) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            backend,
            interval,
            track_joinability,
            generation: 0,
            game_id: None,
            tx,
            rx,
            ticker: None,
            rechecks: JoinSet::new(),
        }
    }

    /// Generation of the current polling loop
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancel any running loop and start polling `game_id`, beginning now
    pub fn restart(&mut self, game_id: &'static str) {
        self.stop();
        self.generation += 1;
        self.game_id = Some(game_id);

        let backend = self.backend.clone();
        let tx = self.tx.clone();
        let period = self.interval;
        let track = self.track_joinability;
        let generation = self.generation;

        tracing::debug!("Polling {} every {:?} (generation {})", game_id, period, generation);

        self.ticker = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let outcome = api::poll_once(&backend, game_id, track).await;
                let report = PollReport {
                    generation,
                    game_id,
                    outcome,
                    at: Local::now(),
                };
                if tx.send(report).is_err() {
                    break;
                }
            }
        }));
    }

    /// Poll the current game once more after `delay`, outside the regular cadence
    pub fn recheck_after(&mut self, delay: Duration) {
        let Some(game_id) = self.game_id else {
            return;
        };

        let backend = self.backend.clone();
        let tx = self.tx.clone();
        let track = self.track_joinability;
        let generation = self.generation;

        self.rechecks.spawn(async move {
            tokio::time::sleep(delay).await;
            let outcome = api::poll_once(&backend, game_id, track).await;
            let _ = tx.send(PollReport {
                generation,
                game_id,
                outcome,
                at: Local::now(),
            });
        });
    }

    /// Cancel the polling loop and pending re-checks
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        self.rechecks.abort_all();
    }

    /// Collect the reports that belong to the current selection
    pub fn drain(&mut self) -> Vec<PollReport> {
        while self.rechecks.try_join_next().is_some() {}

        let mut reports = Vec::new();
        while let Ok(report) = self.rx.try_recv() {
            if report.generation == self.generation && Some(report.game_id) == self.game_id {
                reports.push(report);
            } else {
                tracing::debug!(
                    "Dropping stale poll result for {} (generation {})",
                    report.game_id,
                    report.generation
                );
            }
        }
        reports
    }
}

impl<B: ServerBackend> Drop for Poller<B> {
    fn drop(&mut self) {
        self.stop();
    }
}
