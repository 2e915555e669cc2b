//! Server status and control commands

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Subcommand;
use serde::Serialize;

use crate::api::{poll_once, ApiError, ServerAction, ServerBackend, ServerClient};
use crate::cli::output::{format_gates, Output};
use crate::config::Config;
use crate::registry::{self, GameProfile};
use crate::state::{Dashboard, ServerState, StateEvent};

#[derive(Subcommand, Debug)]
pub enum ServerCommands {
    /// Show the current status of a server
    Status {
        /// Game id (uses dashboard.default_game if not specified)
        #[arg(long)]
        game: Option<String>,
    },

    /// Ask the server manager to start a server
    Start {
        /// Game id (uses dashboard.default_game if not specified)
        #[arg(long)]
        game: Option<String>,

        /// Send the request even when the server looks like it is already up
        #[arg(long)]
        force: bool,
    },

    /// Ask the server manager to stop a server
    Stop {
        /// Game id (uses dashboard.default_game if not specified)
        #[arg(long)]
        game: Option<String>,

        /// Send the request even when the server looks like it is already down
        #[arg(long)]
        force: bool,
    },

    /// Poll a server and print each change until interrupted
    Watch {
        /// Game id (uses dashboard.default_game if not specified)
        #[arg(long)]
        game: Option<String>,
    },
}

/// JSON-serializable snapshot of one server
#[derive(Serialize)]
struct StatusReport {
    game: &'static str,
    name: &'static str,
    address: String,
    status: &'static str,
    joinable: bool,
    display: &'static str,
    can_start: bool,
    can_stop: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    checked_at: Option<String>,
}

impl StatusReport {
    fn new(state: &ServerState, host: &str) -> Self {
        Self {
            game: state.selected.id,
            name: state.selected.name,
            address: format!("{}:{}", host, state.selected.port),
            status: state.status.as_str(),
            joinable: state.joinable,
            display: state.display().label(),
            can_start: state.can_start(),
            can_stop: state.can_stop(),
            checked_at: state.last_checked.map(|t| t.to_rfc3339()),
        }
    }
}

pub async fn run(command: ServerCommands, out: Output) -> Result<()> {
    let config = Config::load()?;

    match command {
        ServerCommands::Status { game } => status(&config, game.as_deref(), out).await,
        ServerCommands::Start { game, force } => {
            act(&config, ServerAction::Start, game.as_deref(), force, out).await
        }
        ServerCommands::Stop { game, force } => {
            act(&config, ServerAction::Stop, game.as_deref(), force, out).await
        }
        ServerCommands::Watch { game } => watch(&config, game.as_deref(), out).await,
    }
}

/// Resolve `--game`, falling back to the configured default
fn resolve_game(requested: Option<&str>, config: &Config) -> Result<&'static GameProfile> {
    let id = requested.unwrap_or(&config.dashboard.default_game);
    registry::find(id).with_context(|| {
        format!(
            "Unknown game: {} (known: {})",
            id,
            registry::ids().collect::<Vec<_>>().join(", ")
        )
    })
}

fn client_for(config: &Config) -> Result<ServerClient> {
    ServerClient::new(&config.api.base_url, config.api.timeout())
}

/// Poll once and fold the result into `state`
async fn refresh<B: ServerBackend>(backend: &B, state: &mut ServerState) {
    let outcome = poll_once(backend, state.selected.id, state.track_joinability).await;
    state.apply_poll(outcome, Local::now());
}

/// Send `action` for the selected game, then re-poll once after `delay`
/// whatever the outcome
async fn dispatch_and_recheck<B: ServerBackend>(
    backend: &B,
    state: &mut ServerState,
    action: ServerAction,
    delay: Duration,
    out: Output,
) -> Result<(), ApiError> {
    let game = state.selected;
    let dispatched = backend.dispatch(action, game.id).await;
    match &dispatched {
        Ok(()) => out.note(&format!("{} requested for {}", action, game.name)),
        Err(e) => out.error(&format!("Failed to {} {}: {}", action, game.name, e)),
    }

    tokio::time::sleep(delay).await;
    refresh(backend, state).await;
    dispatched
}


fn format_report_text(r: &StatusReport) -> String {
    let mut out = format!("{} ({})\n", r.name, r.game);
    out.push_str(&format!("  State:    {}\n", r.display));
    out.push_str(&format!("  Process:  {}\n", r.status));
    out.push_str(&format!("  Address:  {}\n", r.address));
    if let Some(checked) = &r.checked_at {
        out.push_str(&format!("  Checked:  {}\n", checked));
    }
    out.trim_end().to_string()
}

async fn status(config: &Config, game: Option<&str>, out: Output) -> Result<()> {
    let game = resolve_game(game, config)?;
    let client = client_for(config)?;

    let mut state = ServerState::new(game, config.dashboard.track_joinability);
    refresh(&client, &mut state).await;

    let report = StatusReport::new(&state, &config.dashboard.host_address);
    out.value(&report, |r| {
        format!(
            "{}\n\n{}",
            format_report_text(r),
            format_gates(r.can_start, r.can_stop)
        )
    });

    Ok(())
}

async fn act(
    config: &Config,
    action: ServerAction,
    game: Option<&str>,
    force: bool,
    out: Output,
) -> Result<()> {
    let game = resolve_game(game, config)?;
    let client = client_for(config)?;

    let mut state = ServerState::new(game, config.dashboard.track_joinability);
    refresh(&client, &mut state).await;

    if !state.allows(action) {
        let label = state.display().label();
        if !force {
            anyhow::bail!(
                "Refusing to {} {} while it is {} (use --force to send anyway)",
                action,
                game.name,
                label
            );
        }
        tracing::warn!("Forcing {} of {} while it is {}", action, game.id, label);
    }

    let dispatched = dispatch_and_recheck(
        &client,
        &mut state,
        action,
        config.dashboard.recheck_delay(),
        out,
    )
    .await;
    let report = StatusReport::new(&state, &config.dashboard.host_address);
    out.value(&report, format_report_text);

    Ok(dispatched?)
}

async fn watch(
    config: &Config,
    game: Option<&str>,
    out: Output,
) -> Result<()> {
    let game = resolve_game(game, config)?;
    let client = client_for(config)?;

    let mut dashboard = Dashboard::new(client, &config.dashboard);
    dashboard.select_game(game.id);

    out.note(&format!("Watching {} (Ctrl+C to stop)", game.name));

    let mut ticker = tokio::time::interval(Duration::from_millis(250));
    let mut last_seen = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                out.note("Stopped watching");
                return Ok(());
            }
            _ = ticker.tick() => {
                for event in dashboard.tick() {
                    if let StateEvent::LogError(msg) = event {
                        tracing::error!("{}", msg);
                    }
                }

                if dashboard.server.last_checked.is_none() {
                    continue;
                }
                let current = dashboard.server.display();
                if last_seen != Some(current) {
                    last_seen = Some(current);
                    let report = StatusReport::new(&dashboard.server, &config.dashboard.host_address);
                    out.value(&report, format_report_text);
                }
            }
        }
    }
}
