use std::time::Duration;

use anyhow::Result;
use eframe::egui;

use crate::api::{ServerAction, ServerClient};
use crate::config::Config;
use crate::state::{Dashboard, StateEvent, UiState};
use crate::theme::ThemePreset;
use crate::ui;

/// How often to redraw while idle, so timer-driven polls show up promptly
const REPAINT_INTERVAL: Duration = Duration::from_millis(250);

/// Main application state
pub struct GameHubApp {
    /// Application configuration
    pub config: Config,
    /// Selected server, its polled status and in-flight actions
    pub dashboard: Dashboard<ServerClient>,
    /// Presentation state
    pub ui: UiState,
}

impl GameHubApp {
    /// Create a new application instance
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Result<Self> {
        let config = Config::load().unwrap_or_else(|e| {
            tracing::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        });

        let client = ServerClient::new(&config.api.base_url, config.api.timeout())?;
        tracing::info!("Using process manager at {}", client.base_url());

        let dashboard = Dashboard::new(client, &config.dashboard);
        let ui = UiState::new(config.launcher.theme);

        Ok(Self {
            config,
            dashboard,
            ui,
        })
    }

    /// Switch the selected game
    pub fn select_game(&mut self, game_id: &str) {
        if let Some(event) = self.dashboard.select_game(game_id) {
            self.handle_events(vec![event]);
        }
    }

    /// Send start or stop for the selected game
    pub fn request_action(&mut self, action: ServerAction) {
        if let Some(event) = self.dashboard.request_action(action) {
            self.handle_events(vec![event]);
        }
    }

    /// Change and persist the theme
    pub fn set_theme(&mut self, preset: ThemePreset) {
        self.ui.set_theme(preset);
        if self.config.launcher.theme != preset {
            self.config.launcher.theme = preset;
            self.save_config();
        }
    }

    /// Save configuration to disk
    fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {}", e);
        }
    }

    fn handle_events(&mut self, events: Vec<StateEvent>) {
        for event in events {
            match event {
                StateEvent::StatusMessage(msg) => self.ui.status_message = msg,
                StateEvent::LogInfo(msg) => tracing::info!("{}", msg),
                StateEvent::LogError(msg) => tracing::error!("{}", msg),
            }
        }
    }
}

impl eframe::App for GameHubApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ui.theme_dirty {
            self.ui.current_theme.apply(ctx);
            self.ui.theme_dirty = false;
        }

        // Fold in finished polls and actions
        let events = self.dashboard.tick();
        self.handle_events(events);
        ctx.request_repaint_after(REPAINT_INTERVAL);

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui::render_menu_bar(self, ui);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui::render_status_bar(self, ui);
        });

        egui::SidePanel::left("game_list")
            .exact_width(220.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui::render_sidebar(self, ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::render_server_panel(self, ui);
        });

        ui::render_about_dialog(self, ctx);
    }
}
