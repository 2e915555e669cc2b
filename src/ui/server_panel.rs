//! Status card and controls for the selected server

use eframe::egui::{self, Color32, RichText, Vec2};

use crate::api::ServerAction;
use crate::app::GameHubApp;
use crate::ui::components::render_section_frame;

/// Render the main panel
pub fn render_server_panel(app: &mut GameHubApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();
    let server = app.dashboard.server.clone();
    let game = server.selected;
    let display = server.display();

    ui.add_space(16.0);

    // Header: name, raw status badge, last check
    ui.horizontal(|ui| {
        ui.label(RichText::new(game.name).size(28.0).strong().color(theme.text_primary));
        ui.add_space(12.0);

        let badge_color = if server.status.is_running() {
            theme.success
        } else {
            theme.error
        };
        egui::Frame::new()
            .fill(badge_color.gamma_multiply(0.15))
            .stroke(egui::Stroke::new(1.0, badge_color))
            .corner_radius(10.0)
            .inner_margin(egui::vec2(10.0, 3.0))
            .show(ui, |ui| {
                ui.label(RichText::new(server.status.as_str()).size(12.0).color(badge_color));
            });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let checked = server
                .last_checked
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "never".to_string());
            ui.label(RichText::new(format!("Last check: {}", checked)).color(theme.text_muted));
        });
    });

    ui.add_space(20.0);

    // Status card, filled with the accent for the current display state
    let card_color = theme.accent_color(display.accent(), game);
    egui::Frame::new()
        .fill(card_color)
        .corner_radius(16.0)
        .inner_margin(24.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.set_min_height(160.0);

            ui.label(
                RichText::new("SERVER STATUS")
                    .size(13.0)
                    .color(Color32::from_white_alpha(200)),
            );
            ui.label(RichText::new(display.label()).size(40.0).strong().color(Color32::WHITE));

            ui.add_space(20.0);

            let address = format!("{}:{}", app.config.dashboard.host_address, game.port);
            egui::Frame::new()
                .fill(Color32::from_black_alpha(50))
                .corner_radius(8.0)
                .inner_margin(egui::vec2(12.0, 8.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!(
                                "IP: {}  |  Port: {}",
                                app.config.dashboard.host_address, game.port
                            ))
                            .monospace()
                            .color(Color32::WHITE),
                        );
                        if ui.small_button("Copy").clicked() {
                            ui.ctx().copy_text(address.clone());
                            app.ui.status_message = format!("Copied {}", address);
                        }
                    });
                });
        });

    ui.add_space(20.0);

    render_section_frame(app, ui, "Server Controls", |app, ui| {
        let theme = app.ui.current_theme.clone();
        let server = &app.dashboard.server;
        let can_start = server.can_start();
        let can_stop = server.can_stop();
        let busy = server.action_in_flight;

        let mut requested = None;
        ui.horizontal(|ui| {
            let width = (ui.available_width() - 16.0) / 2.0;

            let start = egui::Button::new(RichText::new("START").strong().color(Color32::WHITE))
                .fill(if can_start { theme.success } else { theme.raised })
                .min_size(Vec2::new(width, 48.0));
            if ui.add_enabled(can_start, start).clicked() {
                requested = Some(ServerAction::Start);
            }

            ui.add_space(8.0);

            let stop = egui::Button::new(RichText::new("STOP").strong().color(Color32::WHITE))
                .fill(if can_stop { theme.error } else { theme.raised })
                .min_size(Vec2::new(width, 48.0));
            if ui.add_enabled(can_stop, stop).clicked() {
                requested = Some(ServerAction::Stop);
            }
        });

        ui.add_space(12.0);
        if busy {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Waiting for the server manager...").color(theme.text_muted));
            });
        } else {
            ui.label(
                RichText::new("Servers take about a minute to start. Do not click twice.")
                    .size(12.0)
                    .color(theme.text_muted),
            );
        }

        if let Some(action) = requested {
            app.request_action(action);
        }
    });
}
