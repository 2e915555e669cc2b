//! Shared UI components for the dashboard

use eframe::egui::{self, RichText};

use crate::app::GameHubApp;
use crate::theme::ThemePreset;

/// Render the top menu bar
pub fn render_menu_bar(app: &mut GameHubApp, ui: &mut egui::Ui) {
    egui::MenuBar::new().ui(ui, |ui| {
        ui.menu_button("File", |ui| {
            if ui.button("Exit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
        ui.menu_button("View", |ui| {
            ui.label(RichText::new("Theme").color(app.ui.current_theme.text_muted));
            for &preset in ThemePreset::all() {
                let selected = app.ui.theme_preset == preset;
                if ui.radio(selected, preset.name()).clicked() {
                    app.set_theme(preset);
                    ui.close();
                }
            }
        });
        ui.menu_button("Help", |ui| {
            if ui.button("About").clicked() {
                app.ui.show_about_dialog = true;
                ui.close();
            }
        });
    });
}

/// Render the bottom status bar
pub fn render_status_bar(app: &GameHubApp, ui: &mut egui::Ui) {
    let theme = &app.ui.current_theme;

    ui.horizontal(|ui| {
        ui.label(RichText::new(&app.ui.status_message).color(theme.text_secondary));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(app.config.api.base_url.as_str())
                    .color(theme.text_muted)
                    .size(11.0),
            );
        });
    });
}

/// Render a titled card around dashboard content
pub fn render_section_frame(
    app: &mut GameHubApp,
    ui: &mut egui::Ui,
    title: &str,
    add_contents: impl FnOnce(&mut GameHubApp, &mut egui::Ui),
) {
    let theme = app.ui.current_theme.clone();

    egui::Frame::new()
        .fill(theme.surface)
        .corner_radius(12.0)
        .inner_margin(20.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).color(theme.text_primary).size(16.0).strong());
            ui.add_space(12.0);
            add_contents(app, ui);
        });
}

/// Render the About dialog
pub fn render_about_dialog(app: &mut GameHubApp, ctx: &egui::Context) {
    if !app.ui.show_about_dialog {
        return;
    }

    let theme = app.ui.current_theme.clone();

    egui::Window::new("About GameHub")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 220.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);

                ui.label(RichText::new("GameHub").size(24.0).strong().color(theme.accent));

                ui.add_space(4.0);
                ui.label(
                    RichText::new("Game Server Dashboard")
                        .size(14.0)
                        .color(theme.text_secondary),
                );

                ui.add_space(12.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme.text_muted),
                );

                ui.add_space(12.0);
                ui.label(
                    RichText::new("Start, stop and watch your game servers")
                        .color(theme.text_secondary),
                );

                ui.add_space(12.0);
                ui.label(
                    RichText::new("Built with Rust + egui")
                        .size(11.0)
                        .color(theme.text_muted),
                );

                ui.add_space(12.0);
                if ui.button("Close").clicked() {
                    app.ui.show_about_dialog = false;
                }

                ui.add_space(8.0);
            });
        });
}
