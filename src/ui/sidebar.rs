//! Game list on the left of the window

use eframe::egui::{self, Color32, CornerRadius, RichText, Vec2};

use crate::app::GameHubApp;
use crate::registry::{GAMES, GameProfile};
use crate::theme;

/// Render the game list
pub fn render_sidebar(app: &mut GameHubApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();

    ui.add_space(16.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new("GameHub").size(22.0).strong().color(theme.text_primary));
    });
    ui.add_space(12.0);
    ui.separator();
    ui.add_space(8.0);

    let mut clicked = None;
    for game in &GAMES {
        let is_active = app.dashboard.server.selected.id == game.id;
        if render_nav_item(ui, game, is_active, &theme) {
            clicked = Some(game.id);
        }
        ui.add_space(4.0);
    }

    if let Some(id) = clicked {
        app.select_game(id);
    }
}

/// Render one game entry. Returns true when clicked.
fn render_nav_item(
    ui: &mut egui::Ui,
    game: &GameProfile,
    is_active: bool,
    theme: &theme::Theme,
) -> bool {
    let game_color = theme::game_color(game).unwrap_or(theme.accent);

    let (bg, text_color) = if is_active {
        (Color32::from_white_alpha(25), theme.text_primary)
    } else {
        (Color32::TRANSPARENT, theme.text_muted)
    };

    let mut label = RichText::new(format!("{}  {}", game.icon, game.name))
        .size(15.0)
        .color(text_color);
    if is_active {
        label = label.strong();
    }

    let button = egui::Button::new(label)
        .fill(bg)
        .stroke(egui::Stroke::NONE)
        .corner_radius(CornerRadius {
            nw: 0,
            ne: 8,
            sw: 0,
            se: 8,
        })
        .min_size(Vec2::new(ui.available_width(), 40.0));

    let response = ui.add(button);

    // Accent bar on the left edge of the active entry
    if is_active {
        let rect = response.rect;
        let bar = egui::Rect::from_min_size(rect.min, Vec2::new(4.0, rect.height()));
        ui.painter().rect_filled(bar, 0.0, game_color);
    }

    response.clicked()
}
