//! Dashboard color schemes.
//!
//! Status cards take the selected game's own color, so a preset only has to
//! supply the chrome around it plus the warning and neutral card fills.

use eframe::egui::{self, Color32, Stroke, Visuals};
use serde::{Deserialize, Serialize};

use crate::display::Accent;
use crate::registry::GameProfile;

/// Available theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Graphite,
    Midnight,
}

impl ThemePreset {
    pub fn all() -> &'static [ThemePreset] {
        &[ThemePreset::Graphite, ThemePreset::Midnight]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Graphite => "Graphite",
            ThemePreset::Midnight => "Midnight",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Graphite => Theme::graphite(),
            ThemePreset::Midnight => Theme::midnight(),
        }
    }
}

impl std::str::FromStr for ThemePreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "graphite" => Ok(ThemePreset::Graphite),
            "midnight" => Ok(ThemePreset::Midnight),
            other => anyhow::bail!("Unknown theme: {} (expected graphite or midnight)", other),
        }
    }
}

/// Colors for one preset
#[derive(Debug, Clone)]
pub struct Theme {
    /// Window and panel background
    pub panel: Color32,
    /// Section cards
    pub surface: Color32,
    /// Buttons and other raised widgets, also used for disabled controls
    pub raised: Color32,
    /// Text edits and scroll troughs
    pub sunken: Color32,

    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    /// Fallback when a game has no usable color of its own
    pub accent: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
    /// Card fill for Offline and pending states
    pub neutral: Color32,

    pub border: Color32,
}

impl Theme {
    pub fn graphite() -> Self {
        Self {
            panel: Color32::from_rgb(24, 26, 31),
            surface: Color32::from_rgb(32, 35, 42),
            raised: Color32::from_rgb(45, 49, 58),
            sunken: Color32::from_rgb(16, 17, 21),
            text_primary: Color32::from_rgb(236, 239, 244),
            text_secondary: Color32::from_rgb(184, 190, 202),
            text_muted: Color32::from_rgb(124, 132, 148),
            accent: Color32::from_rgb(94, 156, 255),
            success: Color32::from_rgb(52, 199, 120),
            warning: Color32::from_rgb(232, 163, 61),
            error: Color32::from_rgb(229, 83, 75),
            neutral: Color32::from_rgb(88, 96, 112),
            border: Color32::from_rgb(55, 60, 71),
        }
    }

    pub fn midnight() -> Self {
        Self {
            panel: Color32::from_rgb(13, 17, 28),
            surface: Color32::from_rgb(20, 26, 42),
            raised: Color32::from_rgb(31, 39, 61),
            sunken: Color32::from_rgb(8, 10, 18),
            text_primary: Color32::from_rgb(226, 232, 255),
            text_secondary: Color32::from_rgb(170, 180, 214),
            text_muted: Color32::from_rgb(110, 121, 158),
            accent: Color32::from_rgb(129, 140, 248),
            success: Color32::from_rgb(45, 212, 150),
            warning: Color32::from_rgb(250, 184, 80),
            error: Color32::from_rgb(244, 99, 110),
            neutral: Color32::from_rgb(71, 81, 110),
            border: Color32::from_rgb(40, 50, 78),
        }
    }

    /// Status card fill for an accent
    pub fn accent_color(&self, accent: Accent, game: &GameProfile) -> Color32 {
        match accent {
            Accent::Game => game_color(game).unwrap_or(self.accent),
            Accent::Warning => self.warning,
            Accent::Neutral => self.neutral,
        }
    }

    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        visuals.panel_fill = self.panel;
        visuals.window_fill = self.panel;
        visuals.faint_bg_color = self.surface;
        visuals.extreme_bg_color = self.sunken;
        visuals.window_stroke = Stroke::new(1.0, self.border);
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;
        visuals.hyperlink_color = self.accent;
        visuals.selection.bg_fill = self.accent.gamma_multiply(0.35);
        visuals.selection.stroke = Stroke::new(1.0, self.accent);

        let widgets = &mut visuals.widgets;
        let pressed = self.accent.gamma_multiply(0.6);
        for (state, fill, outline, text) in [
            (&mut widgets.noninteractive, self.surface, self.border, self.text_secondary),
            (&mut widgets.inactive, self.raised, self.border, self.text_primary),
            (&mut widgets.hovered, self.raised, self.accent, self.text_primary),
            (&mut widgets.active, pressed, self.accent, self.text_primary),
        ] {
            state.bg_fill = fill;
            state.weak_bg_fill = fill;
            state.bg_stroke = Stroke::new(1.0, outline);
            state.fg_stroke = Stroke::new(1.0, text);
        }

        ctx.set_visuals(visuals);
    }
}

/// Parse a game's `#RRGGBB` color token
pub fn game_color(game: &GameProfile) -> Option<Color32> {
    let hex = game.color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}
