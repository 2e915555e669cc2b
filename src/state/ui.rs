//! UI-related application state

use crate::theme::{Theme, ThemePreset};

/// UI-related state
pub struct UiState {
    /// Selected theme preset
    pub theme_preset: ThemePreset,
    /// Colors of the selected preset
    pub current_theme: Theme,
    /// Whether theme needs to be applied
    pub theme_dirty: bool,
    /// Whether to show the About dialog
    pub show_about_dialog: bool,
    /// Status message for the status bar
    pub status_message: String,
}

impl UiState {
    /// Create a new UiState with the given theme
    pub fn new(preset: ThemePreset) -> Self {
        Self {
            theme_preset: preset,
            current_theme: preset.theme(),
            theme_dirty: true, // Apply theme on first frame
            show_about_dialog: false,
            status_message: "Ready".to_string(),
        }
    }

    /// Switch to another preset; applied on the next frame
    pub fn set_theme(&mut self, preset: ThemePreset) {
        if preset != self.theme_preset {
            self.theme_preset = preset;
            self.current_theme = preset.theme();
            self.theme_dirty = true;
        }
    }
}
