//! UI modules for the dashboard
//!
//! Rendering only: every widget reads from `GameHubApp` and reports user
//! input back through its methods.

mod components;
mod server_panel;
mod sidebar;

pub use components::{render_about_dialog, render_menu_bar, render_status_bar};
pub use server_panel::render_server_panel;
pub use sidebar::render_sidebar;
