// Hide console window in release builds (Windows GUI app)
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod api;
mod app;
mod cli;
mod config;
mod display;
mod registry;
mod state;
mod status;
mod task;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(windows)]
use windows::Win32::Foundation::HANDLE;
#[cfg(windows)]
use windows::Win32::System::Threading::CreateMutexW;
#[cfg(windows)]
use windows::core::PCWSTR;

/// Build the window icon: a rounded green square, drawn in memory
fn build_icon() -> egui::IconData {
    const SIZE: u32 = 64;
    const RADIUS: f32 = 14.0;

    let mut rgba = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    for y in 0..SIZE {
        for x in 0..SIZE {
            // Distance outside the rounded corner, if any
            let cx = (x as f32 + 0.5).clamp(RADIUS, SIZE as f32 - RADIUS);
            let cy = (y as f32 + 0.5).clamp(RADIUS, SIZE as f32 - RADIUS);
            let dist = ((x as f32 + 0.5 - cx).powi(2) + (y as f32 + 0.5 - cy).powi(2)).sqrt();
            let alpha = if dist <= RADIUS { 255 } else { 0 };
            rgba.extend_from_slice(&[0x4A, 0xDE, 0x80, alpha]);
        }
    }

    egui::IconData {
        rgba,
        width: SIZE,
        height: SIZE,
    }
}

/// Single instance enforcement using a Windows named mutex.
/// Returns a handle that must be kept alive for the duration of the app.
#[cfg(windows)]
fn acquire_single_instance() -> Option<HANDLE> {
    use windows::Win32::Foundation::ERROR_ALREADY_EXISTS;
    use windows::Win32::Foundation::GetLastError;

    let mutex_name: Vec<u16> = "Global\\GameHubDashboard\0".encode_utf16().collect();

    unsafe {
        let handle = CreateMutexW(None, false, PCWSTR(mutex_name.as_ptr())).ok()?;

        // Check if another instance already owns this mutex
        if GetLastError() == ERROR_ALREADY_EXISTS {
            tracing::warn!("Another instance of GameHub is already running");
            return None;
        }

        Some(handle)
    }
}

#[cfg(not(windows))]
fn acquire_single_instance() -> Option<()> {
    Some(()) // No-op on non-Windows platforms
}

/// Reattach to the launching console so CLI output is visible from a GUI-subsystem build
#[cfg(windows)]
fn attach_console() {
    use windows::Win32::System::Console::{ATTACH_PARENT_PROCESS, AttachConsole};
    unsafe {
        let _ = AttachConsole(ATTACH_PARENT_PROCESS);
    }
}

#[cfg(not(windows))]
fn attach_console() {}

#[tokio::main]
async fn main() -> Result<()> {
    // Any arguments mean CLI mode
    let cli_mode = std::env::args_os().len() > 1;
    if cli_mode {
        attach_console();
    }

    // Initialize logging. CLI output owns stdout, so logs go to stderr and stay quiet by default.
    let default_filter = if cli_mode { "gamehub=warn" } else { "gamehub=debug,info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli_mode {
        return cli::run(cli::Cli::parse()).await;
    }

    tracing::info!("Starting GameHub dashboard");

    let _instance_lock = match acquire_single_instance() {
        Some(lock) => lock,
        None => {
            tracing::error!("GameHub is already running. Exiting.");
            #[cfg(windows)]
            {
                use windows::Win32::UI::WindowsAndMessaging::{
                    MB_ICONINFORMATION, MB_OK, MessageBoxW,
                };
                let title: Vec<u16> = "GameHub\0".encode_utf16().collect();
                let msg: Vec<u16> = "GameHub is already running.\0".encode_utf16().collect();
                unsafe {
                    MessageBoxW(
                        None,
                        PCWSTR(msg.as_ptr()),
                        PCWSTR(title.as_ptr()),
                        MB_OK | MB_ICONINFORMATION,
                    );
                }
            }
            return Ok(());
        }
    };

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([960.0, 640.0])
        .with_min_inner_size([720.0, 480.0])
        .with_title("GameHub - Server Dashboard")
        .with_icon(Arc::new(build_icon()));

    let native_options = eframe::NativeOptions {
        viewport,
        persist_window: true, // Save/restore window size and position
        ..Default::default()
    };

    eframe::run_native(
        "GameHub",
        native_options,
        Box::new(|cc| Ok(Box::new(app::GameHubApp::new(cc)?))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}
