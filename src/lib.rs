//! Glance — Tauri application entry point.
//!
//! This is the app shell that wires together:
//! - The capture-and-ask orchestrator (ask/)
//! - Screen capture (capture/) and the Gemini backend (llm/)
//! - Settings and credential storage (settings.rs)
//! - Windows and system tray (windows.rs, tray.rs)

pub mod ask;
pub mod capture;
pub mod llm;
pub mod settings;

mod tray;
mod windows;

use ask::{AskRequest, ImageCache, Orchestrator};
use capture::MonitorCapturer;
use llm::GeminiBackend;
use settings::{ApiKeyStore, KeyringStore, Settings};
use std::sync::Arc;
use tauri::Manager;
use tauri_plugin_shell::ShellExt;

/// Tauri command: the end-to-end capture-and-ask flow. Progress and
/// failures reach the UI as window events; the command result is for
/// the caller's console.
#[tauri::command]
async fn capture_and_ask(
    state: tauri::State<'_, Arc<Orchestrator>>,
    request: AskRequest,
) -> Result<(), String> {
    let orchestrator = state.inner().clone();
    orchestrator.ask(request).await.map_err(|e| e.to_string())
}

/// Tauri command: replay the last prompt with a forced fresh capture.
#[tauri::command]
async fn regenerate(state: tauri::State<'_, Arc<Orchestrator>>) -> Result<(), String> {
    let orchestrator = state.inner().clone();
    orchestrator.regenerate().await.map_err(|e| e.to_string())
}

#[tauri::command]
fn get_api_key() -> Result<String, String> {
    Ok(KeyringStore.load().unwrap_or_default())
}

#[tauri::command]
fn save_api_key(key: String) -> Result<(), String> {
    KeyringStore.save(&key).map_err(|e| e.to_string())
}

#[tauri::command]
fn get_settings() -> Result<Settings, String> {
    settings::load_settings().map_err(|e| e.to_string())
}

#[tauri::command]
fn save_settings(settings: Settings) -> Result<(), String> {
    settings::save_settings(&settings).map_err(|e| e.to_string())
}

#[tauri::command]
fn hide_input(app: tauri::AppHandle) -> Result<(), String> {
    if let Some(window) = app.get_webview_window(windows::INPUT_LABEL) {
        window.hide().map_err(|e| e.to_string())?;
    }
    Ok(())
}

#[tauri::command]
fn show_input(app: tauri::AppHandle) -> Result<(), String> {
    if let Some(window) = app.get_webview_window(windows::INPUT_LABEL) {
        window.show().map_err(|e| e.to_string())?;
    }
    Ok(())
}

#[tauri::command]
fn close_response(app: tauri::AppHandle) -> Result<(), String> {
    if let Some(window) = app.get_webview_window(windows::RESPONSE_LABEL) {
        window.close().map_err(|e| e.to_string())?;
    }
    Ok(())
}

#[tauri::command]
fn get_app_info() -> serde_json::Value {
    serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "platform": std::env::consts::OS,
    })
}

#[tauri::command]
fn open_external(app: tauri::AppHandle, url: String) -> Result<(), String> {
    app.shell().open(url, None).map_err(|e| e.to_string())
}

/// Entry point — called by the Tauri runtime.
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::init();

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .invoke_handler(tauri::generate_handler![
            capture_and_ask,
            regenerate,
            get_api_key,
            save_api_key,
            get_settings,
            save_settings,
            hide_input,
            show_input,
            close_response,
            get_app_info,
            open_external,
        ])
        .setup(|app| {
            log::info!("Glance starting up");

            let cache = Arc::new(ImageCache::new());
            let handle = app.handle().clone();

            let orchestrator = Arc::new(Orchestrator::new(
                Box::new(KeyringStore),
                Box::new(MonitorCapturer),
                Box::new(GeminiBackend::new()),
                Box::new(windows::TauriInputSurface::new(handle.clone())),
                Box::new(windows::TauriResponseRouter::new(handle, cache.clone())),
                cache,
            ));
            app.manage(orchestrator);

            windows::create_input_window(app.handle())?;
            tray::setup_tray(app.handle())?;

            log::info!("Tray initialized — ready to answer");
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("Error running Glance");
}
