//! System tray setup and click handler.
//!
//! The tray is the app's home base: left-click toggles the input strip,
//! the context menu reaches settings, cache clearing, and quit.

use crate::ask::Orchestrator;
use crate::windows::{self, INPUT_LABEL};
use std::sync::Arc;
use tauri::{
    image::Image as TauriImage,
    menu::{MenuBuilder, MenuItemBuilder},
    tray::TrayIconBuilder,
    AppHandle, Emitter, Manager,
};

/// Sets up the tray icon with a click handler and context menu.
pub fn setup_tray(app: &AppHandle) -> Result<(), Box<dyn std::error::Error>> {
    let show_item = MenuItemBuilder::with_id("show", "Show Assistant").build(app)?;
    let settings_item = MenuItemBuilder::with_id("settings", "Settings").build(app)?;
    let clear_item = MenuItemBuilder::with_id("clear-cache", "Clear Screenshot Cache").build(app)?;
    let quit_item = MenuItemBuilder::with_id("quit", "Quit Glance").build(app)?;

    let menu = MenuBuilder::new(app)
        .item(&show_item)
        .item(&settings_item)
        .separator()
        .item(&clear_item)
        .separator()
        .item(&quit_item)
        .build()?;

    // 16x16 transparent placeholder until the app ships a real icon.
    let tray_icon = TauriImage::new_owned(vec![0u8; 16 * 16 * 4], 16, 16);

    let _tray = TrayIconBuilder::new()
        .icon(tray_icon)
        .tooltip("Glance — ask AI about your screen")
        .menu(&menu)
        .show_menu_on_left_click(false)
        .on_tray_icon_event(|tray_icon, event| {
            if let tauri::tray::TrayIconEvent::Click {
                button: tauri::tray::MouseButton::Left,
                ..
            } = event
            {
                toggle_input_window(tray_icon.app_handle());
            }
        })
        .on_menu_event(|app, event| match event.id().as_ref() {
            "show" => {
                if let Err(e) = windows::create_input_window(app) {
                    log::error!("[TRAY] Failed to show input window: {}", e);
                }
            }
            "settings" => {
                // The settings panel lives inside the input strip's page.
                if let Err(e) = windows::create_input_window(app) {
                    log::error!("[TRAY] Failed to show input window: {}", e);
                    return;
                }
                let _ = app.emit_to(INPUT_LABEL, "open-settings", ());
            }
            "clear-cache" => {
                let orchestrator = app.state::<Arc<Orchestrator>>();
                orchestrator.image_cache().clear();
                log::info!("[TRAY] Screenshot cache cleared");
            }
            "quit" => {
                log::info!("[TRAY] Quit requested");
                app.exit(0);
            }
            _ => {}
        })
        .build(app)?;

    Ok(())
}

fn toggle_input_window(app: &AppHandle) {
    match app.get_webview_window(INPUT_LABEL) {
        Some(window) => {
            let visible = window.is_visible().unwrap_or(false);
            let result = if visible { window.hide() } else { window.show() };
            if let Err(e) = result {
                log::error!("[TRAY] Failed to toggle input window: {}", e);
            }
        }
        None => {
            if let Err(e) = windows::create_input_window(app) {
                log::error!("[TRAY] Failed to create input window: {}", e);
            }
        }
    }
}
