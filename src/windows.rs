//! Window management — the input strip, the response panel, and the
//! Tauri-backed surface adapters handed to the orchestrator.

use crate::ask::surface::{InputSurface, ResponseRouter};
use crate::ask::ImageCache;
use crate::capture::Rect;
use std::sync::Arc;
use tauri::{AppHandle, Emitter, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder, WindowEvent};

pub const INPUT_LABEL: &str = "input";
pub const RESPONSE_LABEL: &str = "response";

const INPUT_WIDTH: f64 = 600.0;
const INPUT_HEIGHT: f64 = 80.0;

/// Create the input strip, or show the existing one.
pub fn create_input_window(app: &AppHandle) -> tauri::Result<WebviewWindow> {
    if let Some(existing) = app.get_webview_window(INPUT_LABEL) {
        existing.show()?;
        return Ok(existing);
    }

    // Centered horizontally near the top of the primary display.
    let x = match app.primary_monitor() {
        Ok(Some(monitor)) => {
            let logical_width = monitor.size().width as f64 / monitor.scale_factor();
            ((logical_width - INPUT_WIDTH) / 2.0).max(0.0)
        }
        _ => 0.0,
    };

    let window = WebviewWindowBuilder::new(app, INPUT_LABEL, WebviewUrl::App("input.html".into()))
        .title("Glance")
        .inner_size(INPUT_WIDTH, INPUT_HEIGHT)
        .position(x, 20.0)
        .decorations(false)
        .transparent(true)
        .always_on_top(true)
        .resizable(false)
        .skip_taskbar(true)
        .build()?;

    log::info!("[WINDOW] Input window created");
    Ok(window)
}

/// Create the response panel. Closing it ends the conversation: the
/// screenshot cache is cleared so the next session starts fresh.
pub fn create_response_window(
    app: &AppHandle,
    cache: Arc<ImageCache>,
) -> tauri::Result<WebviewWindow> {
    let window =
        WebviewWindowBuilder::new(app, RESPONSE_LABEL, WebviewUrl::App("response.html".into()))
            .title("Glance — Response")
            .inner_size(800.0, 600.0)
            .min_inner_size(600.0, 400.0)
            .max_inner_size(1200.0, 900.0)
            .center()
            .decorations(false)
            .transparent(true)
            .always_on_top(true)
            .skip_taskbar(true)
            .visible(false)
            .build()?;

    window.on_window_event(move |event| {
        if matches!(event, WindowEvent::Destroyed) {
            cache.clear();
            log::info!("[WINDOW] Response window closed — screenshot cache cleared");
        }
    });

    log::info!("[WINDOW] Response window created");
    Ok(window)
}

/// Input-strip adapter. Holds only an `AppHandle`; the window is looked
/// up per call so a recreated window is picked up transparently.
#[derive(Clone)]
pub struct TauriInputSurface {
    app: AppHandle,
}

impl TauriInputSurface {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }

    fn window(&self) -> Option<WebviewWindow> {
        self.app.get_webview_window(INPUT_LABEL)
    }
}

impl InputSurface for TauriInputSurface {
    fn bounds(&self) -> Option<Rect> {
        let window = self.window()?;
        let position = window.outer_position().ok()?;
        let size = window.outer_size().ok()?;
        Some(Rect {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        })
    }

    fn is_visible(&self) -> bool {
        self.window()
            .and_then(|window| window.is_visible().ok())
            .unwrap_or(false)
    }

    fn hide(&self) {
        if let Some(window) = self.window() {
            let _ = window.hide();
        }
    }

    fn show(&self) {
        if let Some(window) = self.window() {
            let _ = window.show();
        }
    }

    fn notify_error(&self, message: &str) {
        if self.window().is_some() {
            let _ = self.app.emit_to(INPUT_LABEL, "error", message);
        }
    }
}

/// Response-panel adapter. Existence is checked immediately before each
/// send so a window the user closed mid-stream just swallows the event.
#[derive(Clone)]
pub struct TauriResponseRouter {
    app: AppHandle,
    cache: Arc<ImageCache>,
}

impl TauriResponseRouter {
    pub fn new(app: AppHandle, cache: Arc<ImageCache>) -> Self {
        Self { app, cache }
    }
}

impl ResponseRouter for TauriResponseRouter {
    fn ensure_surface(&self) {
        let window = match self.app.get_webview_window(RESPONSE_LABEL) {
            Some(window) => window,
            None => match create_response_window(&self.app, self.cache.clone()) {
                Ok(window) => window,
                Err(e) => {
                    log::error!("[WINDOW] Failed to create response window: {}", e);
                    return;
                }
            },
        };
        let _ = window.show();
        let _ = window.set_focus();
    }

    fn is_open(&self) -> bool {
        self.app.get_webview_window(RESPONSE_LABEL).is_some()
    }

    fn notify_start(&self, prompt: &str) {
        if self.is_open() {
            let _ = self.app.emit_to(
                RESPONSE_LABEL,
                "ai-response-start",
                serde_json::json!({ "prompt": prompt }),
            );
        }
    }

    fn notify_chunk(&self, text: &str) {
        if self.is_open() {
            let _ = self.app.emit_to(RESPONSE_LABEL, "ai-response-chunk", text);
        }
    }

    fn notify_end(&self) {
        if self.is_open() {
            let _ = self.app.emit_to(RESPONSE_LABEL, "ai-response-end", ());
        }
    }

    fn notify_error(&self, message: &str) {
        if self.is_open() {
            let _ = self.app.emit_to(RESPONSE_LABEL, "error", message);
        }
    }
}
