//! Surface contracts — what the orchestrator needs from the two windows.
//!
//! Implemented against Tauri in windows.rs and against plain structs in
//! tests. All methods are infallible from the orchestrator's point of
//! view: a surface that has gone away just absorbs the call.

use crate::capture::Rect;

/// The strip where the user types a prompt and triggers a request.
pub trait InputSurface: Send + Sync {
    /// Current on-screen bounds, or `None` if the window no longer
    /// exists. Used as the capture reference rectangle.
    fn bounds(&self) -> Option<Rect>;

    fn is_visible(&self) -> bool;

    fn hide(&self);

    fn show(&self);

    /// Report a request-terminal failure to the user. The response
    /// window may not exist yet, so these always land here.
    fn notify_error(&self, message: &str);
}

/// Owns the response window lifecycle and relays stream events to it.
pub trait ResponseRouter: Send + Sync {
    /// Create the response window on first use; show and focus the
    /// existing one thereafter. Idempotent.
    fn ensure_surface(&self);

    fn is_open(&self) -> bool;

    /// Signals the presentation layer to drop any prior transcript and
    /// begin a fresh accumulation.
    fn notify_start(&self, prompt: &str);

    fn notify_chunk(&self, text: &str);

    fn notify_end(&self);

    fn notify_error(&self, message: &str);
}
