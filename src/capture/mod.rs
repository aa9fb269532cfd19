//! Screen capture domain — public API.
//!
//! This module owns everything between "where is the input strip on
//! screen" and "a base64 PNG of the display it sits on". External code
//! should only use the types and trait exported here.

mod display;
mod screenshot;

pub use display::{pick_display, scaled_size, DisplayInfo, Point, Rect};
pub use screenshot::MonitorCapturer;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};

/// An encoded still image of one display: PNG bytes, base64 payload only
/// (no data-URL prefix). At most one instance lives in the image cache
/// at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    png_base64: String,
}

impl CapturedImage {
    pub fn from_png_bytes(bytes: &[u8]) -> Self {
        Self {
            png_base64: STANDARD.encode(bytes),
        }
    }

    /// Wrap an already-encoded payload. The caller guarantees it is
    /// base64 PNG data without a data-URL prefix.
    pub fn from_base64(payload: impl Into<String>) -> Self {
        Self {
            png_base64: payload.into(),
        }
    }

    pub fn as_base64(&self) -> &str {
        &self.png_base64
    }
}

/// Produces a still image of the display containing the reference
/// rectangle (the input strip's current bounds).
///
/// `None` means the invoking surface no longer exists — a precondition
/// failure, not a capture failure.
#[async_trait]
pub trait ScreenCapturer: Send + Sync {
    async fn capture(&self, reference: Option<Rect>) -> Result<CapturedImage, CaptureError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("No reference surface to locate the target display")]
    ReferenceSurfaceMissing,

    #[error("Failed to enumerate displays: {0}")]
    MonitorEnumeration(String),

    #[error("No capture source matches display {0}")]
    SourceNotFound(String),

    #[error("Screen capture failed: {0}")]
    CaptureFailed(String),

    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}
