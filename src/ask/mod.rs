//! Capture-and-ask domain — the request state machine and its state.
//!
//! This is the only part of the app with real control flow: everything
//! else is OS-glue feeding it collaborators.

pub mod cache;
pub mod orchestrator;
pub mod surface;

pub use cache::ImageCache;
pub use orchestrator::Orchestrator;

use crate::capture::CaptureError;
use crate::llm::GenerateError;

/// One user submission. Immutable once dispatched.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    pub prompt: String,
    pub model: String,
    pub include_image: bool,
}

/// Transient per-request record: the prompt/model pair regenerate
/// replays, plus the transcript accumulated so far. Never persisted.
#[derive(Debug)]
pub struct StreamSession {
    pub original_prompt: String,
    pub original_model: String,
    pub accumulated_text: String,
    pub is_active: bool,
}

impl StreamSession {
    fn new(prompt: &str, model: &str) -> Self {
        Self {
            original_prompt: prompt.to_string(),
            original_model: model.to_string(),
            accumulated_text: String::new(),
            is_active: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AskError {
    #[error("API key not set")]
    MissingCredential,

    #[error("screen capture failed: {0}")]
    CaptureFailed(#[from] CaptureError),

    #[error("generation failed: {0}")]
    GenerationFailed(#[from] GenerateError),
}
