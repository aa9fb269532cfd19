//! Generation dispatch domain — streaming calls to the AI backend.
//!
//! The orchestrator talks to `GenerationBackend` only; the Gemini wire
//! format and SSE plumbing are implementation details of gemini.rs.

mod gemini;
mod sse;

pub use gemini::GeminiBackend;

use crate::capture::CapturedImage;
use async_trait::async_trait;

/// Substituted for an empty prompt so an image-only request is still
/// well-formed.
pub const FALLBACK_PROMPT: &str = "Analyze this";

/// One ordered piece of request content. An image part, when present,
/// always precedes the text part.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Image(CapturedImage),
    Text(String),
}

/// A lazy, finite, non-restartable sequence of response text chunks.
///
/// Pulled one chunk at a time; `None` means the stream is exhausted. A
/// mid-stream failure is delivered as a final `Err` item — the source
/// yields nothing after it.
#[async_trait]
pub trait ChunkSource: Send {
    async fn next_chunk(&mut self) -> Option<Result<String, GenerateError>>;
}

/// Dispatches one streaming generation request.
///
/// No retries happen at this layer; a retry is always a fresh
/// user-initiated request.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn stream_generate(
        &self,
        api_key: &str,
        model_id: &str,
        parts: Vec<ContentPart>,
    ) -> Result<Box<dyn ChunkSource>, GenerateError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("stream interrupted: {0}")]
    Stream(String),
}
