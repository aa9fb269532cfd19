//! Google Gemini backend — streaming SSE over reqwest.

use super::{sse, ChunkSource, ContentPart, GenerateError, GenerationBackend, FALLBACK_PROMPT};
use async_trait::async_trait;
use std::collections::VecDeque;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiBackend {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiBackend {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }
}

impl Default for GeminiBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the JSON request body for `streamGenerateContent`.
///
/// Part order is preserved: the image, when present, goes first. An
/// empty prompt is replaced with the fixed fallback so an image-only
/// request still carries text.
fn build_request_body(parts: &[ContentPart]) -> serde_json::Value {
    let wire_parts: Vec<serde_json::Value> = parts
        .iter()
        .map(|part| match part {
            ContentPart::Image(image) => serde_json::json!({
                "inline_data": {
                    "mime_type": "image/png",
                    "data": image.as_base64(),
                }
            }),
            ContentPart::Text(text) => {
                let text = if text.trim().is_empty() {
                    FALLBACK_PROMPT
                } else {
                    text.as_str()
                };
                serde_json::json!({ "text": text })
            }
        })
        .collect();

    serde_json::json!({
        "contents": [{
            "role": "user",
            "parts": wire_parts,
        }]
    })
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn stream_generate(
        &self,
        api_key: &str,
        model_id: &str,
        parts: Vec<ContentPart>,
    ) -> Result<Box<dyn ChunkSource>, GenerateError> {
        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, model_id
        );

        log::info!("[LLM] Model: {} (streaming)", model_id);
        let start = std::time::Instant::now();

        // Key goes in a header, never the URL, so it cannot leak into logs.
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(&build_request_body(&parts))
            .send()
            .await
            .map_err(|e| GenerateError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            log::error!("[LLM] API returned {}: {}", status, message);
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        log::info!("[LLM] TTFB: {}ms", start.elapsed().as_millis());

        Ok(Box::new(GeminiStream {
            response,
            buffer: String::new(),
            pending: VecDeque::new(),
            done: false,
        }))
    }
}

/// Pull-based chunk sequence over one in-flight HTTP response.
///
/// One SSE event can carry several text parts and one network chunk can
/// carry several events, so decoded text queues in `pending` and drains
/// one item per `next_chunk` call.
struct GeminiStream {
    response: reqwest::Response,
    buffer: String,
    pending: VecDeque<String>,
    done: bool,
}

#[async_trait]
impl ChunkSource for GeminiStream {
    async fn next_chunk(&mut self) -> Option<Result<String, GenerateError>> {
        loop {
            if let Some(text) = self.pending.pop_front() {
                return Some(Ok(text));
            }
            if self.done {
                return None;
            }

            match self.response.chunk().await {
                Ok(Some(bytes)) => {
                    self.buffer.push_str(&String::from_utf8_lossy(&bytes));
                    for data in sse::drain_data_events(&mut self.buffer) {
                        if let Some(text) = sse::extract_chunk_text(&data) {
                            self.pending.push_back(text);
                        }
                    }
                }
                Ok(None) => {
                    self.done = true;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(GenerateError::Stream(e.to_string())));
                }
            }
        }
    }
}
