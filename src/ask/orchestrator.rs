//! The capture-and-ask request state machine.
//!
//! One `ask` call walks: validate credential → (capture)? → dispatch →
//! stream → end. Only one stream is expected in flight per response
//! window; if a second request lands mid-stream anyway, the newer
//! request takes over and the older stream's remaining chunks are
//! discarded instead of displayed.

use super::surface::{InputSurface, ResponseRouter};
use super::{AskError, AskRequest, ImageCache, StreamSession};
use crate::capture::ScreenCapturer;
use crate::llm::{ContentPart, GenerateError, GenerationBackend};
use crate::settings::ApiKeyStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub struct Orchestrator {
    credentials: Box<dyn ApiKeyStore>,
    capturer: Box<dyn ScreenCapturer>,
    backend: Box<dyn GenerationBackend>,
    input: Box<dyn InputSurface>,
    router: Box<dyn ResponseRouter>,
    cache: Arc<ImageCache>,
    current_token: AtomicU64,
    session: Mutex<Option<StreamSession>>,
}

impl Orchestrator {
    pub fn new(
        credentials: Box<dyn ApiKeyStore>,
        capturer: Box<dyn ScreenCapturer>,
        backend: Box<dyn GenerationBackend>,
        input: Box<dyn InputSurface>,
        router: Box<dyn ResponseRouter>,
        cache: Arc<ImageCache>,
    ) -> Self {
        Self {
            credentials,
            capturer,
            backend,
            input,
            router,
            cache,
            current_token: AtomicU64::new(0),
            session: Mutex::new(None),
        }
    }

    pub fn image_cache(&self) -> Arc<ImageCache> {
        self.cache.clone()
    }

    /// Run one full request. Terminal pre-dispatch failures are reported
    /// to the input surface; failures after dispatch land in the
    /// response transcript. Either way the error is also returned so the
    /// command layer can log it.
    pub async fn ask(&self, request: AskRequest) -> Result<(), AskError> {
        log::info!(
            "[ASK] Processing query ({} chars) model={} include_image={}",
            request.prompt.len(),
            request.model,
            request.include_image
        );

        let Some(api_key) = self.credentials.load().filter(|key| !key.is_empty()) else {
            log::error!("[ASK] API key not set");
            self.input
                .notify_error("API key not set. Please add it in settings.");
            return Err(AskError::MissingCredential);
        };

        let image = if request.include_image {
            if self.input.is_visible() {
                // Hide the strip so it does not appear in its own screenshot.
                self.input.hide();
            }
            match self.capturer.capture(self.input.bounds()).await {
                Ok(image) => {
                    self.cache.store(image.clone());
                    Some(image)
                }
                Err(e) => {
                    log::error!("[ASK] Screen capture failed: {}", e);
                    self.input.show();
                    self.input.notify_error("Failed to capture the screen.");
                    return Err(e.into());
                }
            }
        } else {
            let cached = self.cache.get();
            if cached.is_some() {
                log::info!("[ASK] Using cached screenshot for follow-up");
            }
            cached
        };

        // From here on the newest request owns the response surface.
        let token = self.current_token.fetch_add(1, Ordering::SeqCst) + 1;

        self.router.ensure_surface();
        self.router.notify_start(&request.prompt);
        *self.session.lock().unwrap() = Some(StreamSession::new(&request.prompt, &request.model));

        // notify_end must fire exactly once per dispatched request, on
        // every exit path.
        let _end_guard = EndGuard {
            router: self.router.as_ref(),
        };

        let mut parts = Vec::new();
        if let Some(image) = image {
            parts.push(ContentPart::Image(image));
        }
        parts.push(ContentPart::Text(request.prompt.clone()));

        let mut stream = match self
            .backend
            .stream_generate(&api_key, &request.model, parts)
            .await
        {
            Ok(stream) => stream,
            Err(e) => {
                self.report_generation_failure(&e);
                self.finish_session(token);
                return Err(e.into());
            }
        };

        let mut failure: Option<GenerateError> = None;
        while let Some(item) = stream.next_chunk().await {
            if self.current_token.load(Ordering::SeqCst) != token {
                // A newer request took over; drop the rest of this stream.
                log::debug!("[ASK] Discarding stale stream (token {})", token);
                break;
            }
            match item {
                Ok(chunk) => {
                    self.append_to_session(token, &chunk);
                    self.router.notify_chunk(&chunk);
                }
                Err(e) => {
                    self.report_generation_failure(&e);
                    failure = Some(e);
                    break;
                }
            }
        }

        self.finish_session(token);

        match failure {
            Some(e) => Err(e.into()),
            None => {
                log::info!("[ASK] Response completed");
                Ok(())
            }
        }
    }

    /// Reissue the last request's prompt with a forced fresh capture.
    /// The user wants an up-to-date screen reference — never the cache.
    pub async fn regenerate(&self) -> Result<(), AskError> {
        let request = {
            let session = self.session.lock().unwrap();
            session.as_ref().map(|s| AskRequest {
                prompt: s.original_prompt.clone(),
                model: s.original_model.clone(),
                include_image: true,
            })
        };

        match request {
            Some(request) => {
                log::info!("[ASK] Regenerating last response");
                self.ask(request).await
            }
            None => {
                log::warn!("[ASK] Nothing to regenerate yet");
                Ok(())
            }
        }
    }

    /// Append partial output plus the error to the transcript so they
    /// stay visible together, and raise the error event.
    fn report_generation_failure(&self, error: &GenerateError) {
        log::error!("[ASK] AI error: {}", error);
        self.router.notify_chunk(&format!("\n\nError: {}", error));
        self.router.notify_error(&error.to_string());
    }

    fn append_to_session(&self, token: u64, chunk: &str) {
        if self.current_token.load(Ordering::SeqCst) != token {
            return;
        }
        if let Some(session) = self.session.lock().unwrap().as_mut() {
            session.accumulated_text.push_str(chunk);
        }
    }

    fn finish_session(&self, token: u64) {
        if self.current_token.load(Ordering::SeqCst) != token {
            return;
        }
        if let Some(session) = self.session.lock().unwrap().as_mut() {
            session.is_active = false;
            log::info!(
                "[ASK] Stream finished — {} chars accumulated",
                session.accumulated_text.len()
            );
        }
    }
}

struct EndGuard<'a> {
    router: &'a dyn ResponseRouter,
}

impl Drop for EndGuard<'_> {
    fn drop(&mut self) {
        self.router.notify_end();
    }
}
