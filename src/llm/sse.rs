//! SSE plumbing for the Gemini streaming endpoint.
//!
//! Gemini emits data-only SSE events (no `event:` prefix), separated by
//! `\n\n`. Network chunks split events at arbitrary byte positions, so
//! parsing works against an accumulating buffer.

/// Drain complete data-only SSE events from the buffer.
///
/// Returns the data payloads and removes the processed events from the
/// buffer; a trailing partial event stays buffered for the next call.
pub fn drain_data_events(buffer: &mut String) -> Vec<String> {
    let mut events = Vec::new();

    while let Some(pos) = buffer.find("\n\n") {
        let event_block = buffer[..pos].to_string();
        *buffer = buffer[pos + 2..].to_string();

        for line in event_block.lines() {
            if let Some(data) = line.strip_prefix("data: ") {
                if !data.is_empty() {
                    events.push(data.to_string());
                }
            }
        }
    }

    events
}

/// Extract the response text from one Gemini stream event payload.
///
/// Concatenates the text of all parts in the first candidate. Returns
/// `None` for events that carry no text (safety metadata, usage, or
/// malformed JSON).
pub fn extract_chunk_text(data: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(data).ok()?;
    let parts = json["candidates"][0]["content"]["parts"].as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
