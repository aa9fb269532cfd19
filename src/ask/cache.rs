//! Single-slot cache for the most recent screen capture.
//!
//! Held so follow-up questions can reuse one screenshot without
//! re-triggering a capture. Cleared exactly when the response window is
//! dismissed — stream completion alone never invalidates it.

use crate::capture::CapturedImage;
use std::sync::Mutex;

pub struct ImageCache {
    slot: Mutex<Option<CapturedImage>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Overwrites any prior value unconditionally.
    pub fn store(&self, image: CapturedImage) {
        *self.slot.lock().unwrap() = Some(image);
    }

    pub fn get(&self) -> Option<CapturedImage> {
        self.slot.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        *self.slot.lock().unwrap() = None;
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}
