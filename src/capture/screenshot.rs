//! Display capture using the `xcap` crate.
//!
//! This is the infrastructure layer — it talks to the OS. The choice of
//! which display to shoot is made by the pure logic in display.rs.

use super::{pick_display, scaled_size, CaptureError, CapturedImage, DisplayInfo, Rect};
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use xcap::Monitor;

/// Captures whole monitors via xcap and encodes them as PNG.
pub struct MonitorCapturer;

#[async_trait]
impl super::ScreenCapturer for MonitorCapturer {
    async fn capture(&self, reference: Option<Rect>) -> Result<CapturedImage, CaptureError> {
        let reference = reference.ok_or(CaptureError::ReferenceSurfaceMissing)?;

        let monitors =
            Monitor::all().map_err(|e| CaptureError::MonitorEnumeration(e.to_string()))?;
        let displays: Vec<DisplayInfo> = monitors.iter().map(display_info).collect();

        let chosen = pick_display(&displays, &reference)
            .ok_or_else(|| CaptureError::SourceNotFound("<none attached>".to_string()))?;

        let (width, height) = scaled_size(chosen);
        log::info!(
            "[CAPTURE] Display {} selected ({}x{} at scale {})",
            chosen.id,
            width,
            height,
            chosen.scale_factor
        );

        // Re-select the capture source by display identifier. Compared as
        // strings: ids are numeric on some platforms, opaque on others.
        let source = monitors
            .iter()
            .find(|monitor| monitor_id(monitor) == chosen.id)
            .ok_or_else(|| CaptureError::SourceNotFound(chosen.id.clone()))?;

        let start = std::time::Instant::now();
        let image = source
            .capture_image()
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

        let mut png_bytes: Vec<u8> = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
            .map_err(|e| CaptureError::EncodingFailed(e.to_string()))?;

        log::info!(
            "[CAPTURE] Captured and encoded in {}ms — {} bytes",
            start.elapsed().as_millis(),
            png_bytes.len()
        );

        Ok(CapturedImage::from_png_bytes(&png_bytes))
    }
}

fn monitor_id(monitor: &Monitor) -> String {
    monitor.id().map(|id| id.to_string()).unwrap_or_default()
}

fn display_info(monitor: &Monitor) -> DisplayInfo {
    DisplayInfo {
        id: monitor_id(monitor),
        bounds: Rect {
            x: monitor.x().unwrap_or(0),
            y: monitor.y().unwrap_or(0),
            width: monitor.width().unwrap_or(0),
            height: monitor.height().unwrap_or(0),
        },
        scale_factor: monitor.scale_factor().unwrap_or(1.0),
        is_primary: monitor.is_primary().unwrap_or(false),
    }
}
