//! Pure display-selection logic — functional core.
//!
//! Zero infrastructure dependencies: geometry in, chosen display out.
//! The xcap-facing side lives in screenshot.rs.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Screen-space bounding box, in the same coordinate space the OS
/// reports display bounds in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn origin(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width as i32
            && point.y >= self.y
            && point.y < self.y + self.height as i32
    }
}

/// One physical display as reported by the OS.
///
/// `id` is kept as a string: display identifiers are numeric on some
/// platforms and opaque strings on others, and matching is always done
/// by string comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayInfo {
    pub id: String,
    pub bounds: Rect,
    pub scale_factor: f32,
    pub is_primary: bool,
}

/// Select the display whose bounds contain the reference rectangle's
/// origin. Falls back to the primary display, then to the first one,
/// if the origin is off every display (e.g. the strip was dragged onto
/// a monitor that has since been unplugged).
pub fn pick_display<'a>(displays: &'a [DisplayInfo], reference: &Rect) -> Option<&'a DisplayInfo> {
    displays
        .iter()
        .find(|display| display.bounds.contains(reference.origin()))
        .or_else(|| displays.iter().find(|display| display.is_primary))
        .or_else(|| displays.first())
}

/// Capture resolution for a display: logical size multiplied by the
/// scale factor, so high-density displays come out crisp.
pub fn scaled_size(display: &DisplayInfo) -> (u32, u32) {
    let width = (display.bounds.width as f32 * display.scale_factor).round() as u32;
    let height = (display.bounds.height as f32 * display.scale_factor).round() as u32;
    (width, height)
}
