//! Build script for the Glance Tauri app.

fn main() {
    tauri_build::build();
}
