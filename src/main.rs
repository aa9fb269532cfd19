// Prevents an extra console window on Windows in release builds.
#![cfg_attr(all(not(debug_assertions), windows), windows_subsystem = "windows")]

fn main() {
    glance_lib::run()
}
