//! Settings persistence — API key in the OS keyring, preferences in a
//! JSON file under the per-user config dir.
//!
//! The key itself never touches the preferences file and never appears
//! in log output.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const KEYRING_SERVICE: &str = "glance";
const KEYRING_ACCOUNT: &str = "gemini-api-key";
const SETTINGS_FILENAME: &str = "settings.json";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub selected_model: String,
    pub include_image_by_default: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            selected_model: DEFAULT_MODEL.to_string(),
            include_image_by_default: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("keyring access failed: {0}")]
    Keyring(String),

    #[error("no config directory on this platform")]
    NoConfigDir,

    #[error("failed to read or write settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read/write access to the stored API key.
pub trait ApiKeyStore: Send + Sync {
    /// The stored key, or `None` when absent or unreadable.
    fn load(&self) -> Option<String>;

    fn save(&self, key: &str) -> Result<(), SettingsError>;
}

/// OS credential store implementation.
pub struct KeyringStore;

impl ApiKeyStore for KeyringStore {
    fn load(&self) -> Option<String> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_ACCOUNT).ok()?;
        match entry.get_password() {
            Ok(key) => Some(key),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                log::error!("[SETTINGS] Keyring read failed: {}", e);
                None
            }
        }
    }

    fn save(&self, key: &str) -> Result<(), SettingsError> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_ACCOUNT)
            .map_err(|e| SettingsError::Keyring(e.to_string()))?;
        entry
            .set_password(key)
            .map_err(|e| SettingsError::Keyring(e.to_string()))?;
        log::info!("[SETTINGS] API key updated");
        Ok(())
    }
}

pub fn settings_path() -> Result<PathBuf, SettingsError> {
    dirs::config_dir()
        .map(|dir| dir.join("glance").join(SETTINGS_FILENAME))
        .ok_or(SettingsError::NoConfigDir)
}

/// Missing file means first run — defaults, not an error.
pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(settings)?)?;
    log::info!("[SETTINGS] Settings updated");
    Ok(())
}

pub fn load_settings() -> Result<Settings, SettingsError> {
    load_settings_from(&settings_path()?)
}

pub fn save_settings(settings: &Settings) -> Result<(), SettingsError> {
    save_settings_to(&settings_path()?, settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.selected_model, DEFAULT_MODEL);
        assert!(settings.include_image_by_default);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = Settings {
            selected_model: "gemini-1.5-pro-latest".to_string(),
            include_image_by_default: false,
        };
        save_settings_to(&path, &settings).unwrap();

        assert_eq!(load_settings_from(&path).unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"selectedModel":"gemini-1.5-pro-latest"}"#).unwrap();

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.selected_model, "gemini-1.5-pro-latest");
        assert!(settings.include_image_by_default);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            load_settings_from(&path),
            Err(SettingsError::Parse(_))
        ));
    }
}
