//! Persistent key/value storage.
//!
//! Values are stored as JSON files in the platform-appropriate config
//! directory:
//! - Linux: `~/.config/incidentes/`
//! - macOS: `~/Library/Application Support/incidentes/`
//! - Windows: `%APPDATA%\incidentes\`
//!
//! All operations degrade on failure instead of erroring: a failed save
//! returns `false`, a failed or corrupt load reads as absent.

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

/// Default storage directory, created on first use.
pub fn default_dir() -> Option<PathBuf> {
    let app_dir = dirs::config_dir()?.join("incidentes");
    if !app_dir.exists() {
        std::fs::create_dir_all(&app_dir).ok()?;
    }
    Some(app_dir)
}

fn file_path(dir: &Path, key: &str) -> PathBuf {
    // Sanitize key to be a valid filename
    let safe_key = key.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_");
    dir.join(format!("{}.json", safe_key))
}

/// Save a value under `key` in `dir`.
///
/// Returns `true` if the operation succeeded.
pub fn save<T: Serialize>(dir: &Path, key: &str, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => std::fs::write(file_path(dir, key), json).is_ok(),
        Err(_) => false,
    }
}

/// Load the value stored under `key` in `dir`.
///
/// Returns `None` if the key doesn't exist or deserialization fails.
pub fn load<T: DeserializeOwned>(dir: &Path, key: &str) -> Option<T> {
    let json = std::fs::read_to_string(file_path(dir, key)).ok()?;
    serde_json::from_str(&json).ok()
}

/// Remove the value stored under `key` in `dir`.
pub fn remove(dir: &Path, key: &str) {
    let _ = std::fs::remove_file(file_path(dir, key));
}
