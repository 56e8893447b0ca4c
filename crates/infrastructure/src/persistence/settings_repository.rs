//! User settings persistence.
//!
//! Stores settings in the platform-specific config directory:
//! - Linux: ~/.config/blockmark/settings.json
//! - macOS: ~/Library/Application Support/blockmark/settings.json
//! - Windows: %APPDATA%/blockmark/settings.json

use std::path::PathBuf;

use blockmark_domain::Settings;
use tokio::fs;

use crate::serialization::{SerializationError, decode_json_bytes, encode_json_bytes};

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Repository for user settings persistence.
#[derive(Debug, Clone, Default)]
pub struct SettingsRepository {
    /// Explicit settings file; `None` means the platform default.
    path: Option<PathBuf>,
}

impl SettingsRepository {
    /// Creates a repository using the platform config directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { path: None }
    }

    /// Creates a repository reading and writing an explicit file.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Returns the default settings path, if a config directory exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("blockmark").join("settings.json"))
    }

    /// Returns the path this repository uses.
    #[must_use]
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(Self::default_path)
    }

    /// Loads settings from disk.
    ///
    /// Returns default settings if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<Settings, SettingsError> {
        let Some(path) = self.settings_path() else {
            return Ok(Settings::default());
        };

        if !fs::try_exists(&path).await? {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        let content = fs::read(&path).await?;
        let settings = decode_json_bytes(&content)?;
        Ok(settings)
    }

    /// Saves settings to disk, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if no config directory is available or writing fails.
    pub async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let path = self.settings_path().ok_or(SettingsError::NoConfigDir)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let content = encode_json_bytes(settings)?;
        fs::write(&path, content).await?;
        Ok(())
    }
}
