use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::state::ReleasePolicy;

/// Application settings, stored as JSON
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// What to do with a display handle once its image is replaced or cleared
    pub release_policy: ReleasePolicy,
    /// Route name opened on launch (still subject to the image guard)
    pub start_route: String,
    pub theme: ThemeMode,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            release_policy: ReleasePolicy::Retain,
            start_route: "home".to_string(),
            theme: ThemeMode::Dark,
        }
    }
}

impl Config {
    /// Get the path where the settings file should be stored
    ///
    /// - Linux: ~/.config/photo-desk/config.json
    /// - macOS: ~/Library/Application Support/photo-desk/config.json
    /// - Windows: %APPDATA%\photo-desk\config.json
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("photo-desk");
        path.push("config.json");
        Some(path)
    }

    /// Load settings, falling back to defaults on any problem.
    /// A missing file is created with the defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            log::warn!("⚠️  Could not determine config directory, using defaults");
            return Self::default();
        };

        if !path.exists() {
            let config = Self::default();
            if let Err(e) = config.save_to(&path) {
                log::warn!("⚠️  Could not write default settings: {}", e);
            }
            return config;
        }

        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("⚙️  Settings loaded from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("⚠️  Ignoring settings file: {}", e);
                Self::default()
            }
        }
    }

    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write settings to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let io_err = |source: std::io::Error| Error::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(io_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            release_policy: ReleasePolicy::Revoke,
            start_route: "crop".to_string(),
            theme: ThemeMode::Light,
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "release_policy": "revoke" }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.release_policy, ReleasePolicy::Revoke);
        assert_eq!(config.start_route, "home");
        assert_eq!(config.theme, ThemeMode::Dark);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "release_policy = revoke").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
