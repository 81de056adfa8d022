//! User preferences for the CLI.
//!
//! Preferences are stored in `.taquilla/config.yaml` and currently cover the
//! board color theme. The file is created on first save.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaquillaError};

/// Valid theme values for CLI validation
pub const VALID_THEMES: &[&str] = &["light", "dark"];

/// Returns the root taquilla directory path.
///
/// Resolution order:
/// 1. `TAQUILLA_ROOT` environment variable (if set)
/// 2. Current working directory + `.taquilla`
pub fn taquilla_root() -> PathBuf {
    if let Ok(root) = std::env::var("TAQUILLA_ROOT") {
        PathBuf::from(root)
    } else {
        PathBuf::from(".taquilla")
    }
}

/// Board color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

enum_display_fromstr!(
    Theme,
    TaquillaError::InvalidTheme,
    {
        Light => "light",
        Dark => "dark",
    }
);

impl Theme {
    /// The other theme.
    pub fn toggle(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Board color theme (default: light)
    #[serde(default)]
    pub theme: Theme,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        taquilla_root().join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            TaquillaError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        // Ensure .taquilla directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TaquillaError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            TaquillaError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        Ok(())
    }
}
