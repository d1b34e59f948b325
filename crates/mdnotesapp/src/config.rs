//! # Configuration
//!
//! mdnotes configuration is managed by [`confique`], which layers values from
//! environment variables, a TOML file, and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `MDNOTES_AUTOSAVE_DELAY_MS`, `MDNOTES_DATA_DIR`, etc.
//! 2. **Config file**: `mdnotes.toml` in the OS config directory (via `directories`),
//!    or an explicit path. A missing file is not an error.
//! 3. **Compiled Defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `autosave_delay_ms` | `2000` | Quiet period before buffered edits are saved |
//! | `auto_version_interval_secs` | `300` | Minimum age of the newest version before an auto-save snapshots again |
//! | `version_keep_count` | `20` | Versions kept per document when pruning |
//! | `default_theme` | `light` | Theme used until a preference is saved |
//! | `data_dir` | OS data dir | Where the file store keeps its keys |
//!
//! `load` rejects an autosave delay above one day or an auto-version interval
//! above one year with [`NotesError::Config`].

use crate::commands::versions::{DEFAULT_AUTO_VERSION_INTERVAL_SECS, DEFAULT_KEEP_COUNT};
use crate::error::{NotesError, Result};
use crate::theme::ThemeName;
use chrono::Duration;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "mdnotes.toml";

/// One day.
pub const MAX_AUTOSAVE_DELAY_MS: u64 = 24 * 60 * 60 * 1000;
/// One year.
pub const MAX_AUTO_VERSION_INTERVAL_SECS: u64 = 365 * 24 * 60 * 60;

/// Configuration for mdnotes, stored in `mdnotes.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NotesConfig {
    /// Milliseconds of quiet before buffered edits are persisted.
    #[config(default = 2000, env = "MDNOTES_AUTOSAVE_DELAY_MS")]
    pub autosave_delay_ms: u64,

    #[config(default = 300, env = "MDNOTES_AUTO_VERSION_INTERVAL_SECS")]
    pub auto_version_interval_secs: u64,

    #[config(default = 20, env = "MDNOTES_VERSION_KEEP_COUNT")]
    pub version_keep_count: usize,

    /// "light" or "dark".
    #[config(default = "light", env = "MDNOTES_DEFAULT_THEME")]
    pub default_theme: String,

    /// Overrides the platform data directory.
    #[config(env = "MDNOTES_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            autosave_delay_ms: 2000,
            auto_version_interval_secs: DEFAULT_AUTO_VERSION_INTERVAL_SECS,
            version_keep_count: DEFAULT_KEEP_COUNT,
            default_theme: ThemeName::Light.to_string(),
            data_dir: None,
        }
    }
}

impl NotesConfig {
    /// Loads environment overrides on top of `path` (when given) and the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = NotesConfig::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        let config = builder
            .load()
            .map_err(|e| NotesError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects durations that cannot be added to a timestamp.
    pub fn validate(&self) -> Result<()> {
        if self.autosave_delay_ms > MAX_AUTOSAVE_DELAY_MS {
            return Err(NotesError::Config(format!(
                "autosave_delay_ms must be at most {}, got {}",
                MAX_AUTOSAVE_DELAY_MS, self.autosave_delay_ms
            )));
        }
        if self.auto_version_interval_secs > MAX_AUTO_VERSION_INTERVAL_SECS {
            return Err(NotesError::Config(format!(
                "auto_version_interval_secs must be at most {}, got {}",
                MAX_AUTO_VERSION_INTERVAL_SECS, self.auto_version_interval_secs
            )));
        }
        Ok(())
    }

    pub fn default_theme(&self) -> Result<ThemeName> {
        self.default_theme.parse()
    }

    /// Clamped to [`MAX_AUTOSAVE_DELAY_MS`] for configs built without `load`.
    pub fn autosave_delay(&self) -> Duration {
        let ms = self.autosave_delay_ms.min(MAX_AUTOSAVE_DELAY_MS) as i64;
        Duration::try_milliseconds(ms).unwrap_or(Duration::MAX)
    }

    /// Clamped to [`MAX_AUTO_VERSION_INTERVAL_SECS`] for configs built without `load`.
    pub fn auto_version_interval(&self) -> Duration {
        let secs = self
            .auto_version_interval_secs
            .min(MAX_AUTO_VERSION_INTERVAL_SECS) as i64;
        Duration::try_seconds(secs).unwrap_or(Duration::MAX)
    }

    /// The configured data directory, or the platform default.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "mdnotes")
        .ok_or_else(|| NotesError::Config("could not determine home directory".to_string()))
}

pub fn default_data_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
}
