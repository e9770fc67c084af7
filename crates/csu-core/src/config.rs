use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::checksum::BUF_SIZE;

/// Progress spinner parameters (optional `[progress]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Show the spinner when stdout is a terminal.
    pub enabled: bool,
    /// Milliseconds between animation frames.
    pub tick_millis: u64,
    /// Number of cells inside the brackets.
    pub bar_width: usize,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_millis: 120,
            bar_width: 10,
        }
    }
}

/// Global configuration loaded from `~/.config/checksum-utils/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsuConfig {
    /// Sort directory entries by name while walking, for reproducible order.
    /// When false, entries are processed in filesystem enumeration order.
    pub sort_entries: bool,
    /// Read buffer size in bytes used when hashing.
    pub read_buffer_bytes: usize,
    pub progress: ProgressConfig,
}

impl Default for CsuConfig {
    fn default() -> Self {
        Self {
            sort_entries: true,
            read_buffer_bytes: BUF_SIZE,
            progress: ProgressConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("checksum-utils")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CsuConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CsuConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)
            .with_context(|| format!("failed to write default config {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Parse the config file at `path`.
pub fn load_from_path(path: &Path) -> Result<CsuConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: CsuConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
