// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! The zoom enablement limits live here so every consumer (viewport, shell)
//! reads the same values; `viewer::viewport` re-exports them.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "PhotoLens";

/// Zoom factor beyond which zoom-in is disabled. The stored factor itself is
/// unbounded; this only gates command availability.
pub const DEFAULT_MAX_ZOOM: f64 = 3.0;

/// Zoom factor below which zoom-out is disabled.
pub const DEFAULT_MIN_ZOOM: f64 = 0.333;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fit_to_window: Option<bool>,
    #[serde(default)]
    pub max_zoom: Option<f64>,
    #[serde(default)]
    pub min_zoom: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fit_to_window: Some(false),
            max_zoom: Some(DEFAULT_MAX_ZOOM),
            min_zoom: Some(DEFAULT_MIN_ZOOM),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|e| crate::error::Error::Config(e.to_string()))?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| crate::error::Error::Config(e.to_string()))?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content).map_err(|e| crate::error::Error::Config(e.to_string()))?;
    Ok(())
}
