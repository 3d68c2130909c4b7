//! Network subsystem settings.
//!
//! Defaults are persisted to a per-user config file. Environment variables
//! override any stored values so managed hosts can pin them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::network::DEFAULT_PROJECT;

const ENV_DEFAULT_PROJECT: &str = "NETDRIVERS_DEFAULT_PROJECT";
const ENV_DISABLED_DRIVERS: &str = "NETDRIVERS_DISABLED_DRIVERS";
const ENV_DATABASE_URL: &str = "NETDRIVERS_DATABASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    /// Project used when validating networks that have no record yet
    pub default_project: String,
    /// Built-in drivers left out of the registry
    pub disabled_drivers: Vec<String>,
    /// SQLite URL of the network store, if one is used
    pub database_url: Option<String>,
}

fn env_string_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn app_directory() -> PathBuf {
    if cfg!(windows) {
        let appdata = std::env::var_os("APPDATA")
            .unwrap_or_else(|| std::env::var_os("USERPROFILE").unwrap_or_default());
        let mut path = PathBuf::from(appdata);
        path.push("netdrivers");
        path
    } else {
        let home = std::env::var_os("HOME").unwrap_or_default();
        let mut path = PathBuf::from(home);
        path.push(".netdrivers");
        path
    }
}

fn config_path() -> PathBuf {
    app_directory().join("config.json")
}

fn load_from_file(path: &Path) -> Option<NetworkSettings> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!(path = %path.display(), "ignoring unreadable settings file: {}", e);
            None
        }
    }
}

impl NetworkSettings {
    fn apply_env_overrides(&mut self) {
        if let Some(project) = env_string_opt(ENV_DEFAULT_PROJECT) {
            self.default_project = project;
        }
        if let Some(drivers) = env_string_opt(ENV_DISABLED_DRIVERS) {
            self.disabled_drivers = drivers
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(url) = env_string_opt(ENV_DATABASE_URL) {
            self.database_url = Some(url);
        }
    }

    /// Reads the per-user settings file and applies env overrides
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let mut settings = load_from_file(path).unwrap_or_default();
        settings.apply_env_overrides();
        settings
    }

    pub fn save_to_file(&self) -> Result<(), String> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let payload =
            serde_json::to_string_pretty(self).map_err(|e| format!("Save failed: {}", e))?;
        fs::write(path, payload).map_err(|e| format!("Save failed: {}", e))?;
        Ok(())
    }

    pub fn is_driver_disabled(&self, driver_type: &str) -> bool {
        self.disabled_drivers.iter().any(|d| d == driver_type)
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            default_project: DEFAULT_PROJECT.to_string(),
            disabled_drivers: Vec::new(),
            database_url: None,
        }
    }
}
