// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, loading and saving tuning
//! values to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[notifications]` - Auto-dismiss duration, stack depth, exit grace, tick rate
//! - `[popover]` - Edge spacing and recompute scheduling
//!
//! Every field is optional. Missing fields fall back to [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use iced_notify::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.notifications.default_duration_ms = Some(8000);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Warning returned when an existing config file cannot be read.
pub const CONFIG_LOAD_WARNING: &str = "Settings file could not be read, defaults are in use";

// =============================================================================
// Section Structs
// =============================================================================

/// Notification stack settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationConfig {
    /// Auto-dismiss duration applied when a notification does not set one.
    #[serde(
        default = "default_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_duration_ms: Option<u64>,

    /// How many records stay visible while the stack is collapsed.
    #[serde(default = "default_max_visible", skip_serializing_if = "Option::is_none")]
    pub max_visible: Option<usize>,

    /// Grace window between dismissal and removal.
    #[serde(default = "default_exit_grace_ms", skip_serializing_if = "Option::is_none")]
    pub exit_grace_ms: Option<u64>,

    /// Countdown tick granularity.
    #[serde(default = "default_tick_ms", skip_serializing_if = "Option::is_none")]
    pub tick_ms: Option<u64>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: default_duration_ms(),
            max_visible: default_max_visible(),
            exit_grace_ms: default_exit_grace_ms(),
            tick_ms: default_tick_ms(),
        }
    }
}

/// Popover positioning settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopoverConfig {
    /// Trigger gap and viewport edge margin, in logical pixels.
    #[serde(default = "default_spacing", skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f32>,

    #[serde(
        default = "default_resize_debounce_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub resize_debounce_ms: Option<u64>,

    #[serde(
        default = "default_scroll_throttle_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub scroll_throttle_ms: Option<u64>,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            spacing: default_spacing(),
            resize_debounce_ms: default_resize_debounce_ms(),
            scroll_throttle_ms: default_scroll_throttle_ms(),
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub popover: PopoverConfig,
}

// =============================================================================
// Serde Default Helpers
// =============================================================================

#[allow(clippy::unnecessary_wraps)]
fn default_duration_ms() -> Option<u64> {
    Some(DEFAULT_NOTIFICATION_DURATION_MS)
}

#[allow(clippy::unnecessary_wraps)]
fn default_max_visible() -> Option<usize> {
    Some(DEFAULT_MAX_VISIBLE)
}

#[allow(clippy::unnecessary_wraps)]
fn default_exit_grace_ms() -> Option<u64> {
    Some(DEFAULT_EXIT_GRACE_MS)
}

#[allow(clippy::unnecessary_wraps)]
fn default_tick_ms() -> Option<u64> {
    Some(DEFAULT_TICK_MS)
}

#[allow(clippy::unnecessary_wraps)]
fn default_spacing() -> Option<f32> {
    Some(DEFAULT_POPOVER_SPACING)
}

#[allow(clippy::unnecessary_wraps)]
fn default_resize_debounce_ms() -> Option<u64> {
    Some(DEFAULT_RESIZE_DEBOUNCE_MS)
}

#[allow(clippy::unnecessary_wraps)]
fn default_scroll_throttle_ms() -> Option<u64> {
    Some(DEFAULT_SCROLL_THROTTLE_MS)
}

// =============================================================================
// Load / Save
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (Config::default(), Some(CONFIG_LOAD_WARNING.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration into a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let mut config = Config::default();
        config.notifications.default_duration_ms = Some(8000);
        config.notifications.max_visible = Some(5);
        config.popover.spacing = Some(12.0);

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        assert!(matches!(load_from_path(&config_path), Err(Error::Config(_))));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[notifications]\nmax_visible = 4\n")
            .expect("failed to write partial toml");

        let loaded = load_from_path(&config_path).expect("partial config should load");
        assert_eq!(loaded.notifications.max_visible, Some(4));
        assert_eq!(
            loaded.notifications.default_duration_ms,
            Some(DEFAULT_NOTIFICATION_DURATION_MS)
        );
        assert_eq!(loaded.popover, PopoverConfig::default());
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[[[").expect("failed to write file");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some(CONFIG_LOAD_WARNING));
    }

    #[test]
    fn save_with_override_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let nested = temp_dir.path().join("deep").join("path");

        save_with_override(&Config::default(), Some(nested.clone()))
            .expect("save should create directories");
        assert!(nested.join(CONFIG_FILE).exists());
    }
}
