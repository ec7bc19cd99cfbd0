//! Configuration module for deskwall.
//!
//! The configuration file describes a wallpaper profile that `deskwall apply`
//! pushes to the desktop. It supports JSONC format (JSON with comments).
//! deskwall never writes this file.

mod apply;
pub mod schema;
pub mod template;
pub mod types;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub use apply::{AppliedChange, apply};
pub use types::{
    ConfigError, DeskwallConfig, SlideshowConfig, config_paths, load_config as load_config_default,
    load_config_from_path,
};

/// Custom config path override (set via CLI --config flag).
static CUSTOM_CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// A configuration together with where it came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: DeskwallConfig,
    /// The file the configuration was read from, if any.
    pub path: Option<PathBuf>,
}

impl LoadedConfig {
    /// Directory against which relative wallpaper paths are resolved.
    ///
    /// This is the configuration file's directory, or the current directory
    /// when running on defaults.
    #[must_use]
    pub fn base_dir(&self) -> PathBuf {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default()
    }
}

/// Sets a custom configuration file path to use instead of the default search paths.
///
/// Must be called before [`load`] to take effect. Returns `false` if a path
/// was already set.
pub fn set_custom_config_path(path: PathBuf) -> bool { CUSTOM_CONFIG_PATH.set(path).is_ok() }

/// Returns the custom configuration path, if one was set.
pub fn custom_config_path() -> Option<&'static PathBuf> { CUSTOM_CONFIG_PATH.get() }

/// Loads the configuration.
///
/// Uses the custom path if one was set, otherwise the first existing file in
/// [`config_paths`]. A missing file yields the default (empty) profile.
///
/// # Errors
///
/// Returns an error if a configuration file exists but cannot be read or
/// parsed. A custom path that does not exist is also an error.
pub fn load() -> Result<LoadedConfig, ConfigError> {
    let result = CUSTOM_CONFIG_PATH
        .get()
        .map_or_else(load_config_default, |path| load_config_from_path(path));

    match result {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "configuration loaded");
            Ok(LoadedConfig { config, path: Some(path) })
        }
        Err(ConfigError::NotFound) => {
            tracing::debug!("no configuration file found, using defaults");
            Ok(LoadedConfig::default())
        }
        Err(err) => Err(err),
    }
}
