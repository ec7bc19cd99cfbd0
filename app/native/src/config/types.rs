//! Configuration types for deskwall.
//!
//! This module provides the configuration types and loading functionality.
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::service::{Color, SlideshowFlags, SlideshowOptions, WallpaperPosition};

/// Slideshow settings pushed by `deskwall apply`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SlideshowConfig {
    /// Show images in random order.
    pub shuffle: bool,

    /// Time between images in milliseconds.
    pub interval_ms: u32,
}

impl From<SlideshowConfig> for SlideshowOptions {
    fn from(config: SlideshowConfig) -> Self {
        let flags = if config.shuffle {
            SlideshowFlags::SHUFFLE_IMAGES
        } else {
            SlideshowFlags::empty()
        };
        Self { flags, tick_ms: config.interval_ms }
    }
}

/// Root configuration: a wallpaper profile for the connected monitors.
///
/// Every field is optional; only what is present gets applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DeskwallConfig {
    /// Wallpaper assigned to every monitor before per-monitor entries.
    ///
    /// Supports `~` and paths relative to the configuration file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<String>,

    /// Wallpapers keyed by zero-based monitor index.
    ///
    /// Example: `{ "0": "~/Pictures/left.jpg", "1": "~/Pictures/right.jpg" }`
    pub wallpapers: BTreeMap<String, String>,

    /// How images are laid out: center, tile, stretch, fit, fill or span.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<WallpaperPosition>,

    /// Color shown around images that do not cover the monitor, as `#RRGGBB`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub background_color: Option<Color>,

    /// Slideshow options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slideshow: Option<SlideshowConfig>,
}

impl DeskwallConfig {
    /// Returns the per-monitor entries with parsed indices, in index order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMonitorKey`] if a key is not an integer.
    pub fn monitor_wallpapers(&self) -> Result<Vec<(i64, &str)>, ConfigError> {
        let mut entries = self
            .wallpapers
            .iter()
            .map(|(key, path)| {
                key.trim()
                    .parse::<i64>()
                    .map(|index| (index, path.as_str()))
                    .map_err(|_| ConfigError::InvalidMonitorKey(key.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        entries.sort_by_key(|(index, _)| *index);
        Ok(entries)
    }

    /// Returns `true` if applying this configuration would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_none()
            && self.wallpapers.is_empty()
            && self.position.is_none()
            && self.background_color.is_none()
            && self.slideshow.is_none()
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error("No configuration file found. Expected at ~/.config/deskwall/config.jsonc")]
    NotFound,
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] serde_json::Error),
    /// A `wallpapers` key is not a monitor index.
    #[error("Invalid monitor index '{0}' in wallpapers; keys must be integers like \"0\"")]
    InvalidMonitorKey(String),
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Returns the possible configuration file paths in priority order.
///
/// 1. `$XDG_CONFIG_HOME/deskwall/` if the variable is set
/// 2. `~/.config/deskwall/`
/// 3. the platform config directory (`%APPDATA%\deskwall\` on Windows)
///
/// Each location is checked for `config.jsonc` then `config.json`.
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut dirs_to_check = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        dirs_to_check.push(PathBuf::from(xdg_config).join("deskwall"));
    }

    if let Some(home) = dirs::home_dir() {
        dirs_to_check.push(home.join(".config").join("deskwall"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        dirs_to_check.push(config_dir.join("deskwall"));
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for dir in dirs_to_check {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    paths
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns `ConfigError::IoError` if the file cannot be read and
/// `ConfigError::ParseError` if it is not valid JSONC.
pub fn load_config_from_path(path: &Path) -> Result<(DeskwallConfig, PathBuf), ConfigError> {
    let file = fs::File::open(path)?;
    let reader = json_comments::StripComments::new(file);
    let config: DeskwallConfig = serde_json::from_reader(reader)?;
    Ok((config, path.to_path_buf()))
}

/// Loads the configuration from the first available config file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists, or the
/// error from [`load_config_from_path`] for the first file that does.
pub fn load_config() -> Result<(DeskwallConfig, PathBuf), ConfigError> {
    config_paths()
        .into_iter()
        .find(|path| path.exists())
        .map_or(Err(ConfigError::NotFound), |path| load_config_from_path(&path))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = DeskwallConfig::default();
        assert!(config.is_empty());
        assert!(config.monitor_wallpapers().unwrap().is_empty());
    }

    #[test]
    fn test_config_deserializes_full_profile() {
        let json = r##"{
            "all": "~/Pictures/base.jpg",
            "wallpapers": { "1": "right.png", "0": "left.png" },
            "position": "span",
            "backgroundColor": "#1e1e2e",
            "slideshow": { "shuffle": true, "intervalMs": 60000 }
        }"##;

        let config: DeskwallConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.all.as_deref(), Some("~/Pictures/base.jpg"));
        assert_eq!(config.position, Some(WallpaperPosition::Span));
        assert_eq!(config.background_color, Some(Color::from_rgb(0x1e, 0x1e, 0x2e)));
        assert_eq!(
            config.slideshow,
            Some(SlideshowConfig { shuffle: true, interval_ms: 60000 })
        );
        assert_eq!(config.monitor_wallpapers().unwrap(), vec![
            (0, "left.png"),
            (1, "right.png")
        ]);
        assert!(!config.is_empty());
    }

    #[test]
    fn test_monitor_keys_sort_numerically() {
        let config = DeskwallConfig {
            wallpapers: BTreeMap::from([
                ("10".to_string(), "c".to_string()),
                ("2".to_string(), "b".to_string()),
                ("-1".to_string(), "a".to_string()),
            ]),
            ..Default::default()
        };
        let indices: Vec<i64> =
            config.monitor_wallpapers().unwrap().into_iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![-1, 2, 10]);
    }

    #[test]
    fn test_invalid_monitor_key_is_rejected() {
        let config = DeskwallConfig {
            wallpapers: BTreeMap::from([("left".to_string(), "a.jpg".to_string())]),
            ..Default::default()
        };
        let err = config.monitor_wallpapers().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMonitorKey(ref key) if key == "left"));
        assert!(err.to_string().contains("left"));
    }

    #[test]
    fn test_invalid_color_fails_to_parse() {
        let json = r#"{ "backgroundColor": "blue" }"#;
        assert!(serde_json::from_str::<DeskwallConfig>(json).is_err());
    }

    #[test]
    fn test_slideshow_config_into_options() {
        let options: SlideshowOptions =
            SlideshowConfig { shuffle: true, interval_ms: 1000 }.into();
        assert!(options.shuffle());
        assert_eq!(options.tick_ms, 1000);
    }

    #[test]
    fn test_load_config_from_path_strips_comments() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.jsonc");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "{{").unwrap();
        writeln!(file, "  // primary display").unwrap();
        writeln!(file, r#"  "wallpapers": {{ "0": "a.jpg" }}, /* fit */ "position": "fit""#)
            .unwrap();
        writeln!(file, "}}").unwrap();

        let (config, loaded_from) = load_config_from_path(&path).unwrap();
        assert_eq!(loaded_from, path);
        assert_eq!(config.position, Some(WallpaperPosition::Fit));
        assert_eq!(config.wallpapers.get("0").map(String::as_str), Some("a.jpg"));
    }

    #[test]
    fn test_load_config_from_path_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_config_from_path(&path), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_from_missing_path_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.jsonc");
        assert!(matches!(load_config_from_path(&path), Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_config_paths_have_no_duplicates() {
        let paths = config_paths();
        for (i, path) in paths.iter().enumerate() {
            assert!(!paths[i + 1..].contains(path));
        }
    }
}
