//! Pushes a configuration profile to the desktop.

use std::path::Path;

use serde::Serialize;

use super::DeskwallConfig;
use crate::coordinator::Coordinator;
use crate::error::DeskwallError;
use crate::platform::path::wallpaper_path;
use crate::service::ServiceFactory;

/// One change made while applying a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "setting", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AppliedChange {
    AllMonitors { path: String },
    Monitor { index: i64, path: String },
    Position { value: String },
    BackgroundColor { value: String },
    Slideshow { shuffle: bool, interval_ms: u32 },
}

/// Applies `config` in a fixed order: shared wallpaper, per-monitor
/// wallpapers, position, background color, slideshow.
///
/// Relative wallpaper paths are resolved against `base_dir`. Monitor keys
/// are parsed and checked against the connected monitor count before
/// anything is changed; afterwards the first failure stops the run and is
/// returned.
///
/// # Errors
///
/// Returns a configuration error for malformed monitor keys, the range
/// error for an index that is not connected, or the service error.
pub fn apply<F: ServiceFactory>(
    coordinator: &Coordinator<F>,
    config: &DeskwallConfig,
    base_dir: &Path,
) -> Result<Vec<AppliedChange>, DeskwallError> {
    let monitors = config.monitor_wallpapers()?;

    if !monitors.is_empty() {
        let count = coordinator.count_monitors()?;
        if let Some(&(index, _)) =
            monitors.iter().find(|(index, _)| u32::try_from(*index).map_or(true, |i| i >= count))
        {
            tracing::warn!(index, count, "profile names a monitor that is not connected");
            return Err(DeskwallError::IndexOutOfRange { index, count });
        }
    }

    let mut applied = Vec::new();

    if let Some(all) = &config.all {
        let path = wallpaper_path(all, base_dir);
        coordinator.set_wallpaper_for_all(&path)?;
        applied.push(AppliedChange::AllMonitors { path });
    }

    for (index, entry) in monitors {
        let path = wallpaper_path(entry, base_dir);
        coordinator.set_wallpaper_for_monitor(index, &path)?;
        applied.push(AppliedChange::Monitor { index, path });
    }

    if let Some(position) = config.position {
        coordinator.set_position(position)?;
        applied.push(AppliedChange::Position { value: position.to_string() });
    }

    if let Some(color) = config.background_color {
        coordinator.set_background_color(color)?;
        applied.push(AppliedChange::BackgroundColor { value: color.to_string() });
    }

    if let Some(slideshow) = config.slideshow {
        coordinator.set_slideshow_options(slideshow.into())?;
        applied.push(AppliedChange::Slideshow {
            shuffle: slideshow.shuffle,
            interval_ms: slideshow.interval_ms,
        });
    }

    tracing::info!(changes = applied.len(), "configuration applied");
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::config::SlideshowConfig;
    use crate::service::fake::FakeDesktop;
    use crate::service::{Color, MonitorRect, WallpaperPosition};

    fn two_monitors() -> FakeDesktop {
        FakeDesktop::with_monitors(&[
            MonitorRect::new(0, 0, 1920, 1080),
            MonitorRect::new(1920, 0, 4480, 1440),
        ])
    }

    #[test]
    fn test_empty_config_changes_nothing() {
        let desktop = two_monitors();
        let coordinator = Coordinator::new(desktop.factory());

        let applied = apply(&coordinator, &DeskwallConfig::default(), Path::new("/")).unwrap();

        assert!(applied.is_empty());
        assert!(desktop.mutations().is_empty());
    }

    #[test]
    fn test_full_profile_is_applied_in_order() {
        let desktop = two_monitors();
        let coordinator = Coordinator::new(desktop.factory());
        let base = std::env::temp_dir();
        let config = DeskwallConfig {
            all: Some("base.jpg".to_string()),
            wallpapers: BTreeMap::from([("1".to_string(), "right.jpg".to_string())]),
            position: Some(WallpaperPosition::Fit),
            background_color: Some(Color::from_rgb(0, 0, 0)),
            slideshow: Some(SlideshowConfig { shuffle: true, interval_ms: 5000 }),
        };

        let applied = apply(&coordinator, &config, &base).unwrap();

        let base_path = base.join("base.jpg").to_string_lossy().into_owned();
        let right_path = base.join("right.jpg").to_string_lossy().into_owned();
        assert_eq!(applied, vec![
            AppliedChange::AllMonitors { path: base_path.clone() },
            AppliedChange::Monitor { index: 1, path: right_path.clone() },
            AppliedChange::Position { value: "fit".to_string() },
            AppliedChange::BackgroundColor { value: "#000000".to_string() },
            AppliedChange::Slideshow { shuffle: true, interval_ms: 5000 },
        ]);
        assert_eq!(coordinator.wallpaper_for_monitor(0).unwrap(), base_path);
        assert_eq!(coordinator.wallpaper_for_monitor(1).unwrap(), right_path);
        assert_eq!(desktop.mutations().len(), 5);
    }

    #[test]
    fn test_bad_monitor_key_aborts_before_any_change() {
        let desktop = two_monitors();
        let coordinator = Coordinator::new(desktop.factory());
        let config = DeskwallConfig {
            all: Some("base.jpg".to_string()),
            wallpapers: BTreeMap::from([("primary".to_string(), "a.jpg".to_string())]),
            ..Default::default()
        };

        let err = apply(&coordinator, &config, Path::new("/")).unwrap_err();

        assert!(matches!(err, DeskwallError::ConfigError(_)));
        assert!(desktop.mutations().is_empty());
    }

    #[test]
    fn test_disconnected_monitor_stops_the_run() {
        let desktop = two_monitors();
        let coordinator = Coordinator::new(desktop.factory());
        let config = DeskwallConfig {
            wallpapers: BTreeMap::from([("5".to_string(), "a.jpg".to_string())]),
            position: Some(WallpaperPosition::Tile),
            ..Default::default()
        };

        let err = apply(&coordinator, &config, Path::new("/")).unwrap_err();

        assert!(matches!(err, DeskwallError::IndexOutOfRange { index: 5, count: 2 }));
        assert!(desktop.mutations().is_empty());
    }

    #[test]
    fn test_disconnected_monitor_blocks_shared_wallpaper() {
        let desktop = two_monitors();
        let coordinator = Coordinator::new(desktop.factory());
        let config = DeskwallConfig {
            all: Some("base.jpg".to_string()),
            wallpapers: BTreeMap::from([
                ("0".to_string(), "left.jpg".to_string()),
                ("5".to_string(), "a.jpg".to_string()),
            ]),
            ..Default::default()
        };

        let err = apply(&coordinator, &config, Path::new("/")).unwrap_err();

        assert!(matches!(err, DeskwallError::IndexOutOfRange { index: 5, count: 2 }));
        assert!(desktop.mutations().is_empty());
        assert_eq!(coordinator.wallpaper_for_monitor(0).unwrap(), "");
    }

    #[test]
    fn test_negative_monitor_key_blocks_shared_wallpaper() {
        let desktop = two_monitors();
        let coordinator = Coordinator::new(desktop.factory());
        let config = DeskwallConfig {
            all: Some("base.jpg".to_string()),
            wallpapers: BTreeMap::from([("-1".to_string(), "a.jpg".to_string())]),
            ..Default::default()
        };

        let err = apply(&coordinator, &config, Path::new("/")).unwrap_err();

        assert!(matches!(err, DeskwallError::IndexOutOfRange { index: -1, count: 2 }));
        assert!(desktop.mutations().is_empty());
    }
}
