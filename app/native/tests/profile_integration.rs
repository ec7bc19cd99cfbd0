//! End-to-end tests for loading a profile and pushing it through the
//! coordinator, using only the public API.
//!
//! The desktop is the in-memory `FakeDesktop` from the `test-util` feature,
//! so these tests run on every platform.

use std::io::Write;

use deskwall_lib::config::{self, AppliedChange};
use deskwall_lib::coordinator::Coordinator;
use deskwall_lib::error::DeskwallError;
use deskwall_lib::service::fake::FakeDesktop;
use deskwall_lib::service::{Color, MonitorRect, ServiceError, WallpaperPosition};
use tempfile::TempDir;

// ============================================================================
// Helpers
// ============================================================================

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.jsonc");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn dual_monitor_desktop() -> FakeDesktop {
    FakeDesktop::with_monitors(&[
        MonitorRect::new(0, 0, 2560, 1440),
        MonitorRect::new(2560, 0, 4480, 1080),
    ])
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_profile_from_file_is_applied() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r##"{
            // Shared background, then the right monitor gets its own image.
            "all": "base.jpg",
            "wallpapers": { "1": "right.jpg" },
            "position": "span",
            "backgroundColor": "#102030",
            "slideshow": { "shuffle": true, "intervalMs": 900000 }
        }"##,
    );
    let (profile, source) = config::load_config_from_path(&path).unwrap();
    let desktop = dual_monitor_desktop();
    let coordinator = Coordinator::new(desktop.factory());

    let applied = config::apply(&coordinator, &profile, dir.path()).unwrap();

    let base = dir.path().join("base.jpg").to_string_lossy().into_owned();
    let right = dir.path().join("right.jpg").to_string_lossy().into_owned();
    assert_eq!(source, path);
    assert_eq!(applied.len(), 5);
    assert_eq!(applied[1], AppliedChange::Monitor { index: 1, path: right.clone() });
    assert_eq!(coordinator.wallpaper_for_monitor(0).unwrap(), base);
    assert_eq!(coordinator.wallpaper_for_monitor(1).unwrap(), right);
    assert_eq!(coordinator.position().unwrap(), WallpaperPosition::Span);
    assert_eq!(coordinator.background_color().unwrap(), Color::from_rgb(0x10, 0x20, 0x30));
    assert!(coordinator.slideshow_options().unwrap().shuffle());
}

#[test]
fn test_profile_for_missing_monitor_is_rejected_without_writes() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, r#"{ "all": "base.jpg", "wallpapers": { "2": "third.jpg" } }"#);
    let (profile, _) = config::load_config_from_path(&path).unwrap();
    let desktop = dual_monitor_desktop();

    let err = config::apply(&Coordinator::new(desktop.factory()), &profile, dir.path()).unwrap_err();

    assert!(matches!(err, DeskwallError::IndexOutOfRange { index: 2, count: 2 }));
    assert!(desktop.mutations().is_empty());
}

#[test]
fn test_monitor_geometry_through_coordinator() {
    let desktop = dual_monitor_desktop();
    let coordinator = Coordinator::new(desktop.factory());

    let monitors = coordinator.monitors().unwrap();

    assert_eq!(monitors.len(), 2);
    assert_eq!((monitors[0].width(), monitors[0].height()), (2560, 1440));
    assert_eq!((coordinator.width(1).unwrap(), coordinator.height(1).unwrap()), (1920, 1080));
    assert_eq!(
        deskwall_lib::ratio::aspect_ratio(monitors[1].width(), monitors[1].height()).unwrap(),
        "16:9"
    );
}

#[test]
fn test_service_errors_reach_the_caller_unchanged() {
    let desktop = dual_monitor_desktop();
    let failure = ServiceError::Call {
        operation: "Enable",
        code: 0x8000_4001,
        message: "not implemented".to_string(),
    };
    desktop.fail_with(failure.clone());
    let coordinator = Coordinator::new(desktop.factory());

    match coordinator.enable(false) {
        Err(DeskwallError::Service(err)) => assert_eq!(err, failure),
        other => panic!("expected service error, got {other:?}"),
    }
}
