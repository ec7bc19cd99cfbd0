//! Per-monitor CLI commands.

use colored::Colorize;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::coordinator::{Coordinator, MonitorInfo};
use crate::error::DeskwallError;
use crate::platform::path::wallpaper_path;
use crate::ratio::aspect_ratio;
use crate::service::ServiceFactory;

/// Longest path shown in a table cell before it is shortened from the left.
const MAX_PATH_CHARS: usize = 48;

#[derive(Tabled)]
struct MonitorRow {
    #[tabled(rename = "#")]
    index: u32,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Resolution")]
    resolution: String,
    #[tabled(rename = "Origin")]
    origin: String,
    #[tabled(rename = "Ratio")]
    ratio: String,
    #[tabled(rename = "Wallpaper")]
    wallpaper: String,
}

impl From<&MonitorInfo> for MonitorRow {
    fn from(info: &MonitorInfo) -> Self {
        Self {
            index: info.index,
            device: output::truncate_start(info.id.as_str(), MAX_PATH_CHARS),
            resolution: format!("{}x{}", info.width(), info.height()),
            origin: format!("{}, {}", info.rect.left, info.rect.top),
            ratio: aspect_ratio(info.width(), info.height()).unwrap_or_else(|_| "-".to_string()),
            wallpaper: if info.wallpaper.is_empty() {
                "-".to_string()
            } else {
                output::truncate_start(&info.wallpaper, MAX_PATH_CHARS)
            },
        }
    }
}

/// JSON shape of a monitor size query.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MonitorSize {
    index: i64,
    width: u32,
    height: u32,
    aspect_ratio: Option<String>,
}

/// `deskwall monitors`
pub fn list<F: ServiceFactory>(
    coordinator: &Coordinator<F>,
    json: bool,
) -> Result<(), DeskwallError> {
    let monitors = coordinator.monitors()?;

    if json {
        return output::print_json(&monitors);
    }

    if monitors.is_empty() {
        println!("{}", "No monitors detected.".dimmed());
        return Ok(());
    }

    let rows: Vec<MonitorRow> = monitors.iter().map(MonitorRow::from).collect();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()))
        .with(Modify::new(Columns::new(2..5)).with(Alignment::right()))
        .to_string();

    println!("{}", format!("Monitors ({})", monitors.len()).bold());
    println!("{table}");
    Ok(())
}

/// `deskwall count`
pub fn count<F: ServiceFactory>(
    coordinator: &Coordinator<F>,
    json: bool,
) -> Result<(), DeskwallError> {
    let count = coordinator.count_monitors()?;

    if json {
        output::print_json(&serde_json::json!({ "count": count }))
    } else {
        println!("{count}");
        Ok(())
    }
}

/// `deskwall set`
///
/// `monitor` of `None` means every monitor.
pub fn set<F: ServiceFactory>(
    coordinator: &Coordinator<F>,
    path: &str,
    monitor: Option<i64>,
    json: bool,
) -> Result<(), DeskwallError> {
    let cwd = std::env::current_dir()?;
    let path = wallpaper_path(path, &cwd);

    if path.is_empty() {
        return Err(DeskwallError::InvalidArguments("Wallpaper path is empty".to_string()));
    }

    match monitor {
        Some(index) => coordinator.set_wallpaper_for_monitor(index, &path)?,
        None => coordinator.set_wallpaper_for_all(&path)?,
    }

    if json {
        return output::print_json(&serde_json::json!({ "monitor": monitor, "path": path }));
    }

    match monitor {
        Some(index) => println!("{} monitor {index}: {path}", "Wallpaper set on".green()),
        None => println!("{} every monitor: {path}", "Wallpaper set on".green()),
    }
    Ok(())
}

/// `deskwall get`
pub fn get<F: ServiceFactory>(
    coordinator: &Coordinator<F>,
    index: i64,
    json: bool,
) -> Result<(), DeskwallError> {
    let path = coordinator.wallpaper_for_monitor(index)?;

    if json {
        output::print_json(&serde_json::json!({ "monitor": index, "path": path }))
    } else {
        println!("{path}");
        Ok(())
    }
}

/// `deskwall size`
pub fn size<F: ServiceFactory>(
    coordinator: &Coordinator<F>,
    index: i64,
    json: bool,
) -> Result<(), DeskwallError> {
    let rect = coordinator.rect(index)?;
    let (width, height) = (rect.width(), rect.height());
    let size = MonitorSize { index, width, height, aspect_ratio: aspect_ratio(width, height).ok() };

    if json {
        return output::print_json(&size);
    }

    match size.aspect_ratio {
        Some(ratio) => println!("{width}x{height} ({ratio})"),
        None => println!("{width}x{height}"),
    }
    Ok(())
}

/// `deskwall ratio`
pub fn ratio(width: u32, height: u32, json: bool) -> Result<(), DeskwallError> {
    let ratio = aspect_ratio(width, height)?;

    if json {
        output::print_json(&serde_json::json!({ "ratio": ratio }))
    } else {
        println!("{ratio}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fake::FakeDesktop;
    use crate::service::{MonitorId, MonitorRect};

    fn info(wallpaper: &str) -> MonitorInfo {
        MonitorInfo {
            index: 1,
            id: MonitorId::new(r"\\?\DISPLAY#DEL4321#5&1a2b3c&0&UID4353#{e6f07b5f-ee97-4a90-b076-33f57bf4eaa7}"),
            rect: MonitorRect::new(-2560, 0, 0, 1440),
            wallpaper: wallpaper.to_string(),
        }
    }

    #[test]
    fn test_monitor_row_formats_geometry() {
        let row = MonitorRow::from(&info(r"C:\walls\forest.jpg"));

        assert_eq!(row.index, 1);
        assert_eq!(row.resolution, "2560x1440");
        assert_eq!(row.origin, "-2560, 0");
        assert_eq!(row.ratio, "16:9");
        assert_eq!(row.wallpaper, r"C:\walls\forest.jpg");
        assert!(row.device.starts_with('…'));
        assert_eq!(row.device.chars().count(), MAX_PATH_CHARS);
    }

    #[test]
    fn test_monitor_row_without_wallpaper() {
        assert_eq!(MonitorRow::from(&info("")).wallpaper, "-");
    }

    #[test]
    fn test_monitor_row_degenerate_rect() {
        let mut monitor = info("");
        monitor.rect = MonitorRect::new(0, 0, 0, 1080);
        assert_eq!(MonitorRow::from(&monitor).ratio, "-");
    }

    #[test]
    fn test_set_all_resolves_relative_path() {
        let desktop = FakeDesktop::with_monitors(&[
            MonitorRect::new(0, 0, 1920, 1080),
            MonitorRect::new(1920, 0, 3840, 1080),
        ]);
        let coordinator = Coordinator::new(desktop.factory());

        set(&coordinator, "forest.jpg", None, true).unwrap();

        let expected = std::env::current_dir().unwrap().join("forest.jpg");
        let expected = expected.to_string_lossy();
        assert_eq!(coordinator.wallpaper_for_monitor(0).unwrap(), expected);
        assert_eq!(coordinator.wallpaper_for_monitor(1).unwrap(), expected);
    }

    #[test]
    fn test_set_rejects_empty_path() {
        let desktop = FakeDesktop::with_monitors(&[MonitorRect::new(0, 0, 1920, 1080)]);
        let coordinator = Coordinator::new(desktop.factory());

        let err = set(&coordinator, "  ", Some(0), false).unwrap_err();

        assert!(matches!(err, DeskwallError::InvalidArguments(_)));
        assert!(desktop.mutations().is_empty());
    }

    #[test]
    fn test_list_and_size_on_fake_desktop() {
        let desktop = FakeDesktop::with_monitors(&[MonitorRect::new(0, 0, 3440, 1440)]);
        let coordinator = Coordinator::new(desktop.factory());

        list(&coordinator, false).unwrap();
        list(&coordinator, true).unwrap();
        size(&coordinator, 0, false).unwrap();
        assert!(matches!(
            size(&coordinator, 1, true),
            Err(DeskwallError::IndexOutOfRange { index: 1, count: 1 })
        ));
    }
}
