//! In-memory wallpaper service used by unit and integration tests.
//!
//! Compiled for `cargo test` and behind the `test-util` feature.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::{
    Color, DesktopWallpaper, MonitorId, MonitorRect, ServiceError, SlideshowDirection,
    SlideshowOptions, SlideshowStatus, WallpaperPosition,
};

#[derive(Debug, Default)]
struct State {
    monitors: Vec<(MonitorId, MonitorRect)>,
    wallpapers: HashMap<MonitorId, String>,
    detached: HashSet<MonitorId>,
    color: Color,
    position: WallpaperPosition,
    slideshow: SlideshowOptions,
    status: SlideshowStatus,
    enabled: bool,
    mutations: Vec<String>,
    connections: usize,
    fail_with: Option<ServiceError>,
}

/// Shared handle to an in-memory desktop.
///
/// Clones share state, so a test can keep one handle for inspection while
/// the coordinator connects through [`FakeDesktop::factory`].
#[derive(Debug, Clone, Default)]
pub struct FakeDesktop {
    state: Rc<RefCell<State>>,
}

impl FakeDesktop {
    /// Creates a desktop with one monitor per rectangle.
    pub fn with_monitors(rects: &[MonitorRect]) -> Self {
        let desktop = Self::default();
        desktop.state.borrow_mut().monitors = rects
            .iter()
            .enumerate()
            .map(|(i, rect)| (MonitorId::new(format!(r"\\?\DISPLAY#FAKE{i}#")), *rect))
            .collect();
        desktop
    }

    /// Returns a factory that hands out connections to this desktop.
    pub fn factory(&self) -> impl Fn() -> Result<Box<dyn DesktopWallpaper>, ServiceError> + use<> {
        let desktop = self.clone();
        move || {
            desktop.state.borrow_mut().connections += 1;
            Ok(Box::new(desktop.clone()) as Box<dyn DesktopWallpaper>)
        }
    }

    /// Makes every subsequent call fail with `error`.
    pub fn fail_with(&self, error: ServiceError) { self.state.borrow_mut().fail_with = Some(error); }

    /// Simulates a monitor being unplugged.
    pub fn unplug_last(&self) { self.state.borrow_mut().monitors.pop(); }

    /// Keeps the monitor at `index` in the device path list but makes its
    /// rectangle unreadable, like a remembered display that is unplugged.
    pub fn detach(&self, index: usize) {
        let id = self.monitor_id(index);
        self.state.borrow_mut().detached.insert(id);
    }

    pub fn mutations(&self) -> Vec<String> { self.state.borrow().mutations.clone() }

    pub fn connections(&self) -> usize { self.state.borrow().connections }

    pub fn enabled(&self) -> bool { self.state.borrow().enabled }

    pub fn set_status(&self, status: SlideshowStatus) { self.state.borrow_mut().status = status; }

    pub fn monitor_id(&self, index: usize) -> MonitorId {
        self.state.borrow().monitors[index].0.clone()
    }

    fn check(&self) -> Result<(), ServiceError> {
        self.state.borrow().fail_with.clone().map_or(Ok(()), Err)
    }

    fn record(&self, call: String) -> Result<(), ServiceError> {
        self.check()?;
        self.state.borrow_mut().mutations.push(call);
        Ok(())
    }

    fn lookup(&self, monitor: &MonitorId) -> Result<MonitorRect, ServiceError> {
        if self.state.borrow().detached.contains(monitor) {
            return Err(ServiceError::Call {
                operation: "GetMonitorRECT",
                code: 0x8000_4005,
                message: format!("monitor {monitor} is not attached"),
            });
        }

        self.state
            .borrow()
            .monitors
            .iter()
            .find(|(id, _)| id == monitor)
            .map(|(_, rect)| *rect)
            .ok_or_else(|| ServiceError::Call {
                operation: "GetMonitorRECT",
                code: 0x8007_0057,
                message: format!("unknown monitor {monitor}"),
            })
    }
}

impl DesktopWallpaper for FakeDesktop {
    fn set_wallpaper(&self, monitor: Option<&MonitorId>, path: &str) -> Result<(), ServiceError> {
        let target = monitor.map_or_else(|| "*".to_string(), ToString::to_string);
        self.record(format!("set_wallpaper {target} {path}"))?;

        let mut state = self.state.borrow_mut();
        let ids: Vec<MonitorId> = match monitor {
            Some(id) => vec![id.clone()],
            None => state.monitors.iter().map(|(id, _)| id.clone()).collect(),
        };
        for id in ids {
            state.wallpapers.insert(id, path.to_string());
        }
        drop(state);
        Ok(())
    }

    fn wallpaper(&self, monitor: Option<&MonitorId>) -> Result<String, ServiceError> {
        self.check()?;
        let state = self.state.borrow();
        let wallpaper = match monitor {
            Some(id) => state.wallpapers.get(id).cloned().unwrap_or_default(),
            None => {
                let mut values = state.monitors.iter().map(|(id, _)| state.wallpapers.get(id));
                let first = values.next().flatten().cloned().unwrap_or_default();
                if values.all(|value| value.map(String::as_str) == Some(first.as_str())) {
                    first
                } else {
                    String::new()
                }
            }
        };
        drop(state);
        Ok(wallpaper)
    }

    fn monitor_device_path_at(&self, index: u32) -> Result<MonitorId, ServiceError> {
        self.check()?;
        self.state
            .borrow()
            .monitors
            .get(index as usize)
            .map(|(id, _)| id.clone())
            .ok_or_else(|| ServiceError::Call {
                operation: "GetMonitorDevicePathAt",
                code: 0x8007_0057,
                message: format!("no monitor at {index}"),
            })
    }

    #[allow(clippy::cast_possible_truncation)]
    fn monitor_device_path_count(&self) -> Result<u32, ServiceError> {
        self.check()?;
        Ok(self.state.borrow().monitors.len() as u32)
    }

    fn monitor_rect(&self, monitor: &MonitorId) -> Result<MonitorRect, ServiceError> {
        self.check()?;
        self.lookup(monitor)
    }

    fn set_background_color(&self, color: Color) -> Result<(), ServiceError> {
        self.record(format!("set_background_color {color}"))?;
        self.state.borrow_mut().color = color;
        Ok(())
    }

    fn background_color(&self) -> Result<Color, ServiceError> {
        self.check()?;
        Ok(self.state.borrow().color)
    }

    fn set_position(&self, position: WallpaperPosition) -> Result<(), ServiceError> {
        self.record(format!("set_position {position}"))?;
        self.state.borrow_mut().position = position;
        Ok(())
    }

    fn position(&self) -> Result<WallpaperPosition, ServiceError> {
        self.check()?;
        Ok(self.state.borrow().position)
    }

    fn set_slideshow_options(&self, options: SlideshowOptions) -> Result<(), ServiceError> {
        self.record(format!("set_slideshow_options {}", options.tick_ms))?;
        self.state.borrow_mut().slideshow = options;
        Ok(())
    }

    fn slideshow_options(&self) -> Result<SlideshowOptions, ServiceError> {
        self.check()?;
        Ok(self.state.borrow().slideshow)
    }

    fn advance_slideshow(
        &self,
        monitor: Option<&MonitorId>,
        direction: SlideshowDirection,
    ) -> Result<(), ServiceError> {
        let target = monitor.map_or_else(|| "*".to_string(), ToString::to_string);
        self.record(format!("advance_slideshow {target} {direction:?}"))
    }

    fn status(&self) -> Result<SlideshowStatus, ServiceError> {
        self.check()?;
        Ok(self.state.borrow().status)
    }

    fn enable(&self, enable: bool) -> Result<(), ServiceError> {
        self.record(format!("enable {enable}"))?;
        self.state.borrow_mut().enabled = enable;
        Ok(())
    }
}
