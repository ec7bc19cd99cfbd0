//! Monitor wallpaper coordinator.
//!
//! Translates caller-facing monitor indices into service device paths and
//! forwards each request to the desktop wallpaper service. Every public
//! operation connects afresh, re-reads the monitor count, validates the
//! index and only then touches the service. Nothing is kept between calls
//! because monitors can be hot-plugged and other processes can change the
//! wallpaper at any time.

use serde::Serialize;

use crate::error::DeskwallError;
use crate::platform;
use crate::service::{
    Color, DesktopWallpaper, MonitorId, MonitorRect, ServiceError, ServiceFactory,
    SlideshowDirection, SlideshowOptions, SlideshowStatus, WallpaperPosition,
};

/// Factory signature used by [`SystemCoordinator`].
pub type ConnectFn = fn() -> Result<Box<dyn DesktopWallpaper>, ServiceError>;

/// Coordinator bound to the platform's wallpaper service.
pub type SystemCoordinator = Coordinator<ConnectFn>;

/// Point-in-time description of one monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorInfo {
    pub index: u32,
    pub id: MonitorId,
    pub rect: MonitorRect,
    pub wallpaper: String,
}

impl MonitorInfo {
    #[must_use]
    pub const fn width(&self) -> u32 { self.rect.width() }

    #[must_use]
    pub const fn height(&self) -> u32 { self.rect.height() }
}

/// Stateless front end over a [`ServiceFactory`].
#[derive(Debug, Clone)]
pub struct Coordinator<F> {
    factory: F,
}

/// Returns a coordinator that talks to the real desktop.
#[must_use]
pub fn system() -> SystemCoordinator { Coordinator::new(platform::connect as ConnectFn) }

impl<F: ServiceFactory> Coordinator<F> {
    #[must_use]
    pub const fn new(factory: F) -> Self { Self { factory } }

    fn connect(&self) -> Result<Box<dyn DesktopWallpaper>, DeskwallError> {
        Ok(self.factory.connect()?)
    }

    /// Validates `index` against the live monitor count and looks up its
    /// device path.
    fn resolve(service: &dyn DesktopWallpaper, index: i64) -> Result<MonitorId, DeskwallError> {
        let count = service.monitor_device_path_count()?;

        let Some(position) = u32::try_from(index).ok().filter(|position| *position < count) else {
            tracing::warn!(index, count, "monitor index out of range");
            return Err(DeskwallError::IndexOutOfRange { index, count });
        };

        let id = service.monitor_device_path_at(position)?;
        tracing::debug!(index, count, monitor = %id, "resolved monitor");
        Ok(id)
    }

    /// Returns how many monitors are currently connected.
    ///
    /// # Errors
    ///
    /// Returns an error if the service fails.
    pub fn count_monitors(&self) -> Result<u32, DeskwallError> {
        Ok(self.connect()?.monitor_device_path_count()?)
    }

    /// Returns the device path of the monitor at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DeskwallError::IndexOutOfRange`] for an invalid index, or the
    /// service error.
    pub fn monitor_id(&self, index: i64) -> Result<MonitorId, DeskwallError> {
        let service = self.connect()?;
        Self::resolve(service.as_ref(), index)
    }

    /// Assigns `path` as the wallpaper of the monitor at `index`.
    ///
    /// The path is passed through untouched; a missing or unreadable file is
    /// reported by the service.
    ///
    /// # Errors
    ///
    /// Returns [`DeskwallError::IndexOutOfRange`] before any change is made if
    /// the index is invalid, or the service error.
    pub fn set_wallpaper_for_monitor(&self, index: i64, path: &str) -> Result<(), DeskwallError> {
        let service = self.connect()?;
        let id = Self::resolve(service.as_ref(), index)?;
        service.set_wallpaper(Some(&id), path)?;
        tracing::info!(index, monitor = %id, path, "wallpaper set");
        Ok(())
    }

    /// Assigns `path` to every monitor at once.
    ///
    /// # Errors
    ///
    /// Returns the service error.
    pub fn set_wallpaper_for_all(&self, path: &str) -> Result<(), DeskwallError> {
        self.connect()?.set_wallpaper(None, path)?;
        tracing::info!(path, "wallpaper set for all monitors");
        Ok(())
    }

    /// Returns the wallpaper currently shown on the monitor at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DeskwallError::IndexOutOfRange`] or the service error.
    pub fn wallpaper_for_monitor(&self, index: i64) -> Result<String, DeskwallError> {
        let service = self.connect()?;
        let id = Self::resolve(service.as_ref(), index)?;
        Ok(service.wallpaper(Some(&id))?)
    }

    /// Returns the bounding rectangle of the monitor at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DeskwallError::IndexOutOfRange`] or the service error.
    pub fn rect(&self, index: i64) -> Result<MonitorRect, DeskwallError> {
        let service = self.connect()?;
        let id = Self::resolve(service.as_ref(), index)?;
        Ok(service.monitor_rect(&id)?)
    }

    /// Returns the width in pixels of the monitor at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DeskwallError::IndexOutOfRange`] or the service error.
    pub fn width(&self, index: i64) -> Result<u32, DeskwallError> {
        self.rect(index).map(|rect| rect.width())
    }

    /// Returns the height in pixels of the monitor at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DeskwallError::IndexOutOfRange`] or the service error.
    pub fn height(&self, index: i64) -> Result<u32, DeskwallError> {
        self.rect(index).map(|rect| rect.height())
    }

    /// Describes every connected monitor using a single connection.
    ///
    /// The device path list can keep remembered monitors that are no longer
    /// attached; entries whose rectangle or wallpaper cannot be read are
    /// skipped with a warning. Each entry keeps its service index.
    ///
    /// # Errors
    ///
    /// Returns the service error if the count or a device path cannot be
    /// read.
    pub fn monitors(&self) -> Result<Vec<MonitorInfo>, DeskwallError> {
        let service = self.connect()?;
        let count = service.monitor_device_path_count()?;
        let mut monitors = Vec::with_capacity(usize::try_from(count).unwrap_or_default());

        for index in 0..count {
            let id = service.monitor_device_path_at(index)?;
            let details = service
                .monitor_rect(&id)
                .and_then(|rect| Ok((rect, service.wallpaper(Some(&id))?)));

            match details {
                Ok((rect, wallpaper)) => monitors.push(MonitorInfo { index, id, rect, wallpaper }),
                Err(err) => tracing::warn!(index, monitor = %id, %err, "skipping monitor"),
            }
        }

        Ok(monitors)
    }

    /// Moves the slideshow on the monitor at `index` one image in `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`DeskwallError::IndexOutOfRange`] or the service error.
    pub fn advance_slideshow(
        &self,
        index: i64,
        direction: SlideshowDirection,
    ) -> Result<(), DeskwallError> {
        let service = self.connect()?;
        let id = Self::resolve(service.as_ref(), index)?;
        service.advance_slideshow(Some(&id), direction)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the service error.
    pub fn background_color(&self) -> Result<Color, DeskwallError> {
        Ok(self.connect()?.background_color()?)
    }

    /// # Errors
    ///
    /// Returns the service error.
    pub fn set_background_color(&self, color: Color) -> Result<(), DeskwallError> {
        Ok(self.connect()?.set_background_color(color)?)
    }

    /// # Errors
    ///
    /// Returns the service error.
    pub fn position(&self) -> Result<WallpaperPosition, DeskwallError> {
        Ok(self.connect()?.position()?)
    }

    /// # Errors
    ///
    /// Returns the service error.
    pub fn set_position(&self, position: WallpaperPosition) -> Result<(), DeskwallError> {
        Ok(self.connect()?.set_position(position)?)
    }

    /// # Errors
    ///
    /// Returns the service error.
    pub fn slideshow_options(&self) -> Result<SlideshowOptions, DeskwallError> {
        Ok(self.connect()?.slideshow_options()?)
    }

    /// # Errors
    ///
    /// Returns the service error.
    pub fn set_slideshow_options(&self, options: SlideshowOptions) -> Result<(), DeskwallError> {
        Ok(self.connect()?.set_slideshow_options(options)?)
    }

    /// # Errors
    ///
    /// Returns the service error.
    pub fn slideshow_status(&self) -> Result<SlideshowStatus, DeskwallError> {
        Ok(self.connect()?.status()?)
    }

    /// Turns the desktop background on or off.
    ///
    /// # Errors
    ///
    /// Returns the service error.
    pub fn enable(&self, enable: bool) -> Result<(), DeskwallError> {
        Ok(self.connect()?.enable(enable)?)
    }
}
