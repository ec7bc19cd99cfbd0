//! The desktop wallpaper service capability.
//!
//! The OS wallpaper subsystem is consumed through the [`DesktopWallpaper`]
//! trait. The Windows COM adapter in [`crate::platform`] implements it for
//! real; tests use an in-memory fake. Every method is a single synchronous
//! round-trip and nothing is cached on this side of the boundary.

mod types;

#[cfg(any(test, feature = "test-util"))]
pub mod fake;

use thiserror::Error;
pub use types::{
    Color, MonitorId, MonitorRect, SlideshowDirection, SlideshowFlags, SlideshowOptions,
    SlideshowStatus, WallpaperPosition,
};

/// Failures reported by the wallpaper service.
///
/// These are carried to the caller as-is; nothing here retries or
/// reinterprets them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service could not be reached on this system.
    #[error("desktop wallpaper service unavailable: {0}")]
    Unavailable(String),
    /// A call into the service failed.
    #[error("{operation} failed (0x{code:08X}): {message}")]
    Call {
        operation: &'static str,
        code: u32,
        message: String,
    },
    /// The service returned something that could not be interpreted.
    #[error("{operation} returned invalid data: {message}")]
    InvalidData {
        operation: &'static str,
        message: String,
    },
}

/// Operations exposed by the OS wallpaper subsystem.
///
/// Methods taking `Option<&MonitorId>` treat `None` as "every monitor",
/// matching the native null-identifier convention.
pub trait DesktopWallpaper {
    /// Assigns `path` as the wallpaper of `monitor`.
    fn set_wallpaper(&self, monitor: Option<&MonitorId>, path: &str) -> Result<(), ServiceError>;

    /// Returns the wallpaper currently assigned to `monitor`.
    fn wallpaper(&self, monitor: Option<&MonitorId>) -> Result<String, ServiceError>;

    /// Returns the device path of the monitor at `index`.
    fn monitor_device_path_at(&self, index: u32) -> Result<MonitorId, ServiceError>;

    /// Returns how many monitors the service currently knows about.
    fn monitor_device_path_count(&self) -> Result<u32, ServiceError>;

    fn monitor_rect(&self, monitor: &MonitorId) -> Result<MonitorRect, ServiceError>;

    fn set_background_color(&self, color: Color) -> Result<(), ServiceError>;

    fn background_color(&self) -> Result<Color, ServiceError>;

    fn set_position(&self, position: WallpaperPosition) -> Result<(), ServiceError>;

    fn position(&self) -> Result<WallpaperPosition, ServiceError>;

    fn set_slideshow_options(&self, options: SlideshowOptions) -> Result<(), ServiceError>;

    fn slideshow_options(&self) -> Result<SlideshowOptions, ServiceError>;

    fn advance_slideshow(
        &self,
        monitor: Option<&MonitorId>,
        direction: SlideshowDirection,
    ) -> Result<(), ServiceError>;

    fn status(&self) -> Result<SlideshowStatus, ServiceError>;

    /// Turns the desktop background on or off.
    fn enable(&self, enable: bool) -> Result<(), ServiceError>;
}

/// Produces a fresh service handle.
///
/// The coordinator asks for a new handle on every operation and drops it
/// when the operation completes.
pub trait ServiceFactory {
    /// Connects to the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be instantiated.
    fn connect(&self) -> Result<Box<dyn DesktopWallpaper>, ServiceError>;
}

impl<F> ServiceFactory for F
where
    F: Fn() -> Result<Box<dyn DesktopWallpaper>, ServiceError>,
{
    fn connect(&self) -> Result<Box<dyn DesktopWallpaper>, ServiceError> { self() }
}
