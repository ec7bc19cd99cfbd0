//! Platform bindings for deskwall.
//!
//! - [`path`] - Shell-like path expansion for wallpaper paths
//! - `win32` - `IDesktopWallpaper` COM adapter (Windows only)

pub mod path;
#[cfg(windows)]
pub mod win32;

use crate::service::{DesktopWallpaper, ServiceError};

/// Opens a fresh connection to the system wallpaper service.
///
/// # Errors
///
/// Returns an error if the service cannot be instantiated.
#[cfg(windows)]
pub fn connect() -> Result<Box<dyn DesktopWallpaper>, ServiceError> {
    Ok(Box::new(win32::ComDesktop::connect()?))
}

/// Opens a fresh connection to the system wallpaper service.
///
/// # Errors
///
/// Always fails: the desktop wallpaper service only exists on Windows.
#[cfg(not(windows))]
pub fn connect() -> Result<Box<dyn DesktopWallpaper>, ServiceError> {
    Err(ServiceError::Unavailable(format!(
        "IDesktopWallpaper is a Windows API; this build targets {}",
        std::env::consts::OS
    )))
}
