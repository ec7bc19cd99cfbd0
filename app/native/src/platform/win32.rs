//! Windows desktop wallpaper service.
//!
//! Wraps the shell's `IDesktopWallpaper` COM object. Each [`ComDesktop`]
//! owns its own COM apartment initialisation and interface pointer; both
//! are released when the handle is dropped.

use std::ffi::c_void;

use windows::Win32::Foundation::{BOOL, COLORREF, RPC_E_CHANGED_MODE};
use windows::Win32::System::Com::{
    CLSCTX_ALL, COINIT_APARTMENTTHREADED, CoCreateInstance, CoInitializeEx, CoTaskMemFree,
    CoUninitialize,
};
use windows::Win32::UI::Shell::{
    DESKTOP_SLIDESHOW_DIRECTION, DESKTOP_SLIDESHOW_OPTIONS, DESKTOP_WALLPAPER_POSITION,
    DesktopWallpaper as DesktopWallpaperClass, IDesktopWallpaper,
};
use windows::core::{HSTRING, PCWSTR, PWSTR};

use crate::service::{
    Color, DesktopWallpaper, MonitorId, MonitorRect, ServiceError, SlideshowDirection,
    SlideshowFlags, SlideshowOptions, SlideshowStatus, WallpaperPosition,
};

/// Converts a failed COM call into a [`ServiceError`].
#[allow(clippy::cast_sign_loss, clippy::needless_pass_by_value)]
fn call_error(operation: &'static str, err: windows::core::Error) -> ServiceError {
    ServiceError::Call {
        operation,
        code: err.code().0 as u32,
        message: err.message().to_string(),
    }
}

/// Keeps COM initialised on the current thread for the lifetime of a handle.
struct Apartment {
    owned: bool,
}

impl Apartment {
    fn enter() -> Result<Self, ServiceError> {
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };

        // Another component already set a different threading model; COM is
        // usable but the initialisation is not ours to undo.
        if hr == RPC_E_CHANGED_MODE {
            tracing::trace!("COM already initialised with a different apartment model");
            return Ok(Self { owned: false });
        }

        hr.ok().map_err(|err| call_error("CoInitializeEx", err))?;
        Ok(Self { owned: true })
    }
}

impl Drop for Apartment {
    fn drop(&mut self) {
        if self.owned {
            unsafe { CoUninitialize() };
        }
    }
}

/// Live connection to the shell wallpaper object.
pub struct ComDesktop {
    // Declared before `_apartment` so the interface is released first.
    wallpaper: IDesktopWallpaper,
    _apartment: Apartment,
}

impl ComDesktop {
    /// Initialises COM and instantiates `DesktopWallpaper`.
    ///
    /// # Errors
    ///
    /// Returns an error if COM cannot be initialised or the class cannot be
    /// created.
    pub fn connect() -> Result<Self, ServiceError> {
        let apartment = Apartment::enter()?;
        let wallpaper: IDesktopWallpaper =
            unsafe { CoCreateInstance(&DesktopWallpaperClass, None, CLSCTX_ALL) }
                .map_err(|err| call_error("CoCreateInstance", err))?;

        tracing::trace!("connected to IDesktopWallpaper");
        Ok(Self { wallpaper, _apartment: apartment })
    }
}

/// Converts an optional monitor id into a wide string. `None` stays `None`
/// so it can be passed as a null pointer.
fn wide(monitor: Option<&MonitorId>) -> Option<HSTRING> {
    monitor.map(|id| HSTRING::from(id.as_str()))
}

fn as_pcwstr(value: Option<&HSTRING>) -> PCWSTR {
    value.map_or_else(PCWSTR::null, |s| PCWSTR(s.as_ptr()))
}

/// Copies a COM-allocated string and frees the original.
fn take_string(operation: &'static str, value: PWSTR) -> Result<String, ServiceError> {
    if value.is_null() {
        return Ok(String::new());
    }

    let result = unsafe { value.to_string() };
    unsafe { CoTaskMemFree(Some(value.0 as *const c_void)) };

    result.map_err(|err| ServiceError::InvalidData { operation, message: err.to_string() })
}

impl DesktopWallpaper for ComDesktop {
    fn set_wallpaper(&self, monitor: Option<&MonitorId>, path: &str) -> Result<(), ServiceError> {
        let monitor = wide(monitor);
        let path = HSTRING::from(path);
        unsafe { self.wallpaper.SetWallpaper(as_pcwstr(monitor.as_ref()), &path) }
            .map_err(|err| call_error("SetWallpaper", err))
    }

    fn wallpaper(&self, monitor: Option<&MonitorId>) -> Result<String, ServiceError> {
        let monitor = wide(monitor);
        let value = unsafe { self.wallpaper.GetWallpaper(as_pcwstr(monitor.as_ref())) }
            .map_err(|err| call_error("GetWallpaper", err))?;
        take_string("GetWallpaper", value)
    }

    fn monitor_device_path_at(&self, index: u32) -> Result<MonitorId, ServiceError> {
        let value = unsafe { self.wallpaper.GetMonitorDevicePathAt(index) }
            .map_err(|err| call_error("GetMonitorDevicePathAt", err))?;
        take_string("GetMonitorDevicePathAt", value).map(MonitorId::new)
    }

    fn monitor_device_path_count(&self) -> Result<u32, ServiceError> {
        unsafe { self.wallpaper.GetMonitorDevicePathCount() }
            .map_err(|err| call_error("GetMonitorDevicePathCount", err))
    }

    fn monitor_rect(&self, monitor: &MonitorId) -> Result<MonitorRect, ServiceError> {
        let monitor = HSTRING::from(monitor.as_str());
        let rect = unsafe { self.wallpaper.GetMonitorRECT(&monitor) }
            .map_err(|err| call_error("GetMonitorRECT", err))?;
        Ok(MonitorRect::new(rect.left, rect.top, rect.right, rect.bottom))
    }

    fn set_background_color(&self, color: Color) -> Result<(), ServiceError> {
        unsafe { self.wallpaper.SetBackgroundColor(COLORREF(color.colorref())) }
            .map_err(|err| call_error("SetBackgroundColor", err))
    }

    fn background_color(&self) -> Result<Color, ServiceError> {
        unsafe { self.wallpaper.GetBackgroundColor() }
            .map(|color| Color::from_colorref(color.0))
            .map_err(|err| call_error("GetBackgroundColor", err))
    }

    fn set_position(&self, position: WallpaperPosition) -> Result<(), ServiceError> {
        unsafe { self.wallpaper.SetPosition(DESKTOP_WALLPAPER_POSITION(position.as_raw())) }
            .map_err(|err| call_error("SetPosition", err))
    }

    fn position(&self) -> Result<WallpaperPosition, ServiceError> {
        let raw = unsafe { self.wallpaper.GetPosition() }
            .map_err(|err| call_error("GetPosition", err))?;
        WallpaperPosition::from_raw(raw.0).ok_or_else(|| ServiceError::InvalidData {
            operation: "GetPosition",
            message: format!("unknown wallpaper position {}", raw.0),
        })
    }

    #[allow(clippy::cast_possible_wrap)]
    fn set_slideshow_options(&self, options: SlideshowOptions) -> Result<(), ServiceError> {
        let flags = DESKTOP_SLIDESHOW_OPTIONS(options.flags.bits() as i32);
        unsafe { self.wallpaper.SetSlideshowOptions(flags, options.tick_ms) }
            .map_err(|err| call_error("SetSlideshowOptions", err))
    }

    #[allow(clippy::cast_sign_loss)]
    fn slideshow_options(&self) -> Result<SlideshowOptions, ServiceError> {
        let mut flags = DESKTOP_SLIDESHOW_OPTIONS::default();
        let mut tick_ms = 0_u32;
        unsafe { self.wallpaper.GetSlideshowOptions(&mut flags, &mut tick_ms) }
            .map_err(|err| call_error("GetSlideshowOptions", err))?;

        Ok(SlideshowOptions { flags: SlideshowFlags::from_bits_truncate(flags.0 as u32), tick_ms })
    }

    fn advance_slideshow(
        &self,
        monitor: Option<&MonitorId>,
        direction: SlideshowDirection,
    ) -> Result<(), ServiceError> {
        let monitor = wide(monitor);
        let direction = DESKTOP_SLIDESHOW_DIRECTION(direction.as_raw());
        unsafe { self.wallpaper.AdvanceSlideshow(as_pcwstr(monitor.as_ref()), direction) }
            .map_err(|err| call_error("AdvanceSlideshow", err))
    }

    #[allow(clippy::cast_sign_loss)]
    fn status(&self) -> Result<SlideshowStatus, ServiceError> {
        unsafe { self.wallpaper.GetStatus() }
            .map(|state| SlideshowStatus::from_bits_truncate(state.0 as u32))
            .map_err(|err| call_error("GetStatus", err))
    }

    fn enable(&self, enable: bool) -> Result<(), ServiceError> {
        unsafe { self.wallpaper.Enable(BOOL::from(enable)) }
            .map_err(|err| call_error("Enable", err))
    }
}
