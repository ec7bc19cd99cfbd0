//! Value types exchanged with the desktop wallpaper service.
//!
//! These mirror the native `IDesktopWallpaper` data model: opaque monitor
//! device paths, monitor rectangles, and the global display settings the
//! service owns (background color, position, slideshow).

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Opaque monitor device path issued by the service.
///
/// Stable for the session only. Never constructed from user input by the
/// coordinator; always obtained by index lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonitorId(String);

impl MonitorId {
    /// Wraps a device path returned by the service.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self { Self(path.into()) }

    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for MonitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Bounding box of a monitor in virtual-desktop coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl MonitorRect {
    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Horizontal extent, `|right - left|`.
    #[must_use]
    pub const fn width(&self) -> u32 { self.right.abs_diff(self.left) }

    /// Vertical extent, `|bottom - top|`.
    #[must_use]
    pub const fn height(&self) -> u32 { self.bottom.abs_diff(self.top) }
}

/// Desktop background color.
///
/// Stored in the Win32 `COLORREF` layout (`0x00BBGGRR`) so it can be handed
/// to the service unchanged. Parsed from and displayed as `#RRGGBB`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self((blue as u32) << 16 | (green as u32) << 8 | red as u32)
    }

    /// Builds a color from a raw `COLORREF`. The high byte is ignored.
    #[must_use]
    pub const fn from_colorref(raw: u32) -> Self { Self(raw & 0x00FF_FFFF) }

    #[must_use]
    pub const fn colorref(self) -> u32 { self.0 }

    /// Returns the `(red, green, blue)` components.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.0 as u8, (self.0 >> 8) as u8, (self.0 >> 16) as u8)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.rgb();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid color '{s}'. Expected a hex value like #1e1e2e."));
        }

        let component = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("Invalid color '{s}': {e}"))
        };

        Ok(Self::from_rgb(component(0..2)?, component(2..4)?, component(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
}

impl From<Color> for String {
    fn from(color: Color) -> Self { color.to_string() }
}

/// How the wallpaper image is laid out on each monitor.
///
/// The discriminants match `DESKTOP_WALLPAPER_POSITION`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum
)]
#[serde(rename_all = "lowercase")]
pub enum WallpaperPosition {
    Center = 0,
    Tile = 1,
    Stretch = 2,
    Fit = 3,
    #[default]
    Fill = 4,
    Span = 5,
}

impl WallpaperPosition {
    /// All positions in discriminant order.
    pub const ALL: [Self; 6] =
        [Self::Center, Self::Tile, Self::Stretch, Self::Fit, Self::Fill, Self::Span];

    #[must_use]
    pub const fn as_raw(self) -> i32 { self as i32 }

    /// Maps a raw service value back to a position.
    #[must_use]
    pub fn from_raw(raw: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|position| position.as_raw() == raw)
    }
}

impl fmt::Display for WallpaperPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Center => "center",
            Self::Tile => "tile",
            Self::Stretch => "stretch",
            Self::Fit => "fit",
            Self::Fill => "fill",
            Self::Span => "span",
        };
        f.write_str(name)
    }
}

/// Direction used when advancing a slideshow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideshowDirection {
    #[default]
    Forward = 0,
    Backward = 1,
}

impl SlideshowDirection {
    #[must_use]
    pub const fn as_raw(self) -> i32 { self as i32 }
}

bitflags! {
    /// Slideshow behaviour flags (`DESKTOP_SLIDESHOW_OPTIONS`).
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SlideshowFlags: u32 {
        /// Images may be shown in random order.
        const SHUFFLE_IMAGES = 0x01;
    }
}

bitflags! {
    /// Current slideshow state (`DESKTOP_SLIDESHOW_STATE`).
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SlideshowStatus: u32 {
        const ENABLED = 0x01;
        const SLIDESHOW = 0x02;
        const DISABLED_BY_REMOTE_SESSION = 0x04;
    }
}

/// Slideshow flags together with the tick interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideshowOptions {
    pub flags: SlideshowFlags,
    /// Time between images, in milliseconds.
    pub tick_ms: u32,
}

impl SlideshowOptions {
    #[must_use]
    pub const fn shuffle(&self) -> bool { self.flags.contains(SlideshowFlags::SHUFFLE_IMAGES) }
}
