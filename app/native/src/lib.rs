//! deskwall - per-monitor desktop wallpaper control.
//!
//! The library wraps the shell's desktop wallpaper service behind the
//! [`service::DesktopWallpaper`] trait and exposes a stateless
//! [`coordinator::Coordinator`] that addresses monitors by zero-based index.
//! The `deskwall` binary is a thin CLI over it.

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod logging;
pub mod platform;
pub mod ratio;
pub mod service;
