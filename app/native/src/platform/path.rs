//! Path utilities for wallpaper paths.
//!
//! The wallpaper service wants absolute paths. Paths typed on the command
//! line or written in the configuration file may use `~` or be relative;
//! these helpers expand them before they are handed over. Existence is not
//! checked here: a missing file is reported by the service.

use std::path::{Path, PathBuf};

/// Expands a leading `~` to the user's home directory.
///
/// Empty or whitespace-only input yields an empty path.
#[must_use]
pub fn expand(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return PathBuf::new();
    }

    let expanded = shellexpand::tilde(path);
    PathBuf::from(expanded.as_ref())
}

/// Expands `path` and resolves it against `base_dir` when it is relative.
#[must_use]
pub fn expand_and_resolve(path: &str, base_dir: &Path) -> PathBuf {
    let expanded = expand(path);

    if expanded.as_os_str().is_empty() || expanded.is_absolute() {
        return expanded;
    }

    base_dir.join(expanded)
}

/// Produces the string form of a wallpaper path as the service expects it.
#[must_use]
pub fn wallpaper_path(path: &str, base_dir: &Path) -> String {
    expand_and_resolve(path, base_dir).to_string_lossy().into_owned()
}
