//! Configuration template generation.
//!
//! Produces a commented configuration file documenting every option.

/// Returns a JSONC configuration template with all options commented out.
#[must_use]
pub const fn generate_config_template() -> &'static str {
    r##"// deskwall Configuration File
// ===========================
// This file uses JSONC format (JSON with comments).
// Uncomment and modify the options you want `deskwall apply` to set.
// Relative paths are resolved against the directory of this file.

{
  // Wallpaper assigned to every monitor first.
  // "all": "~/Pictures/Wallpapers/base.jpg",

  // Wallpapers keyed by zero-based monitor index (see `deskwall monitors`).
  "wallpapers": {
    // "0": "~/Pictures/Wallpapers/left.jpg",
    // "1": "~/Pictures/Wallpapers/right.jpg"
  }

  // How images are laid out: center, tile, stretch, fit, fill or span.
  // "position": "fill",

  // Color around images that do not cover the monitor.
  // "backgroundColor": "#000000",

  // Slideshow options.
  // "slideshow": {
  //   "shuffle": false,
  //   "intervalMs": 1800000
  // }
}
"##
}
