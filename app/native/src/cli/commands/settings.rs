//! Desktop-wide settings, slideshow control and profile application.
//!
//! Unlike wallpapers, these settings are global: the service keeps a single
//! value for every monitor.

use clap::Subcommand;
use colored::Colorize;
use serde::Serialize;

use crate::cli::output;
use crate::config;
use crate::coordinator::Coordinator;
use crate::error::DeskwallError;
use crate::service::{
    Color, ServiceFactory, SlideshowDirection, SlideshowFlags, SlideshowOptions, SlideshowStatus,
    WallpaperPosition,
};

/// Slideshow subcommands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum SlideshowCommands {
    /// Show or change slideshow options.
    ///
    /// Without flags the current options are printed. Flags that are given
    /// are changed; the others keep their current value.
    #[command(after_long_help = r#"Examples:
  deskwall slideshow options                        # Show current options
  deskwall slideshow options --shuffle true         # Enable shuffle
  deskwall slideshow options --interval 600000      # Change image every 10 minutes"#)]
    Options {
        /// Show images in random order.
        #[arg(long, value_name = "BOOL")]
        shuffle: Option<bool>,

        /// Time between images, in milliseconds.
        #[arg(long, value_name = "MS")]
        interval: Option<u32>,
    },

    /// Move a monitor's slideshow to the next image.
    Advance {
        /// Zero-based monitor index.
        #[arg(allow_negative_numbers = true)]
        index: i64,

        /// Go to the previous image instead.
        #[arg(long, short)]
        backward: bool,
    },

    /// Show the slideshow state.
    Status,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SlideshowOptionsView {
    shuffle: bool,
    interval_ms: u32,
}

impl From<SlideshowOptions> for SlideshowOptionsView {
    fn from(options: SlideshowOptions) -> Self {
        Self { shuffle: options.shuffle(), interval_ms: options.tick_ms }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SlideshowStatusView {
    enabled: bool,
    slideshow: bool,
    disabled_by_remote_session: bool,
}

impl From<SlideshowStatus> for SlideshowStatusView {
    fn from(status: SlideshowStatus) -> Self {
        Self {
            enabled: status.contains(SlideshowStatus::ENABLED),
            slideshow: status.contains(SlideshowStatus::SLIDESHOW),
            disabled_by_remote_session: status.contains(SlideshowStatus::DISABLED_BY_REMOTE_SESSION),
        }
    }
}

/// `deskwall position`
pub fn position<F: ServiceFactory>(
    coordinator: &Coordinator<F>,
    value: Option<WallpaperPosition>,
    json: bool,
) -> Result<(), DeskwallError> {
    let position = match value {
        Some(position) => {
            coordinator.set_position(position)?;
            position
        }
        None => coordinator.position()?,
    };

    if json {
        output::print_json(&serde_json::json!({ "position": position }))
    } else {
        println!("{position}");
        Ok(())
    }
}

/// `deskwall color`
pub fn color<F: ServiceFactory>(
    coordinator: &Coordinator<F>,
    value: Option<Color>,
    json: bool,
) -> Result<(), DeskwallError> {
    let color = match value {
        Some(color) => {
            coordinator.set_background_color(color)?;
            color
        }
        None => coordinator.background_color()?,
    };

    if json {
        output::print_json(&serde_json::json!({ "color": color }))
    } else {
        println!("{color}");
        Ok(())
    }
}

/// `deskwall slideshow ...`
pub fn slideshow<F: ServiceFactory>(
    coordinator: &Coordinator<F>,
    cmd: &SlideshowCommands,
    json: bool,
) -> Result<(), DeskwallError> {
    match cmd {
        SlideshowCommands::Options { shuffle, interval } => {
            let options = update_options(coordinator, *shuffle, *interval)?;
            let view = SlideshowOptionsView::from(options);
            if json {
                return output::print_json(&view);
            }
            println!("Shuffle:  {}", output::format_bool(view.shuffle));
            println!("Interval: {} ms", view.interval_ms);
            Ok(())
        }
        SlideshowCommands::Advance { index, backward } => {
            let direction = if *backward {
                SlideshowDirection::Backward
            } else {
                SlideshowDirection::Forward
            };
            coordinator.advance_slideshow(*index, direction)?;
            if json {
                return output::print_json(
                    &serde_json::json!({ "monitor": index, "direction": direction }),
                );
            }
            Ok(())
        }
        SlideshowCommands::Status => {
            let view = SlideshowStatusView::from(coordinator.slideshow_status()?);
            if json {
                return output::print_json(&view);
            }
            println!("Enabled:   {}", output::format_bool(view.enabled));
            println!("Slideshow: {}", output::format_bool(view.slideshow));
            if view.disabled_by_remote_session {
                println!("{}", "Disabled by remote session.".yellow());
            }
            Ok(())
        }
    }
}

/// Reads the current slideshow options and writes them back with the given
/// overrides. Nothing is written when there are no overrides.
fn update_options<F: ServiceFactory>(
    coordinator: &Coordinator<F>,
    shuffle: Option<bool>,
    interval: Option<u32>,
) -> Result<SlideshowOptions, DeskwallError> {
    let mut options = coordinator.slideshow_options()?;

    if shuffle.is_none() && interval.is_none() {
        return Ok(options);
    }

    if let Some(shuffle) = shuffle {
        options.flags.set(SlideshowFlags::SHUFFLE_IMAGES, shuffle);
    }
    if let Some(interval) = interval {
        options.tick_ms = interval;
    }

    coordinator.set_slideshow_options(options)?;
    Ok(options)
}

/// `deskwall enable` / `deskwall disable`
pub fn enable<F: ServiceFactory>(
    coordinator: &Coordinator<F>,
    enable: bool,
    json: bool,
) -> Result<(), DeskwallError> {
    coordinator.enable(enable)?;

    if json {
        output::print_json(&serde_json::json!({ "enabled": enable }))
    } else {
        let state = if enable { "enabled".green() } else { "disabled".red() };
        println!("Desktop background {state}");
        Ok(())
    }
}

/// `deskwall apply`
pub fn apply<F: ServiceFactory>(
    coordinator: &Coordinator<F>,
    json: bool,
) -> Result<(), DeskwallError> {
    let loaded = config::load()?;

    if loaded.config.is_empty() {
        tracing::warn!("configuration has nothing to apply");
    }

    let applied = config::apply(coordinator, &loaded.config, &loaded.base_dir())?;

    if json {
        return output::print_json(&applied);
    }

    match &loaded.path {
        Some(path) => println!("Applied {} from {}", plural(applied.len()), path.display()),
        None => println!("{}", "No configuration file found.".dimmed()),
    }
    Ok(())
}

fn plural(count: usize) -> String {
    if count == 1 { "1 setting".to_string() } else { format!("{count} settings") }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MonitorRect;
    use crate::service::fake::FakeDesktop;

    fn desktop() -> FakeDesktop { FakeDesktop::with_monitors(&[MonitorRect::new(0, 0, 1920, 1080)]) }

    #[test]
    fn test_update_options_without_overrides_does_not_write() {
        let desktop = desktop();
        let coordinator = Coordinator::new(desktop.factory());

        update_options(&coordinator, None, None).unwrap();

        assert!(desktop.mutations().is_empty());
    }

    #[test]
    fn test_update_options_keeps_unspecified_values() {
        let desktop = desktop();
        let coordinator = Coordinator::new(desktop.factory());
        coordinator
            .set_slideshow_options(SlideshowOptions {
                flags: SlideshowFlags::SHUFFLE_IMAGES,
                tick_ms: 30_000,
            })
            .unwrap();

        let options = update_options(&coordinator, None, Some(60_000)).unwrap();
        assert!(options.shuffle());
        assert_eq!(options.tick_ms, 60_000);

        let options = update_options(&coordinator, Some(false), None).unwrap();
        assert!(!options.shuffle());
        assert_eq!(options.tick_ms, 60_000);
        assert_eq!(coordinator.slideshow_options().unwrap(), options);
    }

    #[test]
    fn test_position_get_and_set() {
        let desktop = desktop();
        let coordinator = Coordinator::new(desktop.factory());

        position(&coordinator, None, false).unwrap();
        assert!(desktop.mutations().is_empty());

        position(&coordinator, Some(WallpaperPosition::Tile), true).unwrap();
        assert_eq!(coordinator.position().unwrap(), WallpaperPosition::Tile);
    }

    #[test]
    fn test_color_set() {
        let desktop = desktop();
        let coordinator = Coordinator::new(desktop.factory());

        color(&coordinator, Some(Color::from_rgb(0x1e, 0x1e, 0x2e)), false).unwrap();

        assert_eq!(coordinator.background_color().unwrap().to_string(), "#1e1e2e");
    }

    #[test]
    fn test_advance_backward_targets_monitor() {
        let desktop = desktop();
        let coordinator = Coordinator::new(desktop.factory());
        let cmd = SlideshowCommands::Advance { index: 0, backward: true };

        slideshow(&coordinator, &cmd, false).unwrap();

        let expected = format!("advance_slideshow {} Backward", desktop.monitor_id(0));
        assert_eq!(desktop.mutations(), vec![expected]);
    }

    #[test]
    fn test_status_view_flags() {
        let view = SlideshowStatusView::from(
            SlideshowStatus::ENABLED | SlideshowStatus::DISABLED_BY_REMOTE_SESSION,
        );
        assert!(view.enabled);
        assert!(!view.slideshow);
        assert!(view.disabled_by_remote_session);
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1), "1 setting");
        assert_eq!(plural(3), "3 settings");
    }
}
