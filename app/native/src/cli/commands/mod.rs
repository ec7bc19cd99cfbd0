//! CLI command definitions using Clap.
//!
//! Commands are grouped into submodules:
//!
//! - `monitor` - Per-monitor queries and wallpaper assignment
//! - `settings` - Desktop-wide settings, slideshow and profile application
//! - `config_cmd` - Configuration file helpers

use std::io;
use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::config;
use crate::coordinator::{self, Coordinator};
use crate::error::DeskwallError;
use crate::service::{Color, ServiceFactory, WallpaperPosition};

pub mod config_cmd;
pub mod monitor;
pub mod settings;

pub use config_cmd::ConfigCommands;
pub use settings::SlideshowCommands;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// deskwall - per-monitor desktop wallpaper control.
#[derive(Parser, Debug)]
#[command(name = "deskwall")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// List connected monitors with their size and wallpaper.
    Monitors,

    /// Print the number of connected monitors.
    Count,

    /// Set the wallpaper of one monitor or of every monitor.
    #[command(
        group(ArgGroup::new("target").required(true).args(["monitor", "all"])),
        after_long_help = r#"Examples:
  deskwall set ~/Pictures/forest.jpg --monitor 0   # First monitor only
  deskwall set ~/Pictures/forest.jpg --all         # Every monitor"#
    )]
    Set {
        /// Image to use. `~` is expanded and relative paths are resolved
        /// against the current directory.
        #[arg(value_name = "PATH")]
        path: String,

        /// Zero-based monitor index.
        #[arg(long, short, value_name = "INDEX", allow_negative_numbers = true)]
        monitor: Option<i64>,

        /// Apply to every monitor.
        #[arg(long, short)]
        all: bool,
    },

    /// Print the wallpaper path of a monitor.
    Get {
        /// Zero-based monitor index.
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },

    /// Print the size and aspect ratio of a monitor.
    Size {
        /// Zero-based monitor index.
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },

    /// Reduce a width and height to an aspect ratio.
    Ratio {
        width: u32,
        height: u32,
    },

    /// Get or set how wallpapers are laid out.
    Position {
        /// New position. Prints the current one when omitted.
        #[arg(value_enum)]
        value: Option<WallpaperPosition>,
    },

    /// Get or set the desktop background color.
    Color {
        /// New color as `#RRGGBB`. Prints the current one when omitted.
        #[arg(value_name = "COLOR")]
        value: Option<Color>,
    },

    /// Slideshow commands.
    #[command(subcommand)]
    Slideshow(SlideshowCommands),

    /// Turn the desktop background on.
    Enable,

    /// Turn the desktop background off.
    Disable,

    /// Apply the wallpaper profile from the configuration file.
    Apply,

    /// Configuration file commands.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    /// Can be used with eval or redirected to a file.
    ///
    /// Usage:
    ///   eval "$(deskwall completions --shell zsh)"
    ///   deskwall completions --shell fish > ~/.config/fish/completions/deskwall.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Returns the custom config path if specified via --config flag.
    #[must_use]
    pub fn config_path(&self) -> Option<PathBuf> { self.config.as_ref().map(PathBuf::from) }

    /// Execute the CLI command against the system wallpaper service.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), DeskwallError> {
        if let Some(path) = self.config_path() {
            if !path.exists() {
                return Err(DeskwallError::ConfigError(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            config::set_custom_config_path(path);
        }

        self.execute_with(&coordinator::system())
    }

    /// Execute the CLI command against `coordinator`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute_with<F: ServiceFactory>(
        &self,
        coordinator: &Coordinator<F>,
    ) -> Result<(), DeskwallError> {
        let json = self.json;

        match &self.command {
            Commands::Monitors => monitor::list(coordinator, json),
            Commands::Count => monitor::count(coordinator, json),
            Commands::Set { path, monitor, .. } => monitor::set(coordinator, path, *monitor, json),
            Commands::Get { index } => monitor::get(coordinator, *index, json),
            Commands::Size { index } => monitor::size(coordinator, *index, json),
            Commands::Ratio { width, height } => monitor::ratio(*width, *height, json),
            Commands::Position { value } => settings::position(coordinator, *value, json),
            Commands::Color { value } => settings::color(coordinator, *value, json),
            Commands::Slideshow(cmd) => settings::slideshow(coordinator, cmd, json),
            Commands::Enable => settings::enable(coordinator, true, json),
            Commands::Disable => settings::enable(coordinator, false, json),
            Commands::Apply => settings::apply(coordinator, json),
            Commands::Config(cmd) => config_cmd::execute(cmd, json),
            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "deskwall", &mut io::stdout());
    }
}
