//! Config CLI commands.
//!
//! Commands for inspecting the deskwall configuration file.

use clap::Subcommand;

use crate::cli::output;
use crate::config::schema::generate_schema_json;
use crate::config::template::generate_config_template;
use crate::config::{self, config_paths, custom_config_path};
use crate::error::DeskwallError;

/// Config inspection commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Show the paths searched for the configuration file.
    ///
    /// Displays the path where deskwall looks for configuration files,
    /// and indicates which one is currently in use (if any).
    Path,

    /// Print the configuration that `apply` would use.
    Show,

    /// Print a commented configuration template.
    #[command(after_long_help = r#"Examples:
  deskwall config template > ~/.config/deskwall/config.jsonc"#)]
    Template,

    /// Output the configuration JSON Schema.
    ///
    /// Can be redirected to a file for use with editors that support JSON
    /// Schema validation.
    Schema,
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cmd: &ConfigCommands, json: bool) -> Result<(), DeskwallError> {
    match cmd {
        ConfigCommands::Path => show_config_path(json),
        ConfigCommands::Show => show_config(),
        ConfigCommands::Template => {
            println!("{}", generate_config_template());
            Ok(())
        }
        ConfigCommands::Schema => {
            println!("{}", generate_schema_json());
            Ok(())
        }
    }
}

/// Print the configuration after loading, with `~` still unexpanded.
fn show_config() -> Result<(), DeskwallError> {
    let loaded = config::load()?;

    if let Some(path) = &loaded.path {
        tracing::info!(path = %path.display(), "showing configuration");
    }

    output::print_json(&loaded.config)
}

/// Show the configuration file search paths.
fn show_config_path(json: bool) -> Result<(), DeskwallError> {
    if let Some(path) = custom_config_path() {
        if json {
            return output::print_json(&serde_json::json!({ "active": path, "paths": [path] }));
        }
        println!("Using configuration file from --config:\n\n  {}", path.display());
        return Ok(());
    }

    let paths = config_paths();
    let active = paths.iter().find(|path| path.exists());

    if json {
        return output::print_json(&serde_json::json!({ "active": active, "paths": paths }));
    }

    println!("Configuration file search paths (in priority order):\n");

    for (i, path) in paths.iter().enumerate() {
        let marker = if Some(path) == active {
            " (active)"
        } else if path.exists() {
            " (exists)"
        } else {
            ""
        };

        println!("  {}. {}{}", i + 1, path.display(), marker);
    }

    if active.is_none() {
        println!("\nNo configuration file found.");
        println!("Run 'deskwall config template' to get started.");
    }

    Ok(())
}
