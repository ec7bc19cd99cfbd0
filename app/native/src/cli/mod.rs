//! CLI module for deskwall.
//!
//! Parses the command line, installs logging and runs one command against
//! the system wallpaper service.

mod commands;
mod output;

use clap::Parser;
pub use commands::Cli;

use crate::error::DeskwallError;
use crate::logging;

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), DeskwallError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::debug!(?cli, "parsed command line");
    cli.execute()
}
