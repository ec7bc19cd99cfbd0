#![allow(clippy::multiple_crate_versions)]

//! deskwall - per-monitor desktop wallpaper control.
//!
//! Every invocation is a single CLI command; there is no background process.

fn main() {
    if let Err(err) = deskwall_lib::cli::run() {
        eprintln!("deskwall: {err}");
        std::process::exit(1);
    }
}
