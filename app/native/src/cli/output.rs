//! CLI output formatting utilities.
//!
//! - JSON output, syntax highlighted when stdout is a terminal
//! - Small helpers for table cells

use std::io::IsTerminal;

use colored::Colorize;
use serde::Serialize;

use crate::error::DeskwallError;

/// Prints `value` as pretty JSON.
///
/// Highlighting is applied only when stdout is a terminal so piped output
/// stays machine readable.
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), DeskwallError> {
    let json = serde_json::to_string_pretty(value)?;

    if std::io::stdout().is_terminal() {
        println!("{}", highlight_json(&json));
    } else {
        println!("{json}");
    }

    Ok(())
}

/// Applies syntax colors to a pretty-printed JSON document.
///
/// Keys are cyan, strings green, numbers yellow, booleans and null magenta.
#[must_use]
pub fn highlight_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len() * 2);
    let mut chars = json.chars().peekable();
    let mut after_colon = false;

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                let mut literal = String::from('"');
                let mut escaped = false;
                for next in chars.by_ref() {
                    literal.push(next);
                    if escaped {
                        escaped = false;
                    } else if next == '\\' {
                        escaped = true;
                    } else if next == '"' {
                        break;
                    }
                }
                let colored = if after_colon { literal.green() } else { literal.cyan() };
                out.push_str(&colored.to_string());
                after_colon = false;
            }
            ':' => {
                out.push(':');
                after_colon = true;
            }
            '{' | '}' | '[' | ']' => {
                out.push_str(&ch.to_string().bold().to_string());
                after_colon = false;
            }
            ',' => {
                out.push(',');
                after_colon = false;
            }
            c if c.is_whitespace() => out.push(c),
            _ => {
                let mut scalar = String::from(ch);
                while let Some(&next) = chars.peek() {
                    if next == ',' || next == '}' || next == ']' || next.is_whitespace() {
                        break;
                    }
                    scalar.push(next);
                    chars.next();
                }
                let colored = match scalar.as_str() {
                    "true" | "false" | "null" => scalar.magenta(),
                    _ => scalar.yellow(),
                };
                out.push_str(&colored.to_string());
                after_colon = false;
            }
        }
    }

    out
}

/// Truncates a string to a maximum number of characters, adding ellipsis if needed.
///
/// Wallpaper paths are usually long; the head is dropped so the file name
/// stays visible.
#[must_use]
pub fn truncate_start(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();

    if char_count <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        "…".to_string()
    } else {
        let skip = char_count - (max_chars - 1);
        let tail: String = s.chars().skip(skip).collect();
        format!("…{tail}")
    }
}

/// Formats a boolean as a colored check mark.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}
