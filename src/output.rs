//! Colored terminal output for jdx
//!
//! Uses owo-colors for terminal colors and indicatif for the deep-scan
//! spinner. Results go to stdout; warnings and errors go to stderr so
//! activation scripts stay clean for `eval`.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Print an action header (blue, bold)
/// Example: "==> Scanning for JDK installations"
pub fn action(message: &str) {
    println!("{} {}", "==>".blue().bold(), message.bold());
}

/// Print a detail line (dimmed, indented)
pub fn detail(message: &str) {
    println!("     {}", message.dimmed());
}

/// Print a success message (green)
pub fn success(message: &str) {
    println!("{} {}", "==>".green().bold(), message.green());
}

/// Print an info message (cyan)
pub fn info(message: &str) {
    println!("{} {}", "::".cyan(), message);
}

/// Print a warning message (yellow, stderr)
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}

/// Print an error message (red, stderr)
pub fn error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message.red());
}

/// Print a passed check
/// Example: "✓ JAVA_HOME is set"
pub fn check_ok(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print a failed check
pub fn check_fail(message: &str) {
    println!("{} {}", "✗".red(), message);
}

/// Print an informational check (neither pass nor fail)
pub fn check_note(message: &str) {
    println!("{} {}", "ℹ".cyan(), message.dimmed());
}

/// Print a catalog entry in list output
pub fn list_item(id: &str, rest: &str, valid: bool) {
    if valid {
        println!("  {} {}", id.green(), rest.dimmed());
    } else {
        println!("  {} {}", id.red(), rest.dimmed());
    }
}

/// Create a spinner for the deep-scan filesystem walk
pub fn scan_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Finish a spinner and clear it
pub fn spinner_done(pb: ProgressBar) {
    pb.finish_and_clear();
}
