//! External-tool probes.
//!
//! Every probe swallows launch failures at the boundary: a missing or
//! broken tool simply yields nothing, it never fails the caller.

use std::process::Command;

/// First line a tool prints (stdout merged with stderr — `java -version`
/// writes to stderr). `None` when the tool cannot be launched or prints
/// nothing.
pub fn first_output_line(cmd: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(cmd).args(args).output().ok()?;
    let merged = if output.stdout.is_empty() {
        output.stderr
    } else {
        output.stdout
    };
    String::from_utf8_lossy(&merged)
        .lines()
        .next()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
}

/// All non-empty output lines of a tool, or empty when it cannot run.
pub fn output_lines(cmd: &str, args: &[&str]) -> Vec<String> {
    let Ok(output) = Command::new(cmd).args(args).output() else {
        return Vec::new();
    };
    let merged = if output.stdout.is_empty() {
        output.stderr
    } else {
        output.stdout
    };
    String::from_utf8_lossy(&merged)
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Whether a command resolves on the PATH and exits zero.
pub fn tool_exists(cmd: &str, args: &[&str]) -> bool {
    Command::new(cmd)
        .args(args)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
