//! `jdx verify` checks: active toolchain sanity plus project tooling.
//!
//! Absent optional tools (Maven, Gradle) are a normal, reportable state,
//! not a failure. The command exits 4 when a required check fails.

use crate::output;
use crate::pin::ProjectPin;
use crate::probe;
use anyhow::Result;
use std::path::Path;

/// Which tooling checks to run; all by default.
#[derive(Debug, Default, Clone, Copy)]
pub struct VerifyFilter {
    pub maven_only: bool,
    pub gradle_only: bool,
    pub ide: bool,
}

/// Run verification against the current environment and project.
/// Returns true when every check passed.
pub fn run(project_dir: &Path, filter: VerifyFilter) -> Result<bool> {
    let mut all_ok = true;

    all_ok &= check_tool_version("java");
    all_ok &= check_tool_version("javac");

    match ProjectPin::load(project_dir)? {
        Some(pin) => {
            if !filter.gradle_only {
                all_ok &= verify_maven(&pin);
            }
            if !filter.maven_only {
                all_ok &= verify_gradle(project_dir, &pin);
            }
            if filter.ide {
                print_ide_hints();
            }
        }
        None => {
            output::check_note("No .jdxrc found, skipping project verification");
        }
    }

    Ok(all_ok)
}

fn check_tool_version(tool: &str) -> bool {
    match probe::first_output_line(tool, &["-version"]) {
        Some(line) => {
            output::check_ok(&format!("{} -version: {}", tool, line));
            true
        }
        None => {
            output::check_fail(&format!("{} not found on PATH", tool));
            false
        }
    }
}

fn verify_maven(pin: &ProjectPin) -> bool {
    let Some(line) = probe::first_output_line("mvn", &["-version"]) else {
        output::check_note("Maven not installed (skipping Maven checks)");
        return true;
    };
    output::check_ok(&format!("Maven found: {}", line));

    let toolchains = dirs::home_dir()
        .unwrap_or_default()
        .join(".m2")
        .join("toolchains.xml");
    if toolchains.exists() {
        output::check_ok("Maven toolchains.xml exists");
        true
    } else {
        output::check_fail("Maven toolchains.xml not found");
        output::detail(&format!(
            "run 'jdx pin --project --compile {}'",
            pin.project.compile.release
        ));
        false
    }
}

fn verify_gradle(project_dir: &Path, pin: &ProjectPin) -> bool {
    let lines = probe::output_lines("gradle", &["-version"]);
    let Some(line) = lines.iter().find(|l| l.contains("Gradle")) else {
        output::check_note("Gradle not installed (skipping Gradle checks)");
        return true;
    };
    output::check_ok(&format!("Gradle found: {}", line));

    let jdx_gradle = project_dir.join("gradle").join("jdx.gradle");
    if jdx_gradle.exists() {
        output::check_ok("Gradle toolchain configuration exists");
    } else {
        output::check_note("Gradle toolchain not configured");
        output::detail(&format!(
            "run 'jdx pin --project --compile {}'",
            pin.project.compile.release
        ));
    }
    true
}

fn print_ide_hints() {
    output::info("IDE configuration:");
    output::detail("IntelliJ IDEA: configure Project SDK and Maven/Gradle JDK in Settings");
    output::detail("VS Code: configure java.configuration.runtimes in settings.json");
    output::detail("Eclipse: configure Installed JREs in Preferences");
}
