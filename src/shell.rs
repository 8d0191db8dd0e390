//! Shell activation engine
//!
//! Turns a resolved [`JdkRecord`] into an environment transition script
//! for the detected shell dialect, with a matching inverse. Activation
//! captures the previous `JAVA_HOME`/`PATH` in `JDX_PREV_*` variables;
//! deactivation restores exactly that snapshot. Only one level of undo
//! exists: activating twice discards the state from before the first
//! activation.

use crate::home::JdxHome;
use crate::model::JdkRecord;
use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;

/// POSIX shell variants, distinguished only for detection and display;
/// they all receive the same script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosixFlavor {
    Bash,
    Zsh,
    Fish,
}

/// Closed set of supported shell dialects. Adding a dialect is a
/// compiler-checked exhaustiveness failure in every generation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellDialect {
    Posix(PosixFlavor),
    PowerShell,
    Cmd,
}

impl ShellDialect {
    /// Detect the current shell. `SHELL` names a POSIX variant; when it
    /// is unset we assume a Windows host and distinguish PowerShell from
    /// cmd.exe by the presence of `PSModulePath`.
    pub fn detect() -> Self {
        match std::env::var("SHELL") {
            Ok(shell) => {
                if shell.contains("zsh") {
                    ShellDialect::Posix(PosixFlavor::Zsh)
                } else if shell.contains("fish") {
                    ShellDialect::Posix(PosixFlavor::Fish)
                } else {
                    ShellDialect::Posix(PosixFlavor::Bash)
                }
            }
            Err(_) => {
                if std::env::var_os("PSModulePath").is_some() {
                    ShellDialect::PowerShell
                } else {
                    ShellDialect::Cmd
                }
            }
        }
    }

    /// Look up a dialect by user-supplied name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "bash" | "sh" | "posix" => Some(ShellDialect::Posix(PosixFlavor::Bash)),
            "zsh" => Some(ShellDialect::Posix(PosixFlavor::Zsh)),
            "fish" => Some(ShellDialect::Posix(PosixFlavor::Fish)),
            "powershell" | "pwsh" => Some(ShellDialect::PowerShell),
            "cmd" | "batch" => Some(ShellDialect::Cmd),
            _ => None,
        }
    }

    /// Fixed activation-script file name for this dialect family.
    pub fn activation_file_name(&self) -> &'static str {
        match self {
            ShellDialect::Posix(_) => "activate.sh",
            ShellDialect::PowerShell => "activate.ps1",
            ShellDialect::Cmd => "activate.cmd",
        }
    }
}

impl fmt::Display for ShellDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellDialect::Posix(PosixFlavor::Bash) => write!(f, "bash"),
            ShellDialect::Posix(PosixFlavor::Zsh) => write!(f, "zsh"),
            ShellDialect::Posix(PosixFlavor::Fish) => write!(f, "fish"),
            ShellDialect::PowerShell => write!(f, "powershell"),
            ShellDialect::Cmd => write!(f, "cmd"),
        }
    }
}

/// Generate the activation script for a JDK and dialect.
///
/// Pure function of its inputs; the script saves the previous
/// `JAVA_HOME`/`PATH`, exports the new `JAVA_HOME`, and rebuilds `PATH`
/// with the JDK's bin directory first.
pub fn activation_script(jdk: &JdkRecord, dialect: ShellDialect) -> String {
    match dialect {
        ShellDialect::Posix(_) => posix_activation(jdk),
        ShellDialect::PowerShell => powershell_activation(jdk),
        ShellDialect::Cmd => cmd_activation(jdk),
    }
}

/// Generate the inverse script: restore `JAVA_HOME`/`PATH` from the
/// `JDX_PREV_*` snapshot and clear it. With no prior activation this
/// restores empty values.
pub fn deactivation_script(dialect: ShellDialect) -> String {
    match dialect {
        ShellDialect::Posix(_) => posix_deactivation(),
        ShellDialect::PowerShell => powershell_deactivation(),
        ShellDialect::Cmd => cmd_deactivation(),
    }
}

fn posix_activation(jdk: &JdkRecord) -> String {
    let path = jdk.path.display();
    let mut script = String::new();
    script.push_str("# Save current JAVA_HOME\n");
    script.push_str("export JDX_PREV_JAVA_HOME=\"$JAVA_HOME\"\n");
    script.push_str("export JDX_PREV_PATH=\"$PATH\"\n\n");
    script.push_str(&format!(
        "# Activate JDK: {} ({})\n",
        jdk.version, jdk.vendor
    ));
    script.push_str(&format!("export JAVA_HOME=\"{}\"\n", path));
    script.push_str("# Clean PATH of Java entries and add new JDK\n");
    // The embedded pipeline drops existing java/jdk/jre segments before
    // re-joining the remainder behind the new bin directory.
    script.push_str(&format!(
        "export PATH=\"{}/bin:$(echo $PATH | tr ':' '\\n' | grep -v '/java\\|/jdk\\|/jre' | tr '\\n' ':' | sed 's/:$//')\"\n",
        path
    ));
    script
}

fn powershell_activation(jdk: &JdkRecord) -> String {
    let path = jdk.path.display();
    let mut script = String::new();
    script.push_str("# Save current JAVA_HOME\n");
    script.push_str("$env:JDX_PREV_JAVA_HOME = $env:JAVA_HOME\n");
    script.push_str("$env:JDX_PREV_PATH = $env:PATH\n\n");
    script.push_str(&format!(
        "# Activate JDK: {} ({})\n",
        jdk.version, jdk.vendor
    ));
    script.push_str(&format!("$env:JAVA_HOME = \"{}\"\n", path));
    script.push_str(&format!("$env:PATH = \"{}\\bin;$env:PATH\"\n", path));
    script
}

fn cmd_activation(jdk: &JdkRecord) -> String {
    let path = jdk.path.display();
    let mut script = String::new();
    script.push_str("@echo off\n");
    script.push_str("set JDX_PREV_JAVA_HOME=%JAVA_HOME%\n");
    script.push_str("set JDX_PREV_PATH=%PATH%\n");
    script.push_str(&format!(
        "REM Activate JDK: {} ({})\n",
        jdk.version, jdk.vendor
    ));
    script.push_str(&format!("set JAVA_HOME={}\n", path));
    script.push_str(&format!("set PATH={}\\bin;%PATH%\n", path));
    script
}

fn posix_deactivation() -> String {
    let mut script = String::new();
    script.push_str("# Restore previous JAVA_HOME and PATH\n");
    script.push_str("export JAVA_HOME=\"$JDX_PREV_JAVA_HOME\"\n");
    script.push_str("export PATH=\"$JDX_PREV_PATH\"\n");
    script.push_str("unset JDX_PREV_JAVA_HOME JDX_PREV_PATH\n");
    script
}

fn powershell_deactivation() -> String {
    let mut script = String::new();
    script.push_str("# Restore previous JAVA_HOME and PATH\n");
    script.push_str("$env:JAVA_HOME = $env:JDX_PREV_JAVA_HOME\n");
    script.push_str("$env:PATH = $env:JDX_PREV_PATH\n");
    script.push_str("Remove-Item Env:JDX_PREV_JAVA_HOME -ErrorAction SilentlyContinue\n");
    script.push_str("Remove-Item Env:JDX_PREV_PATH -ErrorAction SilentlyContinue\n");
    script
}

fn cmd_deactivation() -> String {
    let mut script = String::new();
    script.push_str("@echo off\n");
    script.push_str("REM Restore previous JAVA_HOME and PATH\n");
    script.push_str("set JAVA_HOME=%JDX_PREV_JAVA_HOME%\n");
    script.push_str("set PATH=%JDX_PREV_PATH%\n");
    script.push_str("set JDX_PREV_JAVA_HOME=\n");
    script.push_str("set JDX_PREV_PATH=\n");
    script
}

/// Write the activation script to the dialect's fixed file under the
/// jdx home, creating the directory and overwriting prior content.
pub fn persist_activation(
    home: &JdxHome,
    jdk: &JdkRecord,
    dialect: ShellDialect,
) -> Result<PathBuf> {
    std::fs::create_dir_all(home.root())
        .with_context(|| format!("Failed to create {}", home.root().display()))?;
    let target = home.activation_file(dialect.activation_file_name());
    let script = activation_script(jdk, dialect);
    std::fs::write(&target, script)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn record() -> JdkRecord {
        JdkRecord {
            id: "temurin-17".to_string(),
            version: "17.0.9".to_string(),
            vendor: "Eclipse Adoptium".to_string(),
            arch: "x86_64".to_string(),
            path: PathBuf::from("/usr/lib/jvm/temurin-17"),
            capabilities: BTreeSet::new(),
            valid: true,
        }
    }

    #[test]
    fn test_posix_activation_contains_path_and_version() {
        let script = activation_script(&record(), ShellDialect::Posix(PosixFlavor::Bash));
        assert!(script.contains("/usr/lib/jvm/temurin-17"));
        assert!(script.contains("17.0.9"));
        assert!(script.contains("export JDX_PREV_JAVA_HOME=\"$JAVA_HOME\""));
        assert!(script.contains("export JAVA_HOME=\"/usr/lib/jvm/temurin-17\""));
        assert!(script.contains("/usr/lib/jvm/temurin-17/bin"));
    }

    #[test]
    fn test_posix_activation_filters_old_java_paths() {
        let script = activation_script(&record(), ShellDialect::Posix(PosixFlavor::Zsh));
        assert!(script.contains("grep -v '/java\\|/jdk\\|/jre'"));
    }

    #[test]
    fn test_powershell_activation_syntax() {
        let script = activation_script(&record(), ShellDialect::PowerShell);
        assert!(script.contains("$env:JAVA_HOME = \"/usr/lib/jvm/temurin-17\""));
        assert!(script.contains("$env:JDX_PREV_PATH = $env:PATH"));
        assert!(script.contains("17.0.9"));
    }

    #[test]
    fn test_cmd_activation_syntax() {
        let script = activation_script(&record(), ShellDialect::Cmd);
        assert!(script.starts_with("@echo off\n"));
        assert!(script.contains("set JAVA_HOME=/usr/lib/jvm/temurin-17"));
        assert!(script.contains("17.0.9"));
    }

    #[test]
    fn test_posix_deactivation_restores_snapshot() {
        let script = deactivation_script(ShellDialect::Posix(PosixFlavor::Bash));
        assert!(script.contains("export JAVA_HOME=\"$JDX_PREV_JAVA_HOME\""));
        assert!(script.contains("export PATH=\"$JDX_PREV_PATH\""));
        assert!(script.contains("unset JDX_PREV_JAVA_HOME JDX_PREV_PATH"));
    }

    #[test]
    fn test_cmd_deactivation_clears_snapshot() {
        let script = deactivation_script(ShellDialect::Cmd);
        assert!(script.contains("set JAVA_HOME=%JDX_PREV_JAVA_HOME%"));
        assert!(script.contains("set JDX_PREV_PATH=\n"));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            ShellDialect::from_name("zsh"),
            Some(ShellDialect::Posix(PosixFlavor::Zsh))
        );
        assert_eq!(ShellDialect::from_name("pwsh"), Some(ShellDialect::PowerShell));
        assert_eq!(ShellDialect::from_name("CMD"), Some(ShellDialect::Cmd));
        assert_eq!(ShellDialect::from_name("tcsh"), None);
    }

    #[test]
    fn test_activation_file_names() {
        assert_eq!(
            ShellDialect::Posix(PosixFlavor::Fish).activation_file_name(),
            "activate.sh"
        );
        assert_eq!(ShellDialect::PowerShell.activation_file_name(), "activate.ps1");
        assert_eq!(ShellDialect::Cmd.activation_file_name(), "activate.cmd");
    }

    #[test]
    fn test_persist_activation_creates_dir_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let home = JdxHome::new(dir.path().join(".jdx"));
        let dialect = ShellDialect::Posix(PosixFlavor::Bash);

        let target = persist_activation(&home, &record(), dialect).unwrap();
        assert!(target.ends_with("activate.sh"));
        let first = std::fs::read_to_string(&target).unwrap();
        assert!(first.contains("17.0.9"));

        let mut other = record();
        other.version = "21.0.1".to_string();
        persist_activation(&home, &other, dialect).unwrap();
        let second = std::fs::read_to_string(&target).unwrap();
        assert!(second.contains("21.0.1"));
        assert!(!second.contains("17.0.9"));
    }
}
