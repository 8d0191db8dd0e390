//! Per-OS probing strategy for JDK discovery.
//!
//! The OS is probed once at startup; every discovery path asks the
//! resulting strategy for its candidate roots instead of re-testing
//! the platform string.

use std::path::PathBuf;
use std::process::Command;

/// Which platform convention set to probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    /// Detect the platform the process is running on.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Fixed package-manager-convention directories whose children are
    /// candidate installation roots. Missing directories are skipped by
    /// the caller, never an error.
    pub fn candidate_parents(&self) -> Vec<PathBuf> {
        match self {
            Platform::Linux => {
                let mut parents = vec![PathBuf::from("/usr/lib/jvm")];
                if let Some(home) = dirs::home_dir() {
                    parents.push(home.join("jdks"));
                }
                parents
            }
            Platform::MacOs => vec![PathBuf::from("/Library/Java/JavaVirtualMachines")],
            Platform::Windows => {
                let mut parents = Vec::new();
                for var in ["ProgramFiles", "ProgramFiles(x86)"] {
                    if let Ok(pf) = std::env::var(var) {
                        parents.push(PathBuf::from(&pf).join("Java"));
                        parents.push(PathBuf::from(&pf).join("Microsoft").join("jdk"));
                    }
                }
                parents.push(PathBuf::from("C:\\Program Files\\Java"));
                parents.push(PathBuf::from("C:\\Program Files\\Microsoft\\jdk"));
                parents
            }
        }
    }

    /// On macOS each bundle keeps its JDK root under Contents/Home.
    pub fn installation_root(&self, child: PathBuf) -> PathBuf {
        match self {
            Platform::MacOs => child.join("Contents").join("Home"),
            _ => child,
        }
    }

    /// Installation roots reported by the platform JDK locator utility,
    /// where one exists. A missing or failing locator yields nothing.
    pub fn locator_roots(&self) -> Vec<PathBuf> {
        match self {
            Platform::MacOs => mac_java_home_roots(),
            _ => Vec::new(),
        }
    }

    /// Name of the java executable on this platform.
    pub fn java_exe(&self) -> &'static str {
        match self {
            Platform::Windows => "java.exe",
            _ => "java",
        }
    }
}

/// Parse `/usr/libexec/java_home -V` output. Each JVM line ends with the
/// installation path after the last quoted field:
///
/// ```text
///     21.0.5 (arm64) "Eclipse Adoptium" - "OpenJDK 21.0.5" /Library/Java/JavaVirtualMachines/temurin-21.jdk/Contents/Home
/// ```
fn mac_java_home_roots() -> Vec<PathBuf> {
    let output = match Command::new("/usr/libexec/java_home")
        .arg("-V")
        .output()
    {
        Ok(out) => out,
        Err(_) => return Vec::new(),
    };

    // java_home prints the JVM list on stderr
    let mut roots = Vec::new();
    for stream in [&output.stderr, &output.stdout] {
        let text = String::from_utf8_lossy(stream);
        for line in text.lines() {
            if line.trim().is_empty() || line.contains("Matching") {
                continue;
            }
            if let Some(quote) = line.rfind('"') {
                let candidate = line[quote + 1..].trim();
                if !candidate.is_empty() {
                    let path = PathBuf::from(candidate);
                    if path.exists() {
                        roots.push(path);
                    }
                }
            }
        }
    }
    roots
}
