//! JDK discovery engine
//!
//! Probes platform-conventional install locations, the PATH, the
//! platform JDK locator, and `JAVA_HOME`, parsing each candidate root's
//! `release` metadata file into a [`JdkRecord`]. Discovery never fails:
//! missing or unreadable locations are simply skipped, and the result is
//! deduplicated by id with the first-seen record winning.

mod platform;

pub use platform::Platform;

use crate::model::JdkRecord;
use crate::output;
use crate::version;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Scan standard locations for JDK installations.
pub fn scan() -> Vec<JdkRecord> {
    scan_with(Platform::current(), false)
}

/// Scan standard locations plus version-manager trees and a bounded
/// filesystem sweep.
pub fn deep_scan() -> Vec<JdkRecord> {
    scan_with(Platform::current(), true)
}

fn scan_with(platform: Platform, deep: bool) -> Vec<JdkRecord> {
    let mut found: Vec<JdkRecord> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut push = |record: JdkRecord, found: &mut Vec<JdkRecord>| {
        if seen.insert(record.id.clone()) {
            found.push(record);
        }
    };

    // Primary source: the platform locator utility, where one exists
    for root in platform.locator_roots() {
        if let Some(record) = parse_jdk(&root) {
            push(record, &mut found);
        }
    }

    // Package-manager-convention directories
    for parent in platform.candidate_parents() {
        for child in list_dirs(&parent) {
            let root = platform.installation_root(child);
            if let Some(record) = parse_jdk(&root) {
                push(record, &mut found);
            }
        }
    }

    // Every java executable reachable via PATH, resolved to its root
    for root in path_roots(platform) {
        if let Some(record) = parse_jdk(&root) {
            push(record, &mut found);
        }
    }

    // JAVA_HOME, if set and existing
    if let Ok(java_home) = std::env::var("JAVA_HOME") {
        if !java_home.is_empty() {
            let root = PathBuf::from(java_home);
            if root.exists() {
                if let Some(record) = parse_jdk(&root) {
                    push(record, &mut found);
                }
            }
        }
    }

    if deep {
        for root in deep_roots(platform) {
            if let Some(record) = parse_jdk(&root) {
                push(record, &mut found);
            }
        }
    }

    found
}

/// Children of a directory, ignoring everything unreadable.
fn list_dirs(parent: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    let Ok(entries) = std::fs::read_dir(parent) else {
        return dirs;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    dirs
}

/// Installation roots derived from `java` executables on the PATH.
///
/// Symlinks are resolved to the real executable, then the root is two
/// levels up (bin/java -> bin -> root).
fn path_roots(platform: Platform) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    let Some(path_var) = std::env::var_os("PATH") else {
        return roots;
    };
    for dir in std::env::split_paths(&path_var) {
        let exe = dir.join(platform.java_exe());
        if !exe.exists() {
            continue;
        }
        let Ok(real) = exe.canonicalize() else {
            continue;
        };
        if let Some(root) = real.parent().and_then(|bin| bin.parent()) {
            roots.push(root.to_path_buf());
        }
    }
    roots
}

/// Extra candidate roots for the deep scan: third-party version-manager
/// trees plus a bounded walk of /opt on Linux.
fn deep_roots(platform: Platform) -> Vec<PathBuf> {
    let mut roots = Vec::new();

    if let Some(home) = dirs::home_dir() {
        let manager_parents = [
            home.join(".sdkman").join("candidates").join("java"),
            home.join(".jenv").join("versions"),
            home.join(".asdf").join("installs").join("java"),
            home.join(".gradle").join("jdks"),
            home.join(".jdks"),
        ];
        for parent in manager_parents {
            roots.extend(list_dirs(&parent));
        }
    }

    if platform == Platform::Linux {
        let spinner = output::scan_spinner("searching /opt...");
        for entry in WalkDir::new("/opt")
            .max_depth(3)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.file_type().is_file() && entry.file_name().to_string_lossy() == "release" {
                if let Some(root) = entry.path().parent() {
                    roots.push(root.to_path_buf());
                }
            }
        }
        output::spinner_done(spinner);
    }

    roots
}

/// Parse a candidate root as a JDK installation.
///
/// Requires a `release` metadata file directly under the root; anything
/// else is not a JDK and yields `None`.
pub fn parse_jdk(root: &Path) -> Option<JdkRecord> {
    let release = root.join("release");
    if !release.exists() {
        return None;
    }
    let content = std::fs::read_to_string(&release).ok()?;
    let props = parse_release(&content);

    let release_version = props.get("JAVA_VERSION").cloned();
    let vendor = props
        .get("IMPLEMENTOR")
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string());
    let arch = props
        .get("OS_ARCH")
        .cloned()
        .unwrap_or_else(|| std::env::consts::ARCH.to_string());
    let jdk_version = release_version.unwrap_or_else(|| "unknown".to_string());

    let mut capabilities = BTreeSet::new();
    for tool in ["jlink", "jpackage"] {
        let bin = root.join("bin");
        if bin.join(tool).exists() || bin.join(format!("{}.exe", tool)).exists() {
            capabilities.insert(tool.to_string());
        }
    }

    Some(JdkRecord {
        id: generate_id(root, &vendor, &jdk_version),
        version: jdk_version,
        vendor,
        arch,
        path: root.to_path_buf(),
        capabilities,
        valid: true,
    })
}

/// Parse `KEY="VALUE"` lines from a release file, quotes stripped.
fn parse_release(content: &str) -> BTreeMap<String, String> {
    let mut props = BTreeMap::new();
    for line in content.lines() {
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim().to_string();
            let value = value
                .trim()
                .trim_start_matches('"')
                .trim_end_matches('"')
                .to_string();
            props.insert(key, value);
        }
    }
    props
}

/// Deterministic id for an installation root.
///
/// An installation living inside a version-manager tree keeps the tag
/// that tool already uses (`.sdkman/candidates/java/<tag>`,
/// `.jenv/versions/<tag>`); everything else gets `<short-vendor>-<major>`.
fn generate_id(root: &Path, vendor: &str, jdk_version: &str) -> String {
    if let Some(tag) = manager_tag(root) {
        return tag;
    }
    format!("{}-{}", short_vendor(vendor), version::major_of(jdk_version))
}

/// Extract the tag component for known version-manager layouts.
fn manager_tag(root: &Path) -> Option<String> {
    let components: Vec<String> = root
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    for (i, window) in components.windows(3).enumerate() {
        let is_sdkman = window[0] == ".sdkman" && window[1] == "candidates" && window[2] == "java";
        if is_sdkman {
            return components.get(i + 3).cloned();
        }
    }
    for (i, window) in components.windows(2).enumerate() {
        if window[0] == ".jenv" && window[1] == "versions" {
            return components.get(i + 2).cloned();
        }
    }
    None
}

/// Lowercased, alias-normalized vendor token for id composition.
fn short_vendor(vendor: &str) -> String {
    let lower = vendor.to_lowercase();
    if lower.contains("temurin") || lower.contains("adoptium") {
        return "temurin".to_string();
    }
    if lower.contains("oracle") {
        return "oracle".to_string();
    }
    if lower.contains("microsoft") {
        return "microsoft".to_string();
    }
    if lower.contains("amazon") || lower.contains("corretto") {
        return "corretto".to_string();
    }
    if lower.contains("azul") || lower.contains("zulu") {
        return "zulu".to_string();
    }
    if lower.contains("graal") {
        return "graalvm".to_string();
    }
    let token: String = lower
        .split_whitespace()
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    if token.is_empty() {
        "openjdk".to_string()
    } else {
        token
    }
}
