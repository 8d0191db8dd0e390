//! Detection of third-party JDK managers (jenv, SDKMAN, mise, asdf).
//!
//! Environment markers are read, never written; detection exists only
//! to warn about activation conflicts.

use crate::probe;
use std::path::PathBuf;

/// One detected manager, with the marker that gave it away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignManager {
    pub name: &'static str,
    /// Root directory, when an env marker names one
    pub root: Option<PathBuf>,
}

/// Detect known JDK managers on this machine.
pub fn detect() -> Vec<ForeignManager> {
    let mut detected = Vec::new();
    let home = dirs::home_dir();

    // Root priority: explicit env marker, then the home-relative tree
    let jenv_root = env_dir("JENV_ROOT").or_else(|| home_tree(home.as_ref(), ".jenv"));
    if jenv_root.is_some() || probe::tool_exists("jenv", &["--version"]) {
        detected.push(ForeignManager {
            name: "jenv",
            root: jenv_root,
        });
    }

    let sdkman_root = env_dir("SDKMAN_DIR")
        .filter(|p| p.exists())
        .or_else(|| home_tree(home.as_ref(), ".sdkman"));
    if sdkman_root.is_some() {
        detected.push(ForeignManager {
            name: "SDKMAN",
            root: sdkman_root,
        });
    }

    if probe::tool_exists("mise", &["--version"]) {
        detected.push(ForeignManager {
            name: "mise",
            root: env_dir("MISE_DATA_DIR"),
        });
    } else {
        let asdf_root = env_dir("ASDF_DIR")
            .filter(|p| p.exists())
            .or_else(|| home_tree(home.as_ref(), ".asdf"));
        if asdf_root.is_some() {
            detected.push(ForeignManager {
                name: "asdf",
                root: asdf_root,
            });
        }
    }

    detected
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// The manager's home-relative tree, when it exists.
fn home_tree(home: Option<&PathBuf>, name: &str) -> Option<PathBuf> {
    home.map(|h| h.join(name)).filter(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_home_tree_reports_existing_root() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".jenv")).unwrap();
        let home = Some(dir.path().to_path_buf());

        assert_eq!(
            home_tree(home.as_ref(), ".jenv"),
            Some(dir.path().join(".jenv"))
        );
        assert_eq!(home_tree(home.as_ref(), ".sdkman"), None);
        assert_eq!(home_tree(None, ".jenv"), None);
    }
}
