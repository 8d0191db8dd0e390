//! Shared fixtures: fake JDK installation trees and isolated jdx homes.

#![allow(dead_code)]

use jdx::home::JdxHome;
use jdx::model::JdkRecord;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create an isolated jdx home inside a temp directory.
pub fn test_home() -> (TempDir, JdxHome) {
    let dir = TempDir::new().unwrap();
    let home = JdxHome::new(dir.path().join(".jdx"));
    home.ensure();
    (dir, home)
}

/// Write a fake JDK installation: a root with a `release` file and a
/// bin/ directory containing the named tools.
pub fn fake_jdk(
    parent: &Path,
    dir_name: &str,
    version: &str,
    vendor: &str,
    tools: &[&str],
) -> PathBuf {
    let root = parent.join(dir_name);
    let bin = root.join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    std::fs::write(
        root.join("release"),
        format!(
            "JAVA_VERSION=\"{}\"\nIMPLEMENTOR=\"{}\"\nOS_ARCH=\"x86_64\"\n",
            version, vendor
        ),
    )
    .unwrap();
    for tool in tools {
        std::fs::write(bin.join(tool), "").unwrap();
    }
    root
}

/// Build a record the way discovery would for a fake installation.
pub fn parse_fake(root: &Path) -> JdkRecord {
    jdx::discovery::parse_jdk(root).expect("fixture should parse as a JDK")
}
