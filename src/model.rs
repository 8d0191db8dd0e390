//! Core data model: one record per discovered JDK installation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// One discovered JDK installation.
///
/// Records are plain values compared by all fields; discovery dedupes by
/// `id`, and the catalog enforces `id` uniqueness as its map key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JdkRecord {
    /// Stable unique key within a catalog (e.g. "temurin-17")
    pub id: String,
    /// Vendor-reported version string, legacy "1.8.x" or modern "NN.m.p"
    pub version: String,
    /// Implementor name from the release file
    pub vendor: String,
    /// CPU architecture reported by the installation
    pub arch: String,
    /// Absolute root of the installation (the directory containing bin/)
    pub path: PathBuf,
    /// Optional tools present under bin/ ("jlink", "jpackage")
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
    /// True iff metadata parsed successfully (true by construction)
    pub valid: bool,
}

impl JdkRecord {
    /// Whether the installation has the named optional tool.
    pub fn has_capability(&self, name: &str) -> bool {
        self.capabilities.contains(name)
    }
}
