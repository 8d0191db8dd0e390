//! The jdx home directory (default `~/.jdx`).
//!
//! The root is computed once at startup and threaded into every component
//! explicitly, so tests can substitute an isolated directory without
//! touching process-wide environment.

use crate::output;
use std::path::{Path, PathBuf};

/// Root directory for jdx state: catalog, global config, activation scripts.
#[derive(Debug, Clone)]
pub struct JdxHome {
    root: PathBuf,
}

impl JdxHome {
    /// Wrap an explicit root directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve the default root: `~/.jdx`, falling back to `./.jdx` when
    /// the home directory cannot be determined.
    pub fn resolve() -> Self {
        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(".jdx"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn catalog_file(&self) -> PathBuf {
        self.root.join("catalog.json")
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Fixed activation-script path for a dialect family file name.
    pub fn activation_file(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Create the root directory if absent. Failure is reported as a
    /// warning; state is simply not durable for this invocation.
    pub fn ensure(&self) {
        if self.root.exists() {
            return;
        }
        if let Err(e) = std::fs::create_dir_all(&self.root) {
            output::warning(&format!(
                "could not create {}: {}",
                self.root.display(),
                e
            ));
        }
    }
}
