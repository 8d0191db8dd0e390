//! Per-project pin file (`.jdxrc`) and the pin workflow.
//!
//! A pin records which runtime and compile-target JDK a project wants:
//!
//! ```toml
//! version = 1
//! notes = "This file is maintained by jdx."
//!
//! [project.runtime]
//! require = "21"
//! vendor = "any"
//!
//! [project.compile]
//! release = 17
//! enforce = true
//!
//! [tooling]
//! maven_manage_toolchains = true
//! gradle_manage_toolchain_block = true
//! ide_hint = true
//! ```
//!
//! Updates are merges: fields not supplied on the command line carry
//! over from the existing file unchanged. Nothing is written until
//! every supplied version has been validated against the catalog.

use crate::catalog::Catalog;
use crate::config::JdxConfig;
use crate::version;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PIN_FILE: &str = ".jdxrc";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectPin {
    /// Schema version, currently always 1
    pub version: u32,
    pub project: ProjectSection,
    pub tooling: ToolingSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSection {
    pub runtime: RuntimeSection,
    pub compile: CompileSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeSection {
    /// Version specifier resolved against the catalog
    pub require: String,
    /// Vendor preference, "any" when unconstrained
    pub vendor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileSection {
    /// javac --release target
    pub release: u32,
    pub enforce: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolingSection {
    pub maven_manage_toolchains: bool,
    pub gradle_manage_toolchain_block: bool,
    pub ide_hint: bool,
}

impl ProjectPin {
    /// Fresh pin with sensible defaults; the runtime default comes from
    /// the global config.
    pub fn defaults(config: &JdxConfig) -> Self {
        Self {
            version: 1,
            project: ProjectSection {
                runtime: RuntimeSection {
                    require: config.defaults.runtime.clone(),
                    vendor: "any".to_string(),
                },
                compile: CompileSection {
                    release: 17,
                    enforce: true,
                },
            },
            tooling: ToolingSection {
                maven_manage_toolchains: true,
                gradle_manage_toolchain_block: true,
                ide_hint: true,
            },
            notes: Some("This file is maintained by jdx.".to_string()),
        }
    }

    /// Load the pin file from a project directory, `None` when absent.
    pub fn load(project_dir: &Path) -> Result<Option<Self>> {
        let path = project_dir.join(PIN_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read pin file: {}", path.display()))?;
        let pin = toml::from_str(&content)
            .with_context(|| format!("Malformed pin file: {}", path.display()))?;
        Ok(Some(pin))
    }

    /// Write the pin file into a project directory.
    pub fn save(&self, project_dir: &Path) -> Result<PathBuf> {
        let path = project_dir.join(PIN_FILE);
        let content = toml::to_string_pretty(self).context("Failed to serialize pin")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write pin file: {}", path.display()))?;
        Ok(path)
    }
}

/// What the user asked `jdx pin` to change.
#[derive(Debug, Default)]
pub struct PinRequest {
    pub runtime: Option<String>,
    pub compile: Option<String>,
    pub vendor: Option<String>,
    pub dry_run: bool,
}

/// Result of a pin computation: the effective pin plus any advisory.
#[derive(Debug)]
pub struct PinOutcome {
    pub pin: ProjectPin,
    /// Written file path; `None` for dry runs
    pub written: Option<PathBuf>,
    /// Non-fatal advisory (compile target above runtime version)
    pub advisory: Option<String>,
}

/// Create or update a project pin.
///
/// Validates every supplied version against the catalog before anything
/// is written; fields not supplied carry over from the existing pin.
pub fn pin_project(
    catalog: &Catalog,
    config: &JdxConfig,
    project_dir: &Path,
    request: &PinRequest,
) -> Result<PinOutcome> {
    if request.runtime.is_none() && request.compile.is_none() {
        bail!("Specify at least --runtime or --compile");
    }

    for (flag, spec) in [("runtime", &request.runtime), ("compile", &request.compile)] {
        if let Some(spec) = spec {
            if catalog.find_by_version(spec).is_empty() {
                bail!(
                    "No JDK found for {} version: {}\nRun 'jdx scan' to discover JDKs.",
                    flag,
                    spec
                );
            }
        }
    }

    let mut pin = ProjectPin::load(project_dir)?.unwrap_or_else(|| ProjectPin::defaults(config));

    if let Some(runtime) = &request.runtime {
        pin.project.runtime.require = runtime.clone();
    }
    if let Some(vendor) = &request.vendor {
        pin.project.runtime.vendor = vendor.clone();
    }
    if let Some(compile) = &request.compile {
        pin.project.compile.release = compile
            .parse()
            .with_context(|| format!("Compile target is not a number: {}", compile))?;
    }

    // A runtime below the compile target cannot execute the bytecode;
    // advisory only, the pin is still written.
    let advisory = runtime_below_compile(&pin).then(|| {
        format!(
            "compile target {} is above runtime version {}; the pinned runtime cannot run the resulting bytecode",
            pin.project.compile.release, pin.project.runtime.require
        )
    });

    let written = if request.dry_run {
        None
    } else {
        Some(pin.save(project_dir)?)
    };

    Ok(PinOutcome {
        pin,
        written,
        advisory,
    })
}

fn runtime_below_compile(pin: &ProjectPin) -> bool {
    let major = version::major_of(&pin.project.runtime.require);
    match major.parse::<u32>() {
        Ok(runtime_major) => pin.project.compile.release > runtime_major,
        Err(_) => false,
    }
}
