//! jdx CLI - JDK discovery, cataloging, and shell activation
//!
//! Usage:
//!   jdx scan [--deep]              Discover JDKs and update the catalog
//!   jdx list [--json]              List cataloged JDKs
//!   jdx info <id-or-version>       Show details for one JDK
//!   jdx use <id-or-version>        Print an activation script
//!   jdx deactivate                 Print the deactivation script
//!   jdx pin --project ...          Pin versions for a project (.jdxrc)
//!   jdx apply [--strict]           Apply the project pin
//!   jdx verify                     Check toolchain configuration
//!   jdx config get|set <key>       Global configuration
//!   jdx detect-foreign             Detect other JDK managers
//!   jdx doctor                     Diagnose common problems

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use jdx::catalog::Catalog;
use jdx::config::JdxConfig;
use jdx::home::JdxHome;
use jdx::model::JdkRecord;
use jdx::pin::{self, PinRequest, ProjectPin};
use jdx::shell::ShellDialect;
use jdx::verify::VerifyFilter;
use jdx::{discovery, doctor, foreign, output, shell, verify};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code for failed verification checks
const EXIT_VERIFY_FAILED: u8 = 4;

#[derive(Parser)]
#[command(name = "jdx")]
#[command(about = "JDK management CLI - discover, catalog, and switch JDKs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// jdx state directory (catalog, config, activation scripts)
    #[arg(long, global = true, env = "JDX_HOME")]
    jdx_home: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan for installed JDKs and update the catalog
    Scan {
        /// Also search version-manager trees and a bounded filesystem sweep
        #[arg(long)]
        deep: bool,
    },

    /// List all cataloged JDKs
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show detailed information about one JDK
    Info {
        /// JDK id or version specifier
        id_or_version: String,
    },

    /// Print an activation script for the selected JDK
    Use {
        /// JDK id or version specifier
        id_or_version: String,

        /// Target shell dialect (bash, zsh, fish, powershell, cmd);
        /// detected from the environment when omitted
        #[arg(long)]
        shell: Option<String>,

        /// Also write the script to the jdx home for shell profiles to source
        #[arg(long)]
        persist: bool,

        /// Show what would be activated without emitting the script
        #[arg(long)]
        dry_run: bool,
    },

    /// Print a script restoring the pre-activation environment
    Deactivate,

    /// Pin JDK versions for the project (.jdxrc)
    Pin {
        /// Apply to project scope (required)
        #[arg(long, required = true)]
        project: bool,

        /// Runtime JDK version specifier
        #[arg(long)]
        runtime: Option<String>,

        /// Compile target release number
        #[arg(long)]
        compile: Option<String>,

        /// Preferred vendor
        #[arg(long)]
        vendor: Option<String>,

        /// Compute and show the result without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Project directory (defaults to the current directory)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// Apply the project pin to the current environment
    Apply {
        /// Fail when the pin cannot be applied exactly
        #[arg(long)]
        strict: bool,
    },

    /// Verify JDK and build-tool configuration
    Verify {
        /// Only verify Maven configuration
        #[arg(long)]
        maven: bool,

        /// Only verify Gradle configuration
        #[arg(long)]
        gradle: bool,

        /// Also print IDE configuration hints
        #[arg(long)]
        ide: bool,
    },

    /// Get or set global configuration values
    Config {
        #[command(subcommand)]
        op: ConfigOp,
    },

    /// Detect other JDK managers (jenv, SDKMAN, mise/asdf)
    DetectForeign,

    /// Check for common problems and suggest fixes
    Doctor,
}

#[derive(Subcommand)]
enum ConfigOp {
    /// Print a configuration value
    Get {
        /// Dotted key, e.g. defaults.runtime
        key: String,
    },
    /// Update a configuration value
    Set {
        /// Dotted key, e.g. defaults.runtime
        key: String,
        value: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let home = cli
        .jdx_home
        .map(JdxHome::new)
        .unwrap_or_else(JdxHome::resolve);

    match run(cli.command, &home) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::from(1)
        }
    }
}

fn run(command: Commands, home: &JdxHome) -> Result<u8> {
    match command {
        Commands::Scan { deep } => cmd_scan(home, deep),
        Commands::List { json } => cmd_list(home, json),
        Commands::Info { id_or_version } => cmd_info(home, &id_or_version),
        Commands::Use {
            id_or_version,
            shell,
            persist,
            dry_run,
        } => cmd_use(home, &id_or_version, shell.as_deref(), persist, dry_run),
        Commands::Deactivate => {
            print!("{}", shell::deactivation_script(ShellDialect::detect()));
            Ok(0)
        }
        Commands::Pin {
            project: _,
            runtime,
            compile,
            vendor,
            dry_run,
            project_dir,
        } => cmd_pin(
            home,
            &project_dir,
            PinRequest {
                runtime,
                compile,
                vendor,
                dry_run,
            },
        ),
        Commands::Apply { strict } => cmd_apply(home, strict),
        Commands::Verify { maven, gradle, ide } => {
            output::action("Verifying JDK configuration");
            let filter = VerifyFilter {
                maven_only: maven,
                gradle_only: gradle,
                ide,
            };
            let ok = verify::run(&std::env::current_dir()?, filter)?;
            if ok {
                output::success("All checks passed");
                Ok(0)
            } else {
                output::error("Some checks failed");
                Ok(EXIT_VERIFY_FAILED)
            }
        }
        Commands::Config { op } => cmd_config(home, op),
        Commands::DetectForeign => cmd_detect_foreign(),
        Commands::Doctor => {
            output::action("Checking system configuration");
            if doctor::run(home) {
                output::success("No issues found");
                Ok(0)
            } else {
                output::warning("Some issues detected. Follow the suggestions above.");
                Ok(1)
            }
        }
    }
}

fn cmd_scan(home: &JdxHome, deep: bool) -> Result<u8> {
    output::action(if deep {
        "Scanning for JDK installations (deep scan)"
    } else {
        "Scanning for JDK installations"
    });

    let jdks = if deep {
        discovery::deep_scan()
    } else {
        discovery::scan()
    };

    if jdks.is_empty() {
        output::info("No JDKs found.");
        return Ok(0);
    }

    output::info(&format!("Found {} JDK(s):", jdks.len()));
    for jdk in &jdks {
        output::detail(&format!(
            "{}: {} ({}) at {}",
            jdk.id,
            jdk.version,
            jdk.vendor,
            jdk.path.display()
        ));
    }

    home.ensure();
    let mut catalog = Catalog::open(home)?;
    for jdk in jdks {
        catalog.add(jdk);
    }
    // State stays in memory even when the flush fails; just not durable
    match catalog.save(home) {
        Ok(()) => output::success("Catalog updated"),
        Err(e) => output::warning(&format!("could not save catalog: {:#}", e)),
    }
    Ok(0)
}

fn cmd_list(home: &JdxHome, json: bool) -> Result<u8> {
    let catalog = Catalog::open(home)?;
    let jdks = catalog.get_all();

    if jdks.is_empty() {
        output::info("No JDKs found. Run 'jdx scan' to discover JDKs.");
        return Ok(0);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&jdks)?);
        return Ok(0);
    }

    println!("{}", list_header());
    for jdk in &jdks {
        output::list_item(
            &format!("{:<22}", jdk.id),
            &format!(
                "{:<14} {:<24} {}",
                jdk.version,
                truncate(&jdk.vendor, 24),
                jdk.path.display()
            ),
            jdk.valid,
        );
    }
    println!("\nTotal: {} JDK(s)", jdks.len());
    Ok(0)
}

fn cmd_info(home: &JdxHome, id_or_version: &str) -> Result<u8> {
    let catalog = Catalog::open(home)?;
    let jdk = resolve_or_fail(&catalog, id_or_version)?;

    output::action(&format!("JDK {}", jdk.id));
    println!("  Version:      {}", jdk.version);
    println!("  Vendor:       {}", jdk.vendor);
    println!("  Architecture: {}", jdk.arch);
    println!("  Path:         {}", jdk.path.display());
    println!("  Status:       {}", if jdk.valid { "valid" } else { "broken" });
    if !jdk.capabilities.is_empty() {
        let caps: Vec<&str> = jdk.capabilities.iter().map(String::as_str).collect();
        println!("  Capabilities: {}", caps.join(", "));
    }
    println!();
    output::info("To use this JDK:");
    output::detail(&format!("eval \"$(jdx use {})\"", jdk.id));
    Ok(0)
}

fn cmd_use(
    home: &JdxHome,
    id_or_version: &str,
    shell_name: Option<&str>,
    persist: bool,
    dry_run: bool,
) -> Result<u8> {
    let catalog = Catalog::open(home)?;
    let jdk = resolve_or_fail(&catalog, id_or_version)?;

    let dialect = match shell_name {
        Some(name) => match ShellDialect::from_name(name) {
            Some(dialect) => dialect,
            None => bail!("Unknown shell: {} (expected bash, zsh, fish, powershell, or cmd)", name),
        },
        None => ShellDialect::detect(),
    };

    if dry_run {
        eprintln!("[dry run] would activate JDK:");
        eprintln!("  ID:      {}", jdk.id);
        eprintln!("  Version: {}", jdk.version);
        eprintln!("  Path:    {}", jdk.path.display());
        eprintln!("  Shell:   {}", dialect);
        return Ok(0);
    }

    if persist {
        // A failed persist loses durability, not the activation itself
        match shell::persist_activation(home, &jdk, dialect) {
            Ok(target) => {
                eprintln!("Activation script written to {}", target.display());
                eprintln!(
                    "Add 'source {}' to your shell profile to make it permanent.",
                    target.display()
                );
            }
            Err(e) => {
                output::warning(&format!("could not persist activation script: {:#}", e));
            }
        }
    }

    // The script goes to stdout so `eval "$(jdx use ...)"` stays clean
    print!("{}", shell::activation_script(&jdk, dialect));
    Ok(0)
}

fn cmd_pin(home: &JdxHome, project_dir: &PathBuf, request: PinRequest) -> Result<u8> {
    let catalog = Catalog::open(home)?;
    let config = JdxConfig::load(home)?;
    let outcome = pin::pin_project(&catalog, &config, project_dir, &request)?;

    if let Some(advisory) = &outcome.advisory {
        output::warning(advisory);
    }

    let pin = &outcome.pin;
    match &outcome.written {
        Some(path) => {
            output::success(&format!("Updated {}", path.display()));
        }
        None => {
            output::info("[dry run] would write .jdxrc:");
        }
    }
    output::detail(&format!(
        "runtime: {} (vendor: {})",
        pin.project.runtime.require, pin.project.runtime.vendor
    ));
    output::detail(&format!(
        "compile: release {} (enforce: {})",
        pin.project.compile.release, pin.project.compile.enforce
    ));
    if outcome.written.is_some() && pin.tooling.maven_manage_toolchains {
        output::detail(&format!(
            "toolchain target: {} (managed by your build tool integration)",
            pin.project.compile.release
        ));
    }
    Ok(0)
}

fn cmd_apply(home: &JdxHome, strict: bool) -> Result<u8> {
    let project_dir = std::env::current_dir()?;
    let Some(project_pin) = ProjectPin::load(&project_dir)? else {
        output::info("No .jdxrc file found in the current directory.");
        if strict {
            return Ok(1);
        }
        output::detail("run 'jdx pin --project --runtime <version>' to create one");
        return Ok(0);
    };

    let runtime_version = &project_pin.project.runtime.require;
    let catalog = Catalog::open(home)?;
    let matches = catalog.find_by_version(runtime_version);
    let Some(jdk) = matches.first() else {
        output::error(&format!(
            "No JDK found for runtime version: {}",
            runtime_version
        ));
        if strict {
            return Ok(1);
        }
        output::detail("run 'jdx scan' to discover JDKs");
        return Ok(0);
    };

    output::info(&format!(
        "Runtime JDK: {} at {}",
        jdk.version,
        jdk.path.display()
    ));
    eprintln!();
    eprintln!("# Run this to activate:");
    eprintln!("#   eval \"$(jdx use {})\"", jdk.id);
    eprintln!();
    print!("{}", shell::activation_script(jdk, ShellDialect::detect()));

    if project_pin.tooling.maven_manage_toolchains || project_pin.tooling.gradle_manage_toolchain_block {
        eprintln!();
        output::info(&format!(
            "Compile target {} is pinned; toolchain files are managed by your build tool integration.",
            project_pin.project.compile.release
        ));
    }
    Ok(0)
}

fn cmd_config(home: &JdxHome, op: ConfigOp) -> Result<u8> {
    match op {
        ConfigOp::Get { key } => {
            let config = JdxConfig::load(home)?;
            println!("{}", config.get(&key)?);
        }
        ConfigOp::Set { key, value } => {
            let mut config = JdxConfig::load(home)?;
            config.set(&key, &value)?;
            config.save(home)?;
            output::info(&format!("Configuration updated: {} = {}", key, value));
        }
    }
    Ok(0)
}

fn cmd_detect_foreign() -> Result<u8> {
    output::action("Detecting other JDK managers");
    let managers = foreign::detect();

    if managers.is_empty() {
        output::info("No other JDK managers detected.");
        output::detail("jdx can safely manage your JDKs");
        return Ok(0);
    }

    for manager in &managers {
        match &manager.root {
            Some(root) => output::check_ok(&format!("{} detected ({})", manager.name, root.display())),
            None => output::check_ok(&format!("{} detected", manager.name)),
        }
    }
    let names: Vec<&str> = managers.iter().map(|m| m.name).collect();
    output::warning(&format!(
        "multiple JDK managers may conflict: {}",
        names.join(", ")
    ));
    output::detail("jdx will manage toolchains but not shell activation");
    Ok(0)
}

// Rows indent 2 and pad the id to 22; the header mirrors that exactly
fn list_header() -> String {
    format!("  {:<22} {:<14} {:<24} {}", "ID", "VERSION", "VENDOR", "PATH")
}

/// Resolve an id-or-version argument, failing with guidance.
fn resolve_or_fail(catalog: &Catalog, id_or_version: &str) -> Result<JdkRecord> {
    match catalog.resolve(id_or_version) {
        Some(jdk) => Ok(jdk),
        None => bail!(
            "JDK not found: {}\nRun 'jdx list' to see available JDKs.",
            id_or_version
        ),
    }
}

// Vendor strings come from arbitrary release files; cut on char
// boundaries, never byte offsets.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{}...", kept)
    }
}
