//! Integration tests for the discovery -> catalog -> activation pipeline.

mod common;

use common::{fake_jdk, parse_fake, test_home};
use jdx::catalog::Catalog;
use jdx::config::JdxConfig;
use jdx::pin::{self, PinRequest, ProjectPin};
use jdx::shell::{self, PosixFlavor, ShellDialect};
use jdx::version;
use tempfile::TempDir;

// =============================================================================
// Discovery -> Catalog
// =============================================================================

#[test]
fn test_discovered_record_survives_catalog_round_trip() {
    let jdks_dir = TempDir::new().unwrap();
    let root = fake_jdk(
        jdks_dir.path(),
        "temurin-17",
        "17.0.9",
        "Eclipse Adoptium",
        &["jlink", "jpackage"],
    );
    let record = parse_fake(&root);
    assert_eq!(record.id, "temurin-17");
    assert!(record.has_capability("jlink"));
    assert!(record.has_capability("jpackage"));

    let (_dir, home) = test_home();
    let mut catalog = Catalog::new();
    catalog.add(record.clone());
    catalog.save(&home).unwrap();

    let loaded = Catalog::open(&home).unwrap();
    assert_eq!(loaded.get_all(), vec![record]);
}

#[test]
fn test_release_file_without_bin_yields_no_capabilities() {
    let jdks_dir = TempDir::new().unwrap();
    let root = fake_jdk(jdks_dir.path(), "bare", "21.0.1", "Oracle Corporation", &[]);
    let record = parse_fake(&root);
    assert!(record.capabilities.is_empty());
    assert_eq!(record.id, "oracle-21");
    assert!(record.valid);
}

// =============================================================================
// Version resolver properties
// =============================================================================

#[test]
fn test_every_prefix_of_normalized_version_matches() {
    let jdks_dir = TempDir::new().unwrap();
    let root = fake_jdk(jdks_dir.path(), "jdk", "17.0.9", "Eclipse Adoptium", &[]);
    let mut catalog = Catalog::new();
    catalog.add(parse_fake(&root));

    let normalized = version::normalize("17.0.9");
    for end in 1..=normalized.len() {
        let prefix = &normalized[..end];
        assert!(
            !catalog.find_by_version(prefix).is_empty(),
            "prefix {:?} should match",
            prefix
        );
    }
}

#[test]
fn test_legacy_eight_resolves_by_major_query() {
    let jdks_dir = TempDir::new().unwrap();
    let modern = fake_jdk(jdks_dir.path(), "t17", "17.0.9", "Eclipse Adoptium", &[]);
    let legacy = fake_jdk(jdks_dir.path(), "o8", "1.8.0_392", "Oracle Corporation", &[]);

    let mut catalog = Catalog::new();
    catalog.add(parse_fake(&modern));
    catalog.add(parse_fake(&legacy));

    let seventeen = catalog.find_by_version("17");
    assert_eq!(seventeen.len(), 1);
    assert_eq!(seventeen[0].id, "temurin-17");

    let eight = catalog.find_by_version("8");
    assert_eq!(eight.len(), 1);
    assert_eq!(eight[0].id, "oracle-8");
}

#[test]
fn test_find_by_version_returns_unique_ids_and_only_matches() {
    let jdks_dir = TempDir::new().unwrap();
    let mut catalog = Catalog::new();
    for (name, ver) in [("a", "17.0.9"), ("b", "17.0.11"), ("c", "21.0.1")] {
        let root = fake_jdk(jdks_dir.path(), name, ver, &format!("Vendor {}", name), &[]);
        catalog.add(parse_fake(&root));
    }

    let matches = catalog.find_by_version("17");
    let mut ids: Vec<&str> = matches.iter().map(|j| j.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), matches.len(), "no duplicate ids");
    for jdk in &matches {
        assert!(version::matches(&jdk.version, "17"));
    }
    // Descending numeric order: 17.0.11 above 17.0.9
    assert_eq!(matches[0].version, "17.0.11");
}

// =============================================================================
// Activation scripts
// =============================================================================

#[test]
fn test_activation_script_carries_path_and_version() {
    let jdks_dir = TempDir::new().unwrap();
    let root = fake_jdk(jdks_dir.path(), "t21", "21.0.1", "Eclipse Adoptium", &[]);
    let record = parse_fake(&root);

    for dialect in [
        ShellDialect::Posix(PosixFlavor::Bash),
        ShellDialect::PowerShell,
        ShellDialect::Cmd,
    ] {
        let script = shell::activation_script(&record, dialect);
        let path = record.path.display().to_string();
        assert!(script.contains(&path), "{:?} script missing path", dialect);
        assert!(script.contains("21.0.1"), "{:?} script missing version", dialect);
    }
}

#[test]
fn test_deactivation_restores_from_snapshot_variables() {
    let script = shell::deactivation_script(ShellDialect::Posix(PosixFlavor::Bash));
    // Restoring means assigning the captured values back, then dropping them
    assert!(script.contains("export JAVA_HOME=\"$JDX_PREV_JAVA_HOME\""));
    assert!(script.contains("export PATH=\"$JDX_PREV_PATH\""));
    assert!(script.contains("unset JDX_PREV_JAVA_HOME JDX_PREV_PATH"));
}

#[test]
fn test_persisted_activation_lands_in_jdx_home() {
    let jdks_dir = TempDir::new().unwrap();
    let root = fake_jdk(jdks_dir.path(), "t17", "17.0.9", "Eclipse Adoptium", &[]);
    let record = parse_fake(&root);

    let (_dir, home) = test_home();
    let target =
        shell::persist_activation(&home, &record, ShellDialect::Posix(PosixFlavor::Zsh)).unwrap();
    assert_eq!(target, home.activation_file("activate.sh"));
    let content = std::fs::read_to_string(target).unwrap();
    assert!(content.contains("17.0.9"));
}

// =============================================================================
// Pin workflow scenarios
// =============================================================================

fn seeded_catalog(jdks_dir: &TempDir) -> Catalog {
    let mut catalog = Catalog::new();
    for (name, ver, vendor) in [
        ("t17", "17.0.9", "Eclipse Adoptium"),
        ("t21", "21.0.1", "Eclipse Adoptium"),
    ] {
        let root = fake_jdk(jdks_dir.path(), name, ver, vendor, &[]);
        catalog.add(parse_fake(&root));
    }
    catalog
}

#[test]
fn test_pin_compile_then_runtime_preserves_compile() {
    let jdks_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let catalog = seeded_catalog(&jdks_dir);
    let config = JdxConfig::default();

    let outcome = pin::pin_project(
        &catalog,
        &config,
        project.path(),
        &PinRequest {
            compile: Some("17".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(outcome.pin.project.compile.release, 17);
    // Runtime falls back to the global default
    assert_eq!(outcome.pin.project.runtime.require, config.defaults.runtime);

    let outcome = pin::pin_project(
        &catalog,
        &config,
        project.path(),
        &PinRequest {
            runtime: Some("21".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(outcome.pin.project.runtime.require, "21");
    assert_eq!(outcome.pin.project.compile.release, 17);
}

#[test]
fn test_pin_dry_run_writes_nothing() {
    let jdks_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let catalog = seeded_catalog(&jdks_dir);

    let outcome = pin::pin_project(
        &catalog,
        &JdxConfig::default(),
        project.path(),
        &PinRequest {
            runtime: Some("21".to_string()),
            dry_run: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(outcome.written.is_none());
    assert_eq!(outcome.pin.project.runtime.require, "21");
    assert!(ProjectPin::load(project.path()).unwrap().is_none());
}

#[test]
fn test_pin_unresolvable_runtime_is_error_and_writes_nothing() {
    let jdks_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let catalog = seeded_catalog(&jdks_dir);

    let result = pin::pin_project(
        &catalog,
        &JdxConfig::default(),
        project.path(),
        &PinRequest {
            runtime: Some("99".to_string()),
            ..Default::default()
        },
    );
    assert!(result.is_err());
    assert!(ProjectPin::load(project.path()).unwrap().is_none());
}

#[test]
fn test_pin_file_round_trips_through_toml() {
    let jdks_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let catalog = seeded_catalog(&jdks_dir);

    let outcome = pin::pin_project(
        &catalog,
        &JdxConfig::default(),
        project.path(),
        &PinRequest {
            runtime: Some("21".to_string()),
            compile: Some("17".to_string()),
            vendor: Some("temurin".to_string()),
            ..Default::default()
        },
    )
    .unwrap();

    let reloaded = ProjectPin::load(project.path()).unwrap().unwrap();
    assert_eq!(reloaded, outcome.pin);
    assert_eq!(reloaded.version, 1);
    assert_eq!(reloaded.project.runtime.vendor, "temurin");
}
