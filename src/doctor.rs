//! `jdx doctor`: common-problem checks with suggested fixes.

use crate::catalog::Catalog;
use crate::foreign;
use crate::home::JdxHome;
use crate::output;
use std::path::PathBuf;

/// Run all doctor checks. Returns true when no issues were found.
pub fn run(home: &JdxHome) -> bool {
    let mut all_ok = true;

    all_ok &= check_home(home);
    all_ok &= check_catalog(home);
    all_ok &= check_java_on_path();
    all_ok &= check_java_home();
    check_maven_toolchains();
    all_ok &= check_foreign_managers();

    all_ok
}

fn check_home(home: &JdxHome) -> bool {
    if home.root().exists() {
        output::check_ok(&format!("{} exists", home.root().display()));
        true
    } else {
        output::check_fail(&format!("{} not found", home.root().display()));
        output::detail("run 'jdx scan' to create it");
        false
    }
}

fn check_catalog(home: &JdxHome) -> bool {
    let catalog = match Catalog::open(home) {
        Ok(catalog) => catalog,
        Err(e) => {
            output::check_fail(&format!("catalog unreadable: {:#}", e));
            return false;
        }
    };
    if catalog.is_empty() {
        output::check_fail("no JDKs in catalog");
        output::detail("run 'jdx scan' to discover JDKs");
        return false;
    }
    output::check_ok(&format!("catalog contains {} JDK(s)", catalog.len()));
    let broken = catalog.get_all().iter().filter(|j| !j.valid).count();
    if broken > 0 {
        output::warning(&format!("{} broken JDK(s) in catalog", broken));
        output::detail("run 'jdx list' to see details");
    }
    true
}

fn check_java_on_path() -> bool {
    let exe = if cfg!(target_os = "windows") {
        "java.exe"
    } else {
        "java"
    };
    let found = std::env::var_os("PATH")
        .map(|path| {
            std::env::split_paths(&path)
                .map(|dir| dir.join(exe))
                .find(|candidate| candidate.exists())
        })
        .unwrap_or(None);

    match found {
        Some(path) => {
            output::check_ok(&format!("java found in PATH: {}", path.display()));
            true
        }
        None => {
            output::check_fail("java not found in PATH");
            output::detail("run: eval \"$(jdx use <version>)\"");
            false
        }
    }
}

fn check_java_home() -> bool {
    match std::env::var("JAVA_HOME") {
        Ok(java_home) if !java_home.is_empty() => {
            if PathBuf::from(&java_home).exists() {
                output::check_ok(&format!("JAVA_HOME is set: {}", java_home));
                true
            } else {
                output::check_fail(&format!(
                    "JAVA_HOME points to a non-existent directory: {}",
                    java_home
                ));
                output::detail("run: eval \"$(jdx use <version>)\"");
                false
            }
        }
        _ => {
            output::check_fail("JAVA_HOME not set");
            output::detail("run: eval \"$(jdx use <version>)\"");
            false
        }
    }
}

fn check_maven_toolchains() {
    let toolchains = dirs::home_dir()
        .unwrap_or_default()
        .join(".m2")
        .join("toolchains.xml");
    if toolchains.exists() {
        output::check_ok("Maven toolchains.xml exists");
    } else {
        output::check_note("Maven toolchains.xml not found (optional)");
        output::detail("create with: jdx pin --project --compile <version>");
    }
}

fn check_foreign_managers() -> bool {
    let managers = foreign::detect();
    if managers.is_empty() {
        output::check_ok("no conflicting JDK managers detected");
        return true;
    }
    for manager in &managers {
        match &manager.root {
            Some(root) => output::warning(&format!(
                "{} detected ({})",
                manager.name,
                root.display()
            )),
            None => output::warning(&format!("{} detected", manager.name)),
        }
    }
    output::detail("multiple JDK managers may conflict");
    output::detail("run 'jdx detect-foreign' for more details");
    false
}
