//! JDK management CLI for jdx
//!
//! jdx discovers JDK installations on the local machine, keeps a
//! persisted catalog of them, resolves version specifiers against that
//! catalog, and switches the active JDK by emitting reversible shell
//! activation scripts.
//!
//! # Pipeline
//!
//! - [`discovery`] probes platform-conventional locations, the PATH,
//!   the platform JDK locator, and `JAVA_HOME`, parsing each candidate's
//!   `release` file into a [`model::JdkRecord`].
//! - [`catalog`] persists discovered records as JSON under the jdx home
//!   and answers "which installed JDK satisfies this version specifier".
//! - [`shell`] turns a resolved record into an activation script for the
//!   detected shell dialect, with a matching deactivation inverse.
//! - [`pin`] records per-project runtime/compile-target intent in a
//!   `.jdxrc` file, validated against the catalog.
//!
//! jdx only observes JDKs already present on disk; it never downloads
//! or installs anything.

pub mod catalog;
pub mod config;
pub mod discovery;
pub mod doctor;
pub mod foreign;
pub mod home;
pub mod model;
pub mod output;
pub mod pin;
pub mod probe;
pub mod shell;
pub mod verify;
pub mod version;
