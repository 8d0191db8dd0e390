//! Persisted catalog of discovered JDKs and the version resolver.
//!
//! The catalog is a plain ordered map from id to record, stored as JSON
//! at `<jdx-home>/catalog.json`:
//!
//! ```json
//! {
//!   "jdks": [
//!     {"id": "temurin-17", "version": "17.0.9", ...}
//!   ]
//! }
//! ```
//!
//! Loading a missing file yields an empty catalog; a present but
//! malformed file is an error naming the path. The catalog is never
//! auto-saved on mutation; callers flush with [`Catalog::save`].

use crate::home::JdxHome;
use crate::model::JdkRecord;
use crate::version;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire format of catalog.json
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogData {
    jdks: Vec<JdkRecord>,
}

/// In-memory catalog, keyed by record id (last write wins).
#[derive(Debug, Default)]
pub struct Catalog {
    entries: BTreeMap<String, JdkRecord>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the catalog from the jdx home, treating a missing file as empty.
    pub fn open(home: &JdxHome) -> Result<Self> {
        let mut catalog = Self::new();
        catalog.load(home)?;
        Ok(catalog)
    }

    /// Upsert a record by id.
    pub fn add(&mut self, record: JdkRecord) {
        self.entries.insert(record.id.clone(), record);
    }

    /// Snapshot of all records.
    pub fn get_all(&self) -> Vec<JdkRecord> {
        self.entries.values().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up a record by its exact id.
    pub fn find_by_id(&self, id: &str) -> Option<&JdkRecord> {
        self.entries.get(id)
    }

    /// All records whose normalized version matches the query, sorted by
    /// descending version, most-preferred first.
    pub fn find_by_version(&self, query: &str) -> Vec<JdkRecord> {
        let mut matches: Vec<JdkRecord> = self
            .entries
            .values()
            .filter(|jdk| version::matches(&jdk.version, query))
            .cloned()
            .collect();
        matches.sort_by(|a, b| version::cmp_versions(&b.version, &a.version));
        matches
    }

    /// Resolve an id-or-version query: exact id first, then best version match.
    pub fn resolve(&self, id_or_version: &str) -> Option<JdkRecord> {
        if let Some(jdk) = self.find_by_id(id_or_version) {
            return Some(jdk.clone());
        }
        self.find_by_version(id_or_version).into_iter().next()
    }

    /// Write the catalog to `<jdx-home>/catalog.json`.
    pub fn save(&self, home: &JdxHome) -> Result<()> {
        let path = home.catalog_file();
        let data = CatalogData {
            jdks: self.get_all(),
        };
        let content =
            serde_json::to_string_pretty(&data).context("Failed to serialize catalog")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write catalog: {}", path.display()))?;
        Ok(())
    }

    /// Replace the in-memory contents from `<jdx-home>/catalog.json`.
    ///
    /// A missing file is a no-op (empty catalog, not an error).
    pub fn load(&mut self, home: &JdxHome) -> Result<()> {
        let path = home.catalog_file();
        if !path.exists() {
            return Ok(());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        let data: CatalogData = serde_json::from_str(&content)
            .with_context(|| format!("Malformed catalog file: {}", path.display()))?;
        self.entries.clear();
        for jdk in data.jdks {
            self.entries.insert(jdk.id.clone(), jdk);
        }
        Ok(())
    }
}
