//! Global jdx configuration, stored at `<jdx-home>/config.toml`:
//!
//! ```toml
//! [catalog]
//! autorefresh_days = 7
//!
//! [defaults]
//! runtime = "21"
//! vendor_preference = ["microsoft", "temurin", "any"]
//!
//! [safety]
//! require_confirmation_on_persist = true
//!
//! [telemetry]
//! enabled = false
//! ```
//!
//! A missing file means defaults; a malformed file is an error naming
//! the path.

use crate::home::JdxHome;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JdxConfig {
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub defaults: DefaultsSection,
    #[serde(default)]
    pub safety: SafetySection,
    #[serde(default)]
    pub telemetry: TelemetrySection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    pub autorefresh_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsSection {
    pub runtime: String,
    pub vendor_preference: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetySection {
    pub require_confirmation_on_persist: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySection {
    pub enabled: bool,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self { autorefresh_days: 7 }
    }
}

impl Default for DefaultsSection {
    fn default() -> Self {
        Self {
            runtime: "21".to_string(),
            vendor_preference: vec![
                "microsoft".to_string(),
                "temurin".to_string(),
                "any".to_string(),
            ],
        }
    }
}

impl Default for SafetySection {
    fn default() -> Self {
        Self {
            require_confirmation_on_persist: true,
        }
    }
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self { enabled: false }
    }
}

impl Default for JdxConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogSection::default(),
            defaults: DefaultsSection::default(),
            safety: SafetySection::default(),
            telemetry: TelemetrySection::default(),
        }
    }
}

impl JdxConfig {
    /// Load the config, falling back to defaults when no file exists.
    pub fn load(home: &JdxHome) -> Result<Self> {
        let path = home.config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Malformed config file: {}", path.display()))
    }

    /// Write the config to `<jdx-home>/config.toml`.
    pub fn save(&self, home: &JdxHome) -> Result<()> {
        std::fs::create_dir_all(home.root())
            .with_context(|| format!("Failed to create {}", home.root().display()))?;
        let path = home.config_file();
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Read a value by dotted key. Unknown keys are a user error.
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "catalog.autorefresh_days" => self.catalog.autorefresh_days.to_string(),
            "defaults.runtime" => self.defaults.runtime.clone(),
            "defaults.vendor_preference" => self.defaults.vendor_preference.join(","),
            "safety.require_confirmation_on_persist" => {
                self.safety.require_confirmation_on_persist.to_string()
            }
            "telemetry.enabled" => self.telemetry.enabled.to_string(),
            _ => bail!("Unknown configuration key: {}", key),
        };
        Ok(value)
    }

    /// Update a value by dotted key. Unknown keys and unparseable values
    /// are user errors; nothing is written here.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "catalog.autorefresh_days" => {
                self.catalog.autorefresh_days = value
                    .parse()
                    .with_context(|| format!("Not a number: {}", value))?;
            }
            "defaults.runtime" => {
                self.defaults.runtime = value.to_string();
            }
            "defaults.vendor_preference" => {
                self.defaults.vendor_preference = value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            "safety.require_confirmation_on_persist" => {
                self.safety.require_confirmation_on_persist = value
                    .parse()
                    .with_context(|| format!("Not a boolean: {}", value))?;
            }
            "telemetry.enabled" => {
                self.telemetry.enabled = value
                    .parse()
                    .with_context(|| format!("Not a boolean: {}", value))?;
            }
            _ => bail!("Unknown configuration key: {}", key),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_home() -> (TempDir, JdxHome) {
        let dir = TempDir::new().unwrap();
        let home = JdxHome::new(dir.path().to_path_buf());
        (dir, home)
    }

    #[test]
    fn test_defaults() {
        let config = JdxConfig::default();
        assert_eq!(config.catalog.autorefresh_days, 7);
        assert_eq!(config.defaults.runtime, "21");
        assert!(config.safety.require_confirmation_on_persist);
        assert!(!config.telemetry.enabled);
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let (_dir, home) = test_home();
        let config = JdxConfig::load(&home).unwrap();
        assert_eq!(config, JdxConfig::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let (_dir, home) = test_home();
        let mut config = JdxConfig::default();
        config.set("defaults.runtime", "17").unwrap();
        config.set("telemetry.enabled", "true").unwrap();
        config.save(&home).unwrap();

        let loaded = JdxConfig::load(&home).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_get_known_keys() {
        let config = JdxConfig::default();
        assert_eq!(config.get("catalog.autorefresh_days").unwrap(), "7");
        assert_eq!(config.get("defaults.runtime").unwrap(), "21");
        assert_eq!(
            config.get("defaults.vendor_preference").unwrap(),
            "microsoft,temurin,any"
        );
        assert_eq!(config.get("telemetry.enabled").unwrap(), "false");
    }

    #[test]
    fn test_get_unknown_key_is_error() {
        let config = JdxConfig::default();
        assert!(config.get("no.such.key").is_err());
    }

    #[test]
    fn test_set_vendor_preference_splits_commas() {
        let mut config = JdxConfig::default();
        config
            .set("defaults.vendor_preference", "temurin, zulu")
            .unwrap();
        assert_eq!(config.defaults.vendor_preference, vec!["temurin", "zulu"]);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = JdxConfig::default();
        assert!(config.set("catalog.autorefresh_days", "soon").is_err());
        assert!(config.set("telemetry.enabled", "maybe").is_err());
        assert!(config.set("no.such.key", "x").is_err());
    }

    #[test]
    fn test_load_malformed_file_names_path() {
        let (_dir, home) = test_home();
        std::fs::write(home.config_file(), "[[broken").unwrap();
        let err = JdxConfig::load(&home).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
