//! # Configuration
//!
//! Settings live in `config.json` inside the data directory. A missing file
//! means defaults; missing keys fall back per field.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `inactive-values` | `keep` | `keep` retains deactivated values already selected for a product; `drop` prunes them when a session opens |
//! | `output` | `table` | CLI rendering: `table` or `json` |

use crate::error::{Result, VarcartError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// What happens to selected values that have been deactivated in the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InactivePolicy {
    #[default]
    Keep,
    Drop,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl fmt::Display for InactivePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InactivePolicy::Keep => write!(f, "keep"),
            InactivePolicy::Drop => write!(f, "drop"),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarcartConfig {
    #[serde(default)]
    pub inactive_values: InactivePolicy,

    #[serde(default)]
    pub output: OutputFormat,
}

impl VarcartConfig {
    pub const KEYS: &'static [&'static str] = &["inactive-values", "output"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(VarcartError::Io)?;
        let config: VarcartConfig =
            serde_json::from_str(&content).map_err(VarcartError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(VarcartError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(VarcartError::Serialization)?;
        fs::write(config_path, content).map_err(VarcartError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "inactive-values" => Some(self.inactive_values.to_string()),
            "output" => Some(self.output.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match (key, value.trim().to_ascii_lowercase().as_str()) {
            ("inactive-values", "keep") => self.inactive_values = InactivePolicy::Keep,
            ("inactive-values", "drop") => self.inactive_values = InactivePolicy::Drop,
            ("output", "table") => self.output = OutputFormat::Table,
            ("output", "json") => self.output = OutputFormat::Json,
            ("inactive-values", other) => {
                return Err(format!("Invalid inactive-values '{other}' (keep|drop)"))
            }
            ("output", other) => return Err(format!("Invalid output '{other}' (table|json)")),
            (other, _) => return Err(format!("Unknown config key: {other}")),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VarcartConfig::default();
        assert_eq!(config.inactive_values, InactivePolicy::Keep);
        assert_eq!(config.output, OutputFormat::Table);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = VarcartConfig::load(dir.path().join("nope")).unwrap();
        assert_eq!(config, VarcartConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = VarcartConfig::default();
        config.set("inactive-values", "drop").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = VarcartConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.inactive_values, InactivePolicy::Drop);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"output": "json"}"#).unwrap();
        let loaded = VarcartConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.output, OutputFormat::Json);
        assert_eq!(loaded.inactive_values, InactivePolicy::Keep);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = VarcartConfig::default();
        assert!(config.set("output", "xml").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, VarcartConfig::default());
    }

    #[test]
    fn test_get_formats_values() {
        let mut config = VarcartConfig::default();
        config.set("output", "JSON").unwrap();
        assert_eq!(config.get("output").as_deref(), Some("json"));
        assert_eq!(config.get("missing"), None);
    }
}
