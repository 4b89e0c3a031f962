//! Configuration file support
//!
//! Handles parsing of `.dw-model.toml` configuration files and environment
//! variable overrides.

use crate::export::CheckThresholds;
use crate::models::SqlDialect;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".dw-model.toml";

/// Environment variable for the default SQL dialect
pub const ENV_DIALECT: &str = "DW_MODEL_DIALECT";

/// Environment variable for header comments in generated SQL
pub const ENV_INCLUDE_COMMENTS: &str = "DW_MODEL_INCLUDE_COMMENTS";

/// Error loading or saving configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Configuration error: {0}")]
    ParseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// SQL generator section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSection {
    /// Dialect used when a request names none
    #[serde(default)]
    pub dialect: SqlDialect,

    /// Emit header comments in generated SQL
    #[serde(default = "default_include_comments")]
    pub include_comments: bool,
}

fn default_include_comments() -> bool {
    true
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            dialect: SqlDialect::default(),
            include_comments: default_include_comments(),
        }
    }
}

/// Main configuration structure
///
/// Represents the `.dw-model.toml` configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DefinitionConfig {
    #[serde(default)]
    pub generator: GeneratorSection,

    /// Data-quality check thresholds
    #[serde(default)]
    pub checks: CheckThresholds,
}

impl DefinitionConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a workspace directory
    ///
    /// Looks for `.dw-model.toml` in the workspace directory.
    /// Falls back to defaults if not found.
    pub fn load(workspace_path: &Path) -> ConfigResult<Self> {
        let config_path = workspace_path.join(CONFIG_FILENAME);
        let mut config = if config_path.exists() {
            Self::read(&config_path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load an explicit configuration file, then apply environment overrides
    pub fn load_file(path: &Path) -> ConfigResult<Self> {
        let mut config = Self::read(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn read(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> ConfigResult<Self> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a workspace directory
    pub fn save(&self, workspace_path: &Path) -> ConfigResult<()> {
        let config_path = workspace_path.join(CONFIG_FILENAME);
        let content = self.to_toml()?;
        std::fs::write(&config_path, content)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config: {}", e)))
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from `lookup`; unparseable values are ignored
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(ENV_DIALECT) {
            match value.parse() {
                Ok(dialect) => self.generator.dialect = dialect,
                Err(_) => warn!(value = %value, "Ignoring unsupported {}", ENV_DIALECT),
            }
        }

        if let Some(value) = lookup(ENV_INCLUDE_COMMENTS)
            && let Some(flag) = parse_flag(&value)
        {
            self.generator.include_comments = flag;
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# Data warehouse definition SDK configuration

[generator]
# Default dialect: "hive", "mysql", "clickhouse" or "maxcompute"
dialect = "hive"

# Emit header comments in generated DDL and ETL
include_comments = true

[checks]
# Row counts below this are flagged WARNING (zero rows is CRITICAL)
min_row_count = 100

# Day-over-day row count change, in percent
fluctuation_warning_pct = 20.0
fluctuation_critical_pct = 50.0
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = DefinitionConfig::new();
        assert_eq!(config.generator.dialect, SqlDialect::Hive);
        assert!(config.generator.include_comments);
        assert_eq!(config.checks, CheckThresholds::default());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[generator]
dialect = "maxcompute"
include_comments = false

[checks]
min_row_count = 1000
"#;
        let config = DefinitionConfig::parse(toml).unwrap();
        assert_eq!(config.generator.dialect, SqlDialect::MaxCompute);
        assert!(!config.generator.include_comments);
        assert_eq!(config.checks.min_row_count, 1000);
        assert_eq!(config.checks.fluctuation_critical_pct, 50.0);
    }

    #[test]
    fn test_parse_rejects_unknown_dialect() {
        let err = DefinitionConfig::parse("[generator]\ndialect = \"oracle\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let mut config = DefinitionConfig::new();
        config.generator.dialect = SqlDialect::MySql;

        config.save(dir.path()).unwrap();
        assert!(dir.path().join(CONFIG_FILENAME).exists());

        let loaded = DefinitionConfig::read(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = DefinitionConfig::load(dir.path()).unwrap();
        assert_eq!(config.checks, CheckThresholds::default());
    }

    #[test]
    fn test_overrides() {
        let mut config = DefinitionConfig::new();
        config.apply_overrides(|name| match name {
            ENV_DIALECT => Some("ODPS".to_string()),
            ENV_INCLUDE_COMMENTS => Some("off".to_string()),
            _ => None,
        });
        assert_eq!(config.generator.dialect, SqlDialect::MaxCompute);
        assert!(!config.generator.include_comments);

        config.apply_overrides(|_| Some("nonsense".to_string()));
        assert_eq!(config.generator.dialect, SqlDialect::MaxCompute);
        assert!(!config.generator.include_comments);
    }

    #[test]
    fn test_sample_config_is_valid() {
        let config = DefinitionConfig::parse(sample_config()).unwrap();
        assert_eq!(config, DefinitionConfig::default());
    }
}
