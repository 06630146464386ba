//! Generator configuration.
//!
//! Loaded from an optional JSON file; every field has a default, so `{}` is a
//! valid configuration. Command-line flags override file values.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::naming::is_identifier;
use crate::parser::DEFAULT_SEPARATOR;
use crate::render::Language;

/// Name of the enum output when none is configured.
pub const DEFAULT_ENUM_NAME: &str = "ErrorEnum";

/// Package clause of generated Go files when none is configured.
pub const DEFAULT_GO_PACKAGE: &str = "errors";

/// Options for a generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Target language of the generated sources
    pub language: Language,

    /// Type name of the aggregate enum
    pub enum_name: String,

    /// Field separator of the input table
    pub separator: char,

    /// Package clause for Go output
    pub go_package: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            enum_name: DEFAULT_ENUM_NAME.to_string(),
            separator: DEFAULT_SEPARATOR,
            go_package: DEFAULT_GO_PACKAGE.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Parse a config from a JSON string
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check names and separator are usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if !is_identifier(&self.enum_name) {
            return Err(ConfigError::InvalidEnumName(self.enum_name.clone()));
        }
        if self.separator.is_whitespace() {
            return Err(ConfigError::InvalidSeparator(self.separator));
        }
        if !is_identifier(&self.go_package) {
            return Err(ConfigError::InvalidGoPackage(self.go_package.clone()));
        }
        Ok(())
    }

    /// Example configuration, as printed by `errgen example-config`.
    pub fn example() -> Self {
        Self {
            language: Language::Kotlin,
            enum_name: "ApiError".to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.language, Language::Rust);
        assert_eq!(config.enum_name, "ErrorEnum");
        assert_eq!(config.separator, '|');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(GeneratorConfig::from_json("{}").unwrap(), GeneratorConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = GeneratorConfig::from_json(r#"{"language": "go", "go_package": "apierr"}"#).unwrap();
        assert_eq!(config.language, Language::Go);
        assert_eq!(config.go_package, "apierr");
        assert_eq!(config.enum_name, "ErrorEnum");
    }

    #[test]
    fn test_invalid_enum_name() {
        let err = GeneratorConfig::from_json(r#"{"enum_name": "Error Enum"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnumName(_)));
    }

    #[test]
    fn test_whitespace_separator_rejected() {
        let err = GeneratorConfig::from_json("{\"separator\": \"\\t\"}").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeparator('\t')));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = GeneratorConfig::from_json(r#"{"langauge": "rust"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_example_roundtrips() {
        let json = GeneratorConfig::example().to_json().unwrap();
        assert_eq!(GeneratorConfig::from_json(&json).unwrap(), GeneratorConfig::example());
    }
}
