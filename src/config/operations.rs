//! Config loading, validation, and utility operations.

use std::path::Path;

use super::model::Config;
use crate::error::{LintDeltaError, Result};

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `UserError` when the file cannot be read, does not parse,
    /// or fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            LintDeltaError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load the default config file from `dir` when present, otherwise the
    /// built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(super::CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| LintDeltaError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            LintDeltaError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return an error on invalid values.
    ///
    /// Glob and regex patterns are validated separately when compiled
    /// (see [`super::CompiledFilters`]).
    pub fn validate(&self) -> Result<()> {
        if self.jobs == 0 {
            return Err(LintDeltaError::UserError(
                "config validation failed: jobs must be greater than 0".to_string(),
            ));
        }

        if let Some(linter) = &self.linter {
            if linter.trim().is_empty() {
                return Err(LintDeltaError::UserError(
                    "config validation failed: linter command must not be empty.\n\
                     Fix: set `linter` to a command like 'pylint --output-format=json {file}'."
                        .to_string(),
                ));
            }
        }

        Ok(())
    }
}
