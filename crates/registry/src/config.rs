//! Registry configuration.
//!
//! ```toml
//! record_warnings = true
//! warning_capacity = 64
//!
//! [warnings]
//! emptied_unit = true
//! consumer_replaced = true
//! empty_partial = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

const DEFAULT_WARNING_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
	/// Which integrity warnings are raised.
	pub warnings: WarningConfig,
	/// Keep raised warnings in memory for [`crate::Registry::warnings`].
	pub record_warnings: bool,
	/// Oldest recorded warnings are dropped past this many.
	pub warning_capacity: usize,
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			warnings: WarningConfig::default(),
			record_warnings: true,
			warning_capacity: DEFAULT_WARNING_CAPACITY,
		}
	}
}

/// Per-warning toggles. All on by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WarningConfig {
	pub emptied_unit: bool,
	pub consumer_replaced: bool,
	pub empty_partial: bool,
}

impl Default for WarningConfig {
	fn default() -> Self {
		Self {
			emptied_unit: true,
			consumer_replaced: true,
			empty_partial: true,
		}
	}
}

impl RegistryConfig {
	pub fn from_toml_str(content: &str) -> Result<Self> {
		let config: Self = toml::from_str(content)?;
		config.validate()?;
		Ok(config)
	}

	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&content)
	}

	/// Checks values that parse but cannot be honoured.
	pub fn validate(&self) -> Result<()> {
		if self.record_warnings && self.warning_capacity == 0 {
			return Err(ConfigError::Invalid {
				field: "warning_capacity",
				reason: "must be non-zero while record_warnings is enabled".into(),
			});
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_document_is_default() {
		let config = RegistryConfig::from_toml_str("").unwrap();
		assert_eq!(config, RegistryConfig::default());
	}

	#[test]
	fn test_partial_warning_table_keeps_other_defaults() {
		let config = RegistryConfig::from_toml_str(
			r#"
			warning_capacity = 8

			[warnings]
			empty_partial = false
			"#,
		)
		.unwrap();

		assert_eq!(config.warning_capacity, 8);
		assert!(config.record_warnings);
		assert!(config.warnings.emptied_unit);
		assert!(config.warnings.consumer_replaced);
		assert!(!config.warnings.empty_partial);
	}

	#[test]
	fn test_unknown_field_rejected() {
		let err = RegistryConfig::from_toml_str("deliver_diffs = true").unwrap_err();
		assert!(matches!(err, ConfigError::Toml(_)), "got {err:?}");
	}

	#[test]
	fn test_zero_capacity_rejected_while_recording() {
		let err = RegistryConfig::from_toml_str("warning_capacity = 0").unwrap_err();
		assert!(matches!(
			err,
			ConfigError::Invalid {
				field: "warning_capacity",
				..
			}
		));

		let config = RegistryConfig::from_toml_str("record_warnings = false\nwarning_capacity = 0").unwrap();
		assert!(!config.record_warnings);
	}

	#[test]
	fn test_load_from_file() {
		let dir = tempfile::tempdir().expect("create tempdir");
		let path = dir.path().join("registry.toml");
		std::fs::write(&path, "[warnings]\nconsumer_replaced = false\n").unwrap();

		let config = RegistryConfig::load(&path).unwrap();
		assert!(!config.warnings.consumer_replaced);

		let missing = RegistryConfig::load(&dir.path().join("missing.toml")).unwrap_err();
		assert!(matches!(missing, ConfigError::Io { .. }));
	}
}
