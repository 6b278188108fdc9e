//! Loader configuration.
//!
//! ```toml
//! strict = true
//! page_prefix = "trait."
//! extensions = ["js"]
//!
//! [registry]
//! warning_capacity = 32
//! ```

use std::path::Path;

use impldex_registry::RegistryConfig;
use impldex_registry::error::ConfigError;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::path::PageFormat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
	/// Reject statements the page format does not define instead of skipping them,
	/// and abort a directory load on the first failing page.
	pub strict: bool,
	/// File name prefix of a page, before the trait name.
	pub page_prefix: String,
	/// Accepted page extensions. `json` selects the JSON table format.
	pub extensions: Vec<String>,
	/// Leading directory stripped before deriving a trait path.
	pub root_dir: String,
	/// Settings for the registries the pages are ingested into.
	pub registry: RegistryConfig,
}

impl Default for LoaderConfig {
	fn default() -> Self {
		Self {
			strict: false,
			page_prefix: "trait.".to_string(),
			extensions: vec!["js".to_string(), "json".to_string()],
			root_dir: "implementors".to_string(),
			registry: RegistryConfig::default(),
		}
	}
}

impl LoaderConfig {
	pub fn from_toml_str(content: &str) -> Result<Self> {
		let config: Self = toml::from_str(content).map_err(ConfigError::from)?;
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

	fn validate(&self) -> Result<()> {
		if self.extensions.is_empty() {
			return Err(ConfigError::Invalid {
				field: "extensions",
				reason: "at least one page extension is required".into(),
			}
			.into());
		}
		if let Some(ext) = self.extensions.iter().find(|ext| PageFormat::from_extension(ext).is_none()) {
			return Err(ConfigError::Invalid {
				field: "extensions",
				reason: format!("unsupported page extension `{ext}`, expected `js` or `json`"),
			}
			.into());
		}
		self.registry.validate()?;
		Ok(())
	}

	pub(crate) fn accepts_extension(&self, ext: &str) -> bool {
		self.extensions.iter().any(|e| e == ext)
	}
}
