//! Source unit keys.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Name of the library whose implementors are grouped together.
///
/// Generated tables call this the "crate". The same key may appear in many
/// partial tables, and more than once within a single table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceUnitKey(Arc<str>);

impl SourceUnitKey {
	pub fn new(name: impl AsRef<str>) -> Self {
		Self(Arc::from(name.as_ref()))
	}

	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for SourceUnitKey {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for SourceUnitKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SourceUnitKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for SourceUnitKey {
	fn from(name: &str) -> Self {
		Self(Arc::from(name))
	}
}

impl From<String> for SourceUnitKey {
	fn from(name: String) -> Self {
		Self(Arc::from(name))
	}
}

impl From<&String> for SourceUnitKey {
	fn from(name: &String) -> Self {
		Self(Arc::from(name.as_str()))
	}
}
