//! One page's contribution to the index.

use indexmap::IndexMap;
use indexmap::map::IntoIter;
use serde::{Deserialize, Serialize};

use crate::key::SourceUnitKey;

/// Implementor lists produced by exactly one page load.
///
/// Keys keep the position of their first assignment. Assigning a key again
/// replaces its list in place, so a table that names `serde` twice ends up
/// with the second list at the first position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartialIndex<D> {
	units: IndexMap<SourceUnitKey, Vec<D>>,
}

impl<D> Default for PartialIndex<D> {
	fn default() -> Self {
		Self {
			units: IndexMap::new(),
		}
	}
}

impl<D> PartialIndex<D> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Assigns `implementors` to `key`, returning the list it replaced.
	pub fn insert(&mut self, key: impl Into<SourceUnitKey>, implementors: Vec<D>) -> Option<Vec<D>> {
		self.units.insert(key.into(), implementors)
	}

	pub fn get(&self, key: &str) -> Option<&[D]> {
		self.units.get(key).map(Vec::as_slice)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.units.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.units.len()
	}

	pub fn is_empty(&self) -> bool {
		self.units.is_empty()
	}

	pub fn keys(&self) -> impl Iterator<Item = &SourceUnitKey> {
		self.units.keys()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&SourceUnitKey, &[D])> {
		self.units.iter().map(|(k, v)| (k, v.as_slice()))
	}
}

impl<D> IntoIterator for PartialIndex<D> {
	type Item = (SourceUnitKey, Vec<D>);
	type IntoIter = IntoIter<SourceUnitKey, Vec<D>>;

	fn into_iter(self) -> Self::IntoIter {
		self.units.into_iter()
	}
}

impl<K, D> FromIterator<(K, Vec<D>)> for PartialIndex<D>
where
	K: Into<SourceUnitKey>,
{
	fn from_iter<I: IntoIterator<Item = (K, Vec<D>)>>(iter: I) -> Self {
		let mut partial = Self::new();
		partial.extend(iter);
		partial
	}
}

impl<K, D> Extend<(K, Vec<D>)> for PartialIndex<D>
where
	K: Into<SourceUnitKey>,
{
	fn extend<I: IntoIterator<Item = (K, Vec<D>)>>(&mut self, iter: I) {
		for (key, implementors) in iter {
			self.insert(key, implementors);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Reassigning a key keeps its first position but takes the new list.
	#[test]
	fn test_reassignment_keeps_first_position() {
		let mut page: PartialIndex<&str> = PartialIndex::new();
		page.insert("serde", vec!["first"]);
		page.insert("hyper", vec![]);
		assert_eq!(page.insert("serde", vec![]), Some(vec!["first"]));

		let keys: Vec<_> = page.keys().map(SourceUnitKey::as_str).collect();
		assert_eq!(keys, vec!["serde", "hyper"]);
		assert_eq!(page.get("serde"), Some(&[][..]));
	}

	/// JSON objects deserialize in document order.
	#[test]
	fn test_json_order_preserved() {
		let page: PartialIndex<String> =
			serde_json::from_str(r#"{"zeta": ["z"], "alpha": [], "mid": ["m1", "m2"]}"#).unwrap();
		let keys: Vec<_> = page.keys().map(SourceUnitKey::as_str).collect();
		assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
		assert_eq!(page.get("mid"), Some(&["m1".to_string(), "m2".to_string()][..]));
	}
}
