//! The accumulated index and its overwrite policy.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::key::SourceUnitKey;

/// Outcome of writing one unit's list into the merged index.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MergeAction {
	/// Key was new; list inserted.
	InsertedNew,
	/// Key existed; its list was replaced wholesale.
	Replaced {
		/// Length of the list that was discarded.
		previous_len: usize,
	},
}

/// Union of every partial index ingested so far.
///
/// Keys are ordered by the first time they were ever ingested. Lists are
/// stored exactly as the most recent producer supplied them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergedIndex<D> {
	units: IndexMap<SourceUnitKey, Vec<D>>,
}

impl<D> Default for MergedIndex<D> {
	fn default() -> Self {
		Self {
			units: IndexMap::new(),
		}
	}
}

impl<D> MergedIndex<D> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Last writer wins: `implementors` replaces whatever `key` held before.
	///
	/// There is no element-wise union, so an empty list clobbers a populated one.
	pub(crate) fn merge_unit(&mut self, key: SourceUnitKey, implementors: Vec<D>) -> MergeAction {
		match self.units.get_mut(&key) {
			Some(slot) => {
				let previous = std::mem::replace(slot, implementors);
				MergeAction::Replaced {
					previous_len: previous.len(),
				}
			}
			None => {
				self.units.insert(key, implementors);
				MergeAction::InsertedNew
			}
		}
	}

	pub(crate) fn clear(&mut self) {
		self.units.clear();
	}

	/// Implementors recorded for `key`, in display order.
	pub fn get(&self, key: &str) -> Option<&[D]> {
		self.units.get(key).map(Vec::as_slice)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.units.contains_key(key)
	}

	/// Number of source units, including those with empty lists.
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

	/// Units that currently list at least one implementor.
	pub fn units_with_implementors(&self) -> impl Iterator<Item = (&SourceUnitKey, &[D])> {
		self.iter().filter(|(_, implementors)| !implementors.is_empty())
	}

	/// Total number of descriptors across every unit.
	pub fn implementor_count(&self) -> usize {
		self.units.values().map(Vec::len).sum()
	}
}

impl<K, D> FromIterator<(K, Vec<D>)> for MergedIndex<D>
where
	K: Into<SourceUnitKey>,
{
	fn from_iter<I: IntoIterator<Item = (K, Vec<D>)>>(iter: I) -> Self {
		let mut merged = Self::new();
		for (key, implementors) in iter {
			merged.merge_unit(key.into(), implementors);
		}
		merged
	}
}
