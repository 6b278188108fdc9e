use std::sync::Arc;

use parking_lot::Mutex;

use crate::{Consumer, MergedIndex, PartialIndex};

pub(crate) type Desc = &'static str;

/// Builds a partial index from `(unit, implementors)` pairs.
pub(crate) fn partial(units: &[(&str, &[Desc])]) -> PartialIndex<Desc> {
	units.iter().map(|(key, list)| (*key, list.to_vec())).collect()
}

pub(crate) fn merged(units: &[(&str, &[Desc])]) -> MergedIndex<Desc> {
	units.iter().map(|(key, list)| (*key, list.to_vec())).collect()
}

/// Consumer that records every delivery it receives.
#[derive(Clone, Default)]
pub(crate) struct Recorder {
	seen: Arc<Mutex<Vec<MergedIndex<Desc>>>>,
}

impl Recorder {
	pub(crate) fn deliveries(&self) -> Vec<MergedIndex<Desc>> {
		self.seen.lock().clone()
	}

	pub(crate) fn count(&self) -> usize {
		self.seen.lock().len()
	}
}

impl Consumer<Desc> for Recorder {
	fn deliver(&mut self, index: &MergedIndex<Desc>) {
		self.seen.lock().push(index.clone());
	}
}
