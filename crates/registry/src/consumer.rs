//! The downstream side of the hand-off.

use crate::merged::MergedIndex;

/// Receives the full merged index whenever the registry delivers.
///
/// Delivery is synchronous: it runs inside [`crate::Registry::ingest`] or
/// [`crate::Registry::attach_consumer`] before either returns. Consumers always
/// see the whole accumulated state, never a diff.
pub trait Consumer<D> {
	fn deliver(&mut self, index: &MergedIndex<D>);
}

impl<D, F> Consumer<D> for F
where
	F: FnMut(&MergedIndex<D>),
{
	fn deliver(&mut self, index: &MergedIndex<D>) {
		self(index)
	}
}

/// Something a loader can push a partial index into.
pub trait IngestSink<D> {
	fn ingest(&mut self, partial: crate::PartialIndex<D>) -> crate::IngestReport;
}
