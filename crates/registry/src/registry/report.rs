use crate::key::SourceUnitKey;
use crate::merged::MergeAction;

/// What happened to the merged state after an ingest.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
	/// An attached consumer received the full merged index.
	Delivered,
	/// No consumer yet; the merged index is pending.
	Buffered,
}

/// Result of attaching a consumer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttachOutcome {
	/// Nothing pending; the consumer waits for the next ingest.
	Waiting,
	/// Pending state was delivered during the attach call.
	Delivered,
	/// An attached consumer was replaced. No delivery.
	Replaced,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitChange {
	pub key: SourceUnitKey,
	pub action: MergeAction,
	/// Length of the list now stored under `key`.
	pub len: usize,
}

/// Summary of one [`crate::Registry::ingest`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestReport {
	/// One entry per unit in the partial index, in its order.
	pub changes: Vec<UnitChange>,
	pub delivery: Delivery,
	/// Integrity warnings raised by this call.
	pub warnings: usize,
}

impl IngestReport {
	pub fn inserted(&self) -> impl Iterator<Item = &SourceUnitKey> {
		self.changes
			.iter()
			.filter(|c| c.action == MergeAction::InsertedNew)
			.map(|c| &c.key)
	}

	pub fn replaced(&self) -> impl Iterator<Item = &SourceUnitKey> {
		self.changes
			.iter()
			.filter(|c| matches!(c.action, MergeAction::Replaced { .. }))
			.map(|c| &c.key)
	}
}
