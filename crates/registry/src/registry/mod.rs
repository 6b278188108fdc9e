//! Merged index ownership and the producer/consumer hand-off.
//!
//! # State machine
//!
//! The registry slot is always in exactly one of three states:
//!
//! | From | Event | To | Effect |
//! |------|-------|----|--------|
//! | `Empty` | ingest | `Buffered` | merge |
//! | `Buffered` | ingest | `Buffered` | merge |
//! | `Attached` | ingest | `Attached` | merge, deliver full state |
//! | `Empty` | attach | `Attached` | record consumer |
//! | `Buffered` | attach | `Attached` | record consumer, deliver, clear buffer |
//! | `Attached` | attach | `Attached` | replace consumer, no delivery |
//!
//! `Buffered` marks the merged index itself as pending. Since consumers always
//! receive the full accumulated state, there is no separate copy of the last
//! partial index to keep.
//!
//! # Invariants
//!
//! - A partial index is never dropped: it is merged before the delivery decision.
//!   - Enforced in: [`Registry::ingest`].
//!   - Tested by: `tests::test_late_attach_delivers_cumulative_state_once`
//! - Once attached, a consumer sees every ingest exactly once, synchronously.
//!   - Enforced in: [`Registry::ingest`], [`Registry::attach_consumer`].
//!   - Tested by: `tests::test_early_attach_waits_then_delivers`
//! - Replacing a consumer never re-delivers already delivered state.
//!   - Enforced in: [`Registry::attach_consumer`].
//!   - Tested by: `tests::test_consumer_replacement_drops_nothing`

mod report;

use std::fmt;

pub use report::{AttachOutcome, Delivery, IngestReport, UnitChange};

use crate::config::RegistryConfig;
use crate::consumer::{Consumer, IngestSink};
use crate::merged::{MergeAction, MergedIndex};
use crate::partial::PartialIndex;
use crate::warning::{IntegrityWarning, WarningLog};

const DEFAULT_LABEL: &str = "implementors";

/// Boxed consumer as stored in the slot.
pub type BoxedConsumer<D> = Box<dyn Consumer<D> + Send>;

enum Slot<D> {
	Empty,
	Buffered,
	Attached(BoxedConsumer<D>),
}

/// Observable shape of the registry slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SlotState {
	/// Nothing has arrived and no consumer is attached.
	Empty,
	/// Merged state is waiting for a consumer.
	Buffered,
	/// A consumer is attached and has seen every ingest so far.
	Attached,
}

/// Owns the merged index and delivers it to a single consumer.
pub struct Registry<D> {
	label: String,
	merged: MergedIndex<D>,
	slot: Slot<D>,
	warnings: WarningLog,
	deliveries: u64,
}

impl<D> Default for Registry<D> {
	fn default() -> Self {
		Self::new()
	}
}

impl<D> Registry<D> {
	pub fn new() -> Self {
		Self::with_config(&RegistryConfig::default())
	}

	pub fn with_config(config: &RegistryConfig) -> Self {
		Self {
			label: DEFAULT_LABEL.to_string(),
			merged: MergedIndex::new(),
			slot: Slot::Empty,
			warnings: WarningLog::new(config),
			deliveries: 0,
		}
	}

	/// Sets the name used in log events, usually the trait path.
	pub fn labelled(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();
		self
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	/// Merges `partial` and delivers or buffers the result.
	///
	/// Each unit's list replaces whatever the unit held before. If a consumer
	/// is attached it receives the full merged index before this returns;
	/// otherwise the merged state becomes pending.
	pub fn ingest(&mut self, partial: PartialIndex<D>) -> IngestReport {
		let mut raised = 0;
		if partial.is_empty() && self.warnings.raise(&self.label, IntegrityWarning::EmptyPartial) {
			raised += 1;
		}

		let mut changes = Vec::with_capacity(partial.len());
		for (key, implementors) in partial {
			let len = implementors.len();
			let action = self.merged.merge_unit(key.clone(), implementors);

			match action {
				MergeAction::InsertedNew => {
					tracing::trace!(registry = %self.label, unit = %key, len, "registry.ingest.insert");
				}
				MergeAction::Replaced { previous_len } => {
					tracing::trace!(registry = %self.label, unit = %key, len, previous_len, "registry.ingest.replace");
					if previous_len > 0 && len == 0 {
						let warning = IntegrityWarning::EmptiedUnit {
							key: key.clone(),
							previous_len,
						};
						if self.warnings.raise(&self.label, warning) {
							raised += 1;
						}
					}
				}
			}

			changes.push(UnitChange { key, action, len });
		}

		let delivery = match &mut self.slot {
			Slot::Attached(consumer) => {
				self.deliveries += 1;
				tracing::debug!(registry = %self.label, units = self.merged.len(), "registry.deliver.ingest");
				consumer.deliver(&self.merged);
				Delivery::Delivered
			}
			slot => {
				*slot = Slot::Buffered;
				tracing::trace!(registry = %self.label, units = self.merged.len(), "registry.buffer");
				Delivery::Buffered
			}
		};

		IngestReport {
			changes,
			delivery,
			warnings: raised,
		}
	}

	/// Installs `consumer` as the sole consumer.
	///
	/// Pending state is delivered synchronously during this call. Replacing an
	/// attached consumer does not deliver anything by itself.
	pub fn attach_consumer<C>(&mut self, consumer: C) -> AttachOutcome
	where
		C: Consumer<D> + Send + 'static,
	{
		self.attach_boxed(Box::new(consumer))
	}

	pub fn attach_boxed(&mut self, mut consumer: BoxedConsumer<D>) -> AttachOutcome {
		match std::mem::replace(&mut self.slot, Slot::Empty) {
			Slot::Empty => {
				tracing::debug!(registry = %self.label, "registry.attach.waiting");
				self.slot = Slot::Attached(consumer);
				AttachOutcome::Waiting
			}
			Slot::Buffered => {
				self.deliveries += 1;
				tracing::debug!(registry = %self.label, units = self.merged.len(), "registry.deliver.attach");
				consumer.deliver(&self.merged);
				self.slot = Slot::Attached(consumer);
				AttachOutcome::Delivered
			}
			Slot::Attached(_) => {
				self.warnings.raise(&self.label, IntegrityWarning::ConsumerReplaced);
				self.slot = Slot::Attached(consumer);
				AttachOutcome::Replaced
			}
		}
	}

	/// Removes the attached consumer, if any.
	///
	/// The merged index is kept; the next ingest buffers again.
	pub fn detach_consumer(&mut self) -> bool {
		match self.slot {
			Slot::Attached(_) => {
				self.slot = Slot::Empty;
				tracing::debug!(registry = %self.label, "registry.detach");
				true
			}
			_ => false,
		}
	}

	/// Drops all merged state, the consumer and recorded warnings.
	pub fn reset(&mut self) {
		self.merged.clear();
		self.slot = Slot::Empty;
		self.warnings.clear();
		self.deliveries = 0;
		tracing::debug!(registry = %self.label, "registry.reset");
	}

	pub fn state(&self) -> SlotState {
		match self.slot {
			Slot::Empty => SlotState::Empty,
			Slot::Buffered => SlotState::Buffered,
			Slot::Attached(_) => SlotState::Attached,
		}
	}

	pub fn has_consumer(&self) -> bool {
		matches!(self.slot, Slot::Attached(_))
	}

	/// The merged index awaiting a consumer, if one is pending.
	pub fn pending(&self) -> Option<&MergedIndex<D>> {
		match self.slot {
			Slot::Buffered => Some(&self.merged),
			_ => None,
		}
	}

	/// Current merged index, regardless of delivery state.
	pub fn merged(&self) -> &MergedIndex<D> {
		&self.merged
	}

	/// Number of deliveries made since construction or the last reset.
	pub fn delivery_count(&self) -> u64 {
		self.deliveries
	}

	/// Recorded integrity warnings, oldest first.
	pub fn warnings(&self) -> impl Iterator<Item = &IntegrityWarning> {
		self.warnings.iter()
	}

	pub fn take_warnings(&mut self) -> Vec<IntegrityWarning> {
		self.warnings.take()
	}
}

impl<D> IngestSink<D> for Registry<D> {
	fn ingest(&mut self, partial: PartialIndex<D>) -> IngestReport {
		Registry::ingest(self, partial)
	}
}

impl<D> fmt::Debug for Registry<D> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registry")
			.field("label", &self.label)
			.field("state", &self.state())
			.field("units", &self.merged.len())
			.field("deliveries", &self.deliveries)
			.finish()
	}
}
