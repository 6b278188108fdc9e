//! Non-fatal integrity signals.
//!
//! None of these change what a consumer receives. They mark the places where
//! the merge policy silently does something a reader may not expect.

use std::collections::VecDeque;

use crate::config::{RegistryConfig, WarningConfig};
use crate::key::SourceUnitKey;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityWarning {
	/// A populated unit was overwritten by an empty list.
	#[error("unit `{key}` emptied: {previous_len} implementor(s) replaced by an empty list")]
	EmptiedUnit { key: SourceUnitKey, previous_len: usize },

	/// An attached consumer was replaced by a newer one.
	#[error("attached consumer replaced")]
	ConsumerReplaced,

	/// A partial index with no units was ingested.
	#[error("empty partial index ingested")]
	EmptyPartial,
}

impl IntegrityWarning {
	fn enabled(&self, config: &WarningConfig) -> bool {
		match self {
			Self::EmptiedUnit { .. } => config.emptied_unit,
			Self::ConsumerReplaced => config.consumer_replaced,
			Self::EmptyPartial => config.empty_partial,
		}
	}
}

/// Bounded log of raised warnings, oldest first.
#[derive(Debug)]
pub(crate) struct WarningLog {
	config: WarningConfig,
	record: bool,
	capacity: usize,
	entries: VecDeque<IntegrityWarning>,
}

impl WarningLog {
	pub(crate) fn new(config: &RegistryConfig) -> Self {
		Self {
			config: config.warnings.clone(),
			record: config.record_warnings,
			capacity: config.warning_capacity,
			entries: VecDeque::new(),
		}
	}

	/// Emits `warning` through tracing and keeps it if recording is on.
	///
	/// Returns whether the warning was raised at all.
	pub(crate) fn raise(&mut self, label: &str, warning: IntegrityWarning) -> bool {
		if !warning.enabled(&self.config) {
			return false;
		}

		tracing::warn!(registry = label, %warning, "registry.integrity");

		if self.record && self.capacity > 0 {
			if self.entries.len() == self.capacity {
				self.entries.pop_front();
			}
			self.entries.push_back(warning);
		}
		true
	}

	pub(crate) fn iter(&self) -> impl Iterator<Item = &IntegrityWarning> {
		self.entries.iter()
	}

	pub(crate) fn take(&mut self) -> Vec<IntegrityWarning> {
		self.entries.drain(..).collect()
	}

	pub(crate) fn clear(&mut self) {
		self.entries.clear();
	}
}
