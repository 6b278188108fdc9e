//! Cloneable handle over one [`Registry`].
//!
//! Any holder of a clone may ingest or attach at any point in the page
//! lifecycle; calls are serialised by a mutex so each still runs to
//! completion before the next starts. A consumer must not call back into the
//! same handle from inside [`Consumer::deliver`], as the lock is held.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::RegistryConfig;
use crate::consumer::{Consumer, IngestSink};
use crate::merged::MergedIndex;
use crate::partial::PartialIndex;
use crate::registry::{AttachOutcome, IngestReport, Registry, SlotState};
use crate::warning::IntegrityWarning;

pub struct SharedRegistry<D> {
	inner: Arc<Mutex<Registry<D>>>,
}

impl<D> Clone for SharedRegistry<D> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<D> Default for SharedRegistry<D> {
	fn default() -> Self {
		Self::new(Registry::new())
	}
}

impl<D> From<Registry<D>> for SharedRegistry<D> {
	fn from(registry: Registry<D>) -> Self {
		Self::new(registry)
	}
}

impl<D> SharedRegistry<D> {
	pub fn new(registry: Registry<D>) -> Self {
		Self {
			inner: Arc::new(Mutex::new(registry)),
		}
	}

	pub fn with_config(config: &RegistryConfig) -> Self {
		Self::new(Registry::with_config(config))
	}

	pub fn ingest(&self, partial: PartialIndex<D>) -> IngestReport {
		self.inner.lock().ingest(partial)
	}

	pub fn attach_consumer<C>(&self, consumer: C) -> AttachOutcome
	where
		C: Consumer<D> + Send + 'static,
	{
		self.inner.lock().attach_consumer(consumer)
	}

	pub fn detach_consumer(&self) -> bool {
		self.inner.lock().detach_consumer()
	}

	pub fn reset(&self) {
		self.inner.lock().reset()
	}

	pub fn state(&self) -> SlotState {
		self.inner.lock().state()
	}

	pub fn has_consumer(&self) -> bool {
		self.inner.lock().has_consumer()
	}

	/// Runs `f` against the current merged index while holding the lock.
	pub fn with_merged<R>(&self, f: impl FnOnce(&MergedIndex<D>) -> R) -> R {
		f(self.inner.lock().merged())
	}

	/// Clones the current merged index out of the lock.
	pub fn snapshot(&self) -> MergedIndex<D>
	where
		D: Clone,
	{
		self.inner.lock().merged().clone()
	}

	pub fn take_warnings(&self) -> Vec<IntegrityWarning> {
		self.inner.lock().take_warnings()
	}
}

impl<D> IngestSink<D> for SharedRegistry<D> {
	fn ingest(&mut self, partial: PartialIndex<D>) -> IngestReport {
		SharedRegistry::ingest(self, partial)
	}
}

impl<D> fmt::Debug for SharedRegistry<D> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.inner.try_lock() {
			Some(registry) => f.debug_tuple("SharedRegistry").field(&*registry).finish(),
			None => f.write_str("SharedRegistry(<locked>)"),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::thread;

	use super::*;
	use crate::test_fixtures::{Desc, Recorder, merged, partial};

	/// Clones share one registry: data ingested through one handle reaches a
	/// consumer attached through another.
	#[test]
	fn test_clones_share_state() {
		let producer: SharedRegistry<Desc> = SharedRegistry::default();
		let renderer = producer.clone();

		producer.ingest(partial(&[("openssl", &["BigNum"])]));
		assert_eq!(renderer.state(), SlotState::Buffered);

		let cb = Recorder::default();
		assert_eq!(renderer.attach_consumer(cb.clone()), AttachOutcome::Delivered);
		assert_eq!(cb.deliveries(), vec![merged(&[("openssl", &["BigNum"])])]);
		assert!(producer.has_consumer());
	}

	/// Ingests from several threads are all merged and each delivered once.
	#[test]
	fn test_concurrent_ingest_loses_nothing() {
		let shared: SharedRegistry<Desc> = SharedRegistry::default();
		let cb = Recorder::default();
		shared.attach_consumer(cb.clone());

		let units = ["a", "b", "c", "d", "e", "f", "g", "h"];
		let handles: Vec<_> = units
			.into_iter()
			.map(|unit| {
				let shared = shared.clone();
				thread::spawn(move || {
					shared.ingest(partial(&[(unit, &["impl"])]));
				})
			})
			.collect();
		for handle in handles {
			handle.join().unwrap();
		}

		assert_eq!(cb.count(), units.len());
		let snapshot = shared.snapshot();
		assert_eq!(snapshot.len(), units.len());
		assert_eq!(cb.deliveries().last(), Some(&snapshot));
	}

	#[test]
	fn test_with_merged_and_reset() {
		let shared: SharedRegistry<Desc> = SharedRegistry::default();
		shared.ingest(partial(&[("u", &["x", "y"])]));
		assert_eq!(shared.with_merged(|m| m.implementor_count()), 2);

		shared.reset();
		assert_eq!(shared.state(), SlotState::Empty);
		assert!(shared.with_merged(|m| m.is_empty()));
	}
}
