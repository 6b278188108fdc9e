//! Implementor index merger and registry.
//!
//! Documentation pages each ship a partial table mapping a source unit (a
//! crate) to the types implementing the page's trait. This crate merges those
//! partial tables into one [`MergedIndex`] and hands it to a single consumer,
//! whatever the relative timing of data arrival and consumer readiness.
//!
//! # Mental Model
//!
//! 1. **Ingest:** each page load calls [`Registry::ingest`] once with its
//!    [`PartialIndex`]. Every unit's list overwrites the previous one for that
//!    key (last writer wins, no union).
//! 2. **Hand-off:** if a consumer is attached it receives the full merged index
//!    synchronously; otherwise the merged state is marked pending.
//! 3. **Attach:** [`Registry::attach_consumer`] installs the sole consumer and
//!    immediately delivers any pending state, exactly once.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`Registry`] | Owns the merged index and the `Empty / Buffered / Attached` slot. |
//! | [`PartialIndex`] | One page's table, key order preserved. |
//! | [`MergedIndex`] | Accumulated union of every partial index. |
//! | [`Consumer`] | Downstream receiver of the full merged index. |
//! | [`SharedRegistry`] | Cloneable handle for callers that do not share ownership. |
//! | [`ImplementorCatalog`] | One registry per trait path. |
//! | [`IntegrityWarning`] | Non-fatal signal for surprising merges. |
//!
//! Descriptors are a type parameter the registry never inspects.

mod catalog;
pub mod config;
mod consumer;
pub mod error;
mod key;
mod merged;
mod partial;
mod registry;
mod shared;
mod warning;

pub use catalog::ImplementorCatalog;
pub use config::{RegistryConfig, WarningConfig};
pub use consumer::{Consumer, IngestSink};
pub use error::ConfigError;
pub use key::SourceUnitKey;
pub use merged::{MergeAction, MergedIndex};
pub use partial::PartialIndex;
pub use registry::{
	AttachOutcome, BoxedConsumer, Delivery, IngestReport, Registry, SlotState, UnitChange,
};
pub use shared::SharedRegistry;
pub use warning::IntegrityWarning;

#[cfg(test)]
mod test_fixtures;
