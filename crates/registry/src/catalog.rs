//! One registry per trait.
//!
//! Each trait page ships its own implementor table, so a documentation site
//! holds many independent indexes. The catalog creates a [`Registry`] lazily
//! the first time a trait is ingested into or attached to.

use std::collections::BTreeMap;

use crate::config::RegistryConfig;
use crate::consumer::Consumer;
use crate::partial::PartialIndex;
use crate::registry::{AttachOutcome, IngestReport, Registry};

#[derive(Debug)]
pub struct ImplementorCatalog<D> {
	config: RegistryConfig,
	registries: BTreeMap<String, Registry<D>>,
}

impl<D> Default for ImplementorCatalog<D> {
	fn default() -> Self {
		Self::new(RegistryConfig::default())
	}
}

impl<D> ImplementorCatalog<D> {
	pub fn new(config: RegistryConfig) -> Self {
		Self {
			config,
			registries: BTreeMap::new(),
		}
	}

	fn registry_mut(&mut self, trait_path: &str) -> &mut Registry<D> {
		let config = &self.config;
		self.registries
			.entry(trait_path.to_string())
			.or_insert_with(|| Registry::with_config(config).labelled(trait_path))
	}

	pub fn ingest(&mut self, trait_path: &str, partial: PartialIndex<D>) -> IngestReport {
		self.registry_mut(trait_path).ingest(partial)
	}

	pub fn attach_consumer<C>(&mut self, trait_path: &str, consumer: C) -> AttachOutcome
	where
		C: Consumer<D> + Send + 'static,
	{
		self.registry_mut(trait_path).attach_consumer(consumer)
	}

	pub fn get(&self, trait_path: &str) -> Option<&Registry<D>> {
		self.registries.get(trait_path)
	}

	pub fn get_mut(&mut self, trait_path: &str) -> Option<&mut Registry<D>> {
		self.registries.get_mut(trait_path)
	}

	/// Trait paths with a registry, sorted.
	pub fn traits(&self) -> impl Iterator<Item = &str> {
		self.registries.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.registries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.registries.is_empty()
	}

	/// Traits that `unit` provides at least one implementor for.
	pub fn traits_implemented_by<'a>(&'a self, unit: &'a str) -> impl Iterator<Item = &'a str> + 'a {
		self.registries
			.iter()
			.filter(move |(_, registry)| registry.merged().get(unit).is_some_and(|list| !list.is_empty()))
			.map(|(name, _)| name.as_str())
	}
}
