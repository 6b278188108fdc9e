//! One page load: parse once, ingest once.

use std::path::{Path, PathBuf};

use impldex_registry::{ImplementorCatalog, IngestReport, IngestSink, PartialIndex};

use crate::config::LoaderConfig;
use crate::error::{LoadError, Result};
use crate::html::ImplementorHtml;
use crate::json::parse_json;
use crate::path::{PageFormat, PageSource, TraitPath, discover_pages};
use crate::script::parse_page_with;

/// A parsed page, ready to hand to the registry.
///
/// Ingesting consumes the page, so each page reaches a registry at most once.
#[derive(Debug)]
pub struct Page {
	trait_path: Option<TraitPath>,
	partial: PartialIndex<ImplementorHtml>,
}

impl Page {
	pub fn parse(source: &str, format: PageFormat, config: &LoaderConfig) -> Result<Self> {
		let partial = match format {
			PageFormat::Script => parse_page_with(source, config)?,
			PageFormat::Json => parse_json(source)?,
		};
		Ok(Self {
			trait_path: None,
			partial,
		})
	}

	/// Reads and parses the page at `source.path`.
	pub fn read(source: &PageSource, config: &LoaderConfig) -> Result<Self> {
		let content = read_to_string(&source.path)?;
		let mut page = Self::parse(&content, source.format, config)?;
		page.trait_path = Some(source.trait_path.clone());
		Ok(page)
	}

	/// Reads a single page file, deriving its trait from the path below `root`.
	pub fn read_file(root: &Path, path: &Path, config: &LoaderConfig) -> Result<Self> {
		let source = PageSource::new(root, path.to_path_buf(), config)?;
		Self::read(&source, config)
	}

	pub fn with_trait_path(mut self, trait_path: TraitPath) -> Self {
		self.trait_path = Some(trait_path);
		self
	}

	pub fn trait_path(&self) -> Option<&TraitPath> {
		self.trait_path.as_ref()
	}

	pub fn partial(&self) -> &PartialIndex<ImplementorHtml> {
		&self.partial
	}

	/// Hands the table to `sink`. This is the page's single registry call.
	pub fn ingest_into<S>(self, sink: &mut S) -> IngestReport
	where
		S: IngestSink<ImplementorHtml> + ?Sized,
	{
		tracing::debug!(
			trait_path = ?self.trait_path,
			units = self.partial.len(),
			"loader.page.ingest"
		);
		sink.ingest(self.partial)
	}

	/// Ingests into the catalog registry for this page's trait.
	///
	/// Pages without a trait path are filed under the empty string.
	pub fn ingest_into_catalog(self, catalog: &mut ImplementorCatalog<ImplementorHtml>) -> IngestReport {
		let name = self.trait_path.as_ref().map(TraitPath::to_string).unwrap_or_default();
		tracing::debug!(trait_path = %name, units = self.partial.len(), "loader.page.ingest");
		catalog.ingest(&name, self.partial)
	}
}

fn read_to_string(path: &Path) -> Result<String> {
	std::fs::read_to_string(path).map_err(|error| LoadError::Io {
		path: path.to_path_buf(),
		error,
	})
}

/// Aggregate result of loading a directory of pages.
#[derive(Debug, Default)]
pub struct LoadSummary {
	/// Pages ingested, in load order.
	pub loaded: Vec<(PathBuf, IngestReport)>,
	/// Pages that failed to read or parse. Always empty in strict mode,
	/// where the first failure is returned instead.
	pub failures: Vec<(PathBuf, LoadError)>,
}

impl LoadSummary {
	pub fn pages(&self) -> usize {
		self.loaded.len()
	}

	pub fn integrity_warnings(&self) -> usize {
		self.loaded.iter().map(|(_, report)| report.warnings).sum()
	}
}

/// Loads every page under `root` into `catalog`, one registry per trait.
pub fn load_trait_pages(
	root: &Path,
	config: &LoaderConfig,
	catalog: &mut ImplementorCatalog<ImplementorHtml>,
) -> Result<LoadSummary> {
	let mut summary = LoadSummary::default();

	for source in discover_pages(root, config)? {
		match Page::read(&source, config) {
			Ok(page) => {
				let report = page.ingest_into_catalog(catalog);
				summary.loaded.push((source.path, report));
			}
			Err(err) if config.strict => return Err(err),
			Err(err) => {
				tracing::warn!(path = %source.path.display(), error = %err, "loader.page.failed");
				summary.failures.push((source.path, err));
			}
		}
	}

	tracing::debug!(
		pages = summary.pages(),
		failures = summary.failures.len(),
		traits = catalog.len(),
		"loader.load_trait_pages"
	);
	Ok(summary)
}

#[cfg(test)]
mod tests {
	use std::fs;

	use impldex_registry::{Delivery, Registry};
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn test_parse_json_page_and_ingest() {
		let page = Page::parse(r#"{"openssl": ["<a>BigNum</a>"], "hyper": []}"#, PageFormat::Json, &LoaderConfig::default())
			.unwrap()
			.with_trait_path(TraitPath::parse("core::ops::Shr").unwrap());
		assert_eq!(page.trait_path().map(ToString::to_string).as_deref(), Some("core::ops::Shr"));

		let mut registry = Registry::new();
		let report = page.ingest_into(&mut registry);
		assert_eq!(report.delivery, Delivery::Buffered);
		assert_eq!(report.inserted().count(), 2);
		assert_eq!(registry.merged().implementor_count(), 1);
	}

	#[test]
	fn test_read_missing_file_is_io_error() {
		let dir = tempfile::tempdir().expect("create tempdir");
		let err = Page::read_file(dir.path(), &dir.path().join("implementors/core/trait.Gone.js"), &LoaderConfig::default())
			.unwrap_err();
		assert!(matches!(err, LoadError::Io { .. }), "{err:?}");
	}

	#[test]
	fn test_read_file_rejects_non_page() {
		let dir = tempfile::tempdir().expect("create tempdir");
		let path = dir.path().join("notes.txt");
		fs::write(&path, "").unwrap();
		let err = Page::read_file(dir.path(), &path, &LoaderConfig::default()).unwrap_err();
		assert!(matches!(err, LoadError::NotAPage(_)), "{err:?}");
	}

	/// Lenient loading records the broken page and keeps going.
	#[test]
	fn test_load_collects_failures_leniently() {
		let dir = tempfile::tempdir().expect("create tempdir");
		let ops = dir.path().join("implementors/core/ops");
		fs::create_dir_all(&ops).unwrap();
		fs::write(ops.join("trait.Add.js"), r#"implementors["a"] = ["x"];"#).unwrap();
		fs::write(ops.join("trait.Sub.js"), r#"implementors["a"] = ["x"#).unwrap();

		let mut catalog = ImplementorCatalog::default();
		let summary = load_trait_pages(dir.path(), &LoaderConfig::default(), &mut catalog).unwrap();
		assert_eq!(summary.pages(), 1);
		assert_eq!(summary.failures.len(), 1);
		assert!(summary.failures[0].0.ends_with("trait.Sub.js"));
		assert_eq!(catalog.traits().collect::<Vec<_>>(), vec!["core::ops::Add"]);

		let strict = LoaderConfig {
			strict: true,
			..LoaderConfig::default()
		};
		let err = load_trait_pages(dir.path(), &strict, &mut ImplementorCatalog::default()).unwrap_err();
		assert!(matches!(err, LoadError::Syntax { .. }), "{err:?}");
	}
}
