//! Page discovery and trait paths.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;

use crate::config::LoaderConfig;
use crate::error::{LoadError, Result};

/// Fully qualified trait path such as `core::ops::Shr`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraitPath {
	segments: Vec<String>,
}

impl TraitPath {
	/// Parses `a::b::Name`. Empty segments are rejected.
	pub fn parse(path: &str) -> Option<Self> {
		let segments: Vec<String> = path.split("::").map(str::to_string).collect();
		if segments.iter().any(String::is_empty) {
			return None;
		}
		Some(Self { segments })
	}

	/// Derives the trait path from a page path relative to the doc root.
	///
	/// `implementors/core/ops/trait.Shr.js` maps to `core::ops::Shr`.
	pub fn from_page_path(rel: &Path) -> Option<Self> {
		Self::from_page_path_with(rel, &LoaderConfig::default())
	}

	pub fn from_page_path_with(rel: &Path, config: &LoaderConfig) -> Option<Self> {
		let mut parts = Vec::new();
		for component in rel.components() {
			match component {
				Component::Normal(part) => parts.push(part.to_str()?),
				Component::CurDir => {}
				_ => return None,
			}
		}

		let file_name = parts.pop()?;
		let (stem, ext) = file_name.rsplit_once('.')?;
		if !config.accepts_extension(ext) {
			return None;
		}
		let name = stem.strip_prefix(config.page_prefix.as_str())?;
		if name.is_empty() {
			return None;
		}

		if parts.first().is_some_and(|first| *first == config.root_dir) {
			parts.remove(0);
		}

		let mut segments: Vec<String> = parts.into_iter().map(str::to_string).collect();
		segments.push(name.to_string());
		Some(Self { segments })
	}

	pub fn segments(&self) -> &[String] {
		&self.segments
	}

	/// The trait's own name, the last segment.
	pub fn name(&self) -> &str {
		self.segments.last().map_or("", String::as_str)
	}

	/// The crate that defines the trait, the first segment.
	pub fn defining_crate(&self) -> &str {
		self.segments.first().map_or("", String::as_str)
	}
}

impl fmt::Display for TraitPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.segments.join("::"))
	}
}

/// Encoding of a page file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PageFormat {
	/// Generated registration script.
	Script,
	/// Plain JSON object.
	Json,
}

impl PageFormat {
	/// Maps a file extension to its format. Unknown extensions have none.
	pub fn from_extension(ext: &str) -> Option<Self> {
		match ext {
			"js" => Some(Self::Script),
			"json" => Some(Self::Json),
			_ => None,
		}
	}

	pub fn from_path(path: &Path) -> Option<Self> {
		path.extension().and_then(|e| e.to_str()).and_then(Self::from_extension)
	}
}

/// A page file found on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSource {
	pub path: PathBuf,
	pub trait_path: TraitPath,
	pub format: PageFormat,
}

impl PageSource {
	/// Describes the page at `path`, deriving its trait from the path below `root`.
	pub fn new(root: &Path, path: PathBuf, config: &LoaderConfig) -> Result<Self> {
		let rel = path.strip_prefix(root).unwrap_or(&path);
		let (Some(trait_path), Some(format)) = (TraitPath::from_page_path_with(rel, config), PageFormat::from_path(&path))
		else {
			return Err(LoadError::NotAPage(path));
		};
		Ok(Self {
			path,
			trait_path,
			format,
		})
	}
}

/// Lists every page under `root`, sorted by path.
///
/// Hidden and ignored files are not filtered: generated output is often
/// git-ignored. In lenient mode unreadable entries are logged and skipped.
pub fn discover_pages(root: &Path, config: &LoaderConfig) -> Result<Vec<PageSource>> {
	let walker = WalkBuilder::new(root).standard_filters(false).follow_links(false).build();

	let mut pages = Vec::new();
	for entry in walker {
		let entry = match entry {
			Ok(entry) => entry,
			Err(err) if config.strict => return Err(err.into()),
			Err(err) => {
				tracing::warn!(error = %err, "loader.discover.entry_error");
				continue;
			}
		};

		if !entry.file_type().is_some_and(|t| t.is_file()) {
			continue;
		}

		match PageSource::new(root, entry.into_path(), config) {
			Ok(page) => pages.push(page),
			Err(LoadError::NotAPage(path)) => tracing::trace!(?path, "loader.discover.skip"),
			Err(err) => return Err(err),
		}
	}

	pages.sort_by(|a, b| a.path.cmp(&b.path));
	tracing::debug!(root = %root.display(), pages = pages.len(), "loader.discover");
	Ok(pages)
}
