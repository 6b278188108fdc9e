//! Implementor page loading.
//!
//! Reads the generated per-trait pages (`implementors/<crate>/<path>/trait.<Name>.js`),
//! parses the table each one assigns, and hands it to an
//! [`impldex_registry`] registry with a single ingest call per page.
//!
//! Two encodings are understood: the registration script emitted by the doc
//! generator ([`parse_page`]) and a plain JSON object ([`parse_json`]).
//! Descriptors stay as [`ImplementorHtml`] markup; rendering is the consumer's
//! concern.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use impldex_loader::{LoaderConfig, load_trait_pages};
//! use impldex_registry::ImplementorCatalog;
//!
//! let config = LoaderConfig::default();
//! let mut catalog = ImplementorCatalog::new(config.registry.clone());
//! let summary = load_trait_pages(Path::new("target/doc"), &config, &mut catalog)?;
//! println!("{} pages, {} traits", summary.pages(), catalog.len());
//! # Ok::<(), impldex_loader::LoadError>(())
//! ```

pub mod config;
pub mod error;
mod html;
mod json;
mod page;
mod path;
mod script;

pub use config::LoaderConfig;
pub use error::{LoadError, Result};
pub use html::ImplementorHtml;
pub use json::parse_json;
pub use page::{LoadSummary, Page, load_trait_pages};
pub use path::{PageFormat, PageSource, TraitPath, discover_pages};
pub use script::{parse_page, parse_page_with};
