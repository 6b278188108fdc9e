//! Error types for page loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or parsing an implementor page.
#[derive(Debug, Error)]
pub enum LoadError {
	/// Error reading a page file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The page script is not a well-formed implementor table.
	#[error("syntax error at {line}:{column}: {message}")]
	Syntax {
		line: usize,
		column: usize,
		message: String,
	},

	/// The JSON table could not be decoded.
	#[error("invalid JSON table: {0}")]
	Json(#[from] serde_json::Error),

	/// Directory traversal failed.
	#[error("failed to walk page directory: {0}")]
	Walk(#[from] ignore::Error),

	/// The path does not name a `trait.<Name>` page.
	#[error("not an implementor page: {0}")]
	NotAPage(PathBuf),

	/// Loader configuration is invalid.
	#[error(transparent)]
	Config(#[from] impldex_registry::ConfigError),
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoadError>;
