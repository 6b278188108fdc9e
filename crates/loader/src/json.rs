//! JSON encoding of a page table: `{ "<unit>": ["<html>", ...], ... }`.

use impldex_registry::PartialIndex;

use crate::error::Result;
use crate::html::ImplementorHtml;

/// Decodes a JSON table. Key order follows the document; a repeated key keeps
/// its first position and its last value.
pub fn parse_json(source: &str) -> Result<PartialIndex<ImplementorHtml>> {
	Ok(serde_json::from_str(source)?)
}
