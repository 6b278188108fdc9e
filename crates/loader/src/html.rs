//! The descriptor payload carried by generated pages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rendered markup for one implementing type, exactly as the page shipped it.
///
/// Entity escapes are left untouched; the renderer owns this string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImplementorHtml(String);

impl ImplementorHtml {
	pub fn new(markup: impl Into<String>) -> Self {
		Self(markup.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_inner(self) -> String {
		self.0
	}

	/// Markup with tags removed and the common entities decoded.
	///
	/// `impl&lt;'a&gt; <a ...>Shr</a>` becomes `impl<'a> Shr`.
	pub fn plain_text(&self) -> String {
		let mut out = String::with_capacity(self.0.len());
		let mut rest = self.0.as_str();

		while let Some(c) = rest.chars().next() {
			match c {
				'<' => match rest.find('>') {
					Some(end) => rest = &rest[end + 1..],
					None => {
						out.push_str(rest);
						break;
					}
				},
				'&' => {
					let (decoded, len) = decode_entity(rest);
					out.push_str(decoded);
					rest = &rest[len..];
				}
				_ => {
					out.push(c);
					rest = &rest[c.len_utf8()..];
				}
			}
		}
		out
	}
}

const ENTITIES: &[(&str, &str)] = &[
	("&lt;", "<"),
	("&gt;", ">"),
	("&amp;", "&"),
	("&quot;", "\""),
	("&#39;", "'"),
	("&apos;", "'"),
	("&nbsp;", " "),
];

fn decode_entity(s: &str) -> (&'static str, usize) {
	ENTITIES
		.iter()
		.find(|(entity, _)| s.starts_with(entity))
		.map(|(entity, text)| (*text, entity.len()))
		.unwrap_or(("&", 1))
}

impl fmt::Display for ImplementorHtml {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<String> for ImplementorHtml {
	fn from(markup: String) -> Self {
		Self(markup)
	}
}

impl From<&str> for ImplementorHtml {
	fn from(markup: &str) -> Self {
		Self(markup.to_string())
	}
}
