//! Parser for generated implementor page scripts.
//!
//! A page looks like:
//!
//! ```text
//! (function() {var implementors = {};
//! implementors["openssl"] = ["impl ... BigNum",];implementors["hyper"] = [];
//!
//!     if (window.register_implementors) {
//!         window.register_implementors(implementors);
//!     } else {
//!         window.pending_implementors = implementors;
//!     }
//! })()
//! ```
//!
//! Only the assignments carry data. The wrapper and the registration epilogue
//! are recognised and skipped; registration itself is the registry's job.

mod scanner;

use impldex_registry::PartialIndex;
use scanner::Scanner;

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::html::ImplementorHtml;

const TABLE: &str = "implementors";

/// Parses a page script with default (lenient) settings.
pub fn parse_page(source: &str) -> Result<PartialIndex<ImplementorHtml>> {
	parse_page_with(source, &LoaderConfig::default())
}

/// Parses a page script into the table it assigns.
///
/// Assignments are syntax-checked in every mode. In strict mode anything
/// besides the wrapper, the table declaration, assignments and the
/// registration epilogue is an error; otherwise unknown statements, blocks
/// included, are skipped. The table ends at the registration epilogue, the
/// `})()` wrapper tail, or the end of input.
pub fn parse_page_with(source: &str, config: &LoaderConfig) -> Result<PartialIndex<ImplementorHtml>> {
	let mut sc = Scanner::new(source);
	let mut partial = PartialIndex::new();

	sc.skip_trivia();
	sc.eat_seq(&["(", "function", "(", ")", "{"]);
	sc.skip_trivia();
	if sc.eat_seq(&["var", TABLE, "=", "{", "}"]) {
		sc.skip_trivia();
		sc.eat(";");
	} else if config.strict {
		return Err(sc.error(format!("expected `var {TABLE} = {{}};`, found {}", sc.describe_next())));
	}

	loop {
		sc.skip_trivia();
		if sc.at_end() {
			break;
		}

		let start = sc.pos();
		if sc.eat_seq(&[TABLE, "["]) {
			sc.seek(start);
			let (unit, implementors) = assignment(&mut sc)?;
			if partial.insert(unit.as_str(), implementors).is_some() {
				tracing::trace!(unit = %unit, "loader.page.reassigned");
			}
			continue;
		}

		if sc.eat_seq(&["if", "(", "window", ".", "register_implementors", ")"]) {
			break;
		}
		if sc.eat_seq(&["}", ")", "(", ")"]) {
			break;
		}
		if config.strict {
			return Err(sc.error(format!("unexpected statement starting with {}", sc.describe_next())));
		}

		tracing::debug!(offset = start, "loader.page.skip_statement");
		sc.skip_statement();
		if sc.pos() == start {
			// Unmatched closing bracket.
			sc.bump();
		}
	}

	Ok(partial)
}

/// `implementors["<unit>"] = [<string>, ...];`
fn assignment(sc: &mut Scanner<'_>) -> Result<(String, Vec<ImplementorHtml>)> {
	sc.eat_word(TABLE);
	sc.expect("[")?;
	sc.skip_trivia();
	let unit = string_literal(sc)?;
	sc.expect("]")?;
	sc.expect("=")?;
	sc.expect("[")?;

	let mut implementors = Vec::new();
	loop {
		sc.skip_trivia();
		if sc.eat("]") {
			break;
		}
		implementors.push(ImplementorHtml::new(string_literal(sc)?));
		sc.skip_trivia();
		if sc.eat(",") {
			continue;
		}
		if sc.eat("]") {
			break;
		}
		return Err(sc.error(format!("expected `,` or `]`, found {}", sc.describe_next())));
	}

	sc.skip_trivia();
	sc.eat(";");
	Ok((unit, implementors))
}

fn string_literal(sc: &mut Scanner<'_>) -> Result<String> {
	let start = sc.pos();
	let quote = match sc.peek() {
		Some(q @ ('"' | '\'')) => q,
		_ => return Err(sc.error(format!("expected string literal, found {}", sc.describe_next()))),
	};
	sc.bump();

	let mut out = String::new();
	loop {
		match sc.bump() {
			None | Some('\n') => return Err(sc.error_at(start, "unterminated string literal")),
			Some(c) if c == quote => return Ok(out),
			Some('\\') => escape(sc, &mut out, start)?,
			Some(c) => out.push(c),
		}
	}
}

fn escape(sc: &mut Scanner<'_>, out: &mut String, start: usize) -> Result<()> {
	let Some(c) = sc.bump() else {
		return Err(sc.error_at(start, "unterminated string literal"));
	};
	match c {
		'n' => out.push('\n'),
		't' => out.push('\t'),
		'r' => out.push('\r'),
		'b' => out.push('\u{8}'),
		'f' => out.push('\u{c}'),
		'v' => out.push('\u{b}'),
		'0' => out.push('\0'),
		'x' => {
			let code = hex_digits(sc, 2)?;
			out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
		}
		'u' => out.push(unicode_escape(sc)?),
		// Line continuation.
		'\n' | '\u{2028}' | '\u{2029}' => {}
		'\r' => {
			sc.eat("\n");
		}
		other => out.push(other),
	}
	Ok(())
}

/// `\uXXXX`, `\u{X...}`, and UTF-16 surrogate pairs.
fn unicode_escape(sc: &mut Scanner<'_>) -> Result<char> {
	if sc.eat("{") {
		let digits_start = sc.pos();
		let Some(len) = sc.rest().find('}') else {
			return Err(sc.error("unterminated `\\u{...}` escape"));
		};
		let digits = &sc.rest()[..len];
		let code = u32::from_str_radix(digits, 16)
			.map_err(|_| sc.error_at(digits_start, format!("invalid unicode escape `{digits}`")))?;
		sc.seek(digits_start + len + 1);
		return Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
	}

	let high = hex_digits(sc, 4)?;
	if !(0xD800..=0xDBFF).contains(&high) {
		return Ok(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER));
	}

	let resume = sc.pos();
	if sc.eat("\\u")
		&& let Ok(low) = hex_digits(sc, 4)
		&& (0xDC00..=0xDFFF).contains(&low)
	{
		let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
		return Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
	}
	sc.seek(resume);
	Ok(char::REPLACEMENT_CHARACTER)
}

fn hex_digits(sc: &mut Scanner<'_>, count: usize) -> Result<u32> {
	let start = sc.pos();
	let mut code = 0u32;
	for _ in 0..count {
		match sc.peek().and_then(|c| c.to_digit(16)) {
			Some(d) => {
				code = code * 16 + d;
				sc.bump();
			}
			None => {
				let found = sc.describe_next();
				sc.seek(start);
				return Err(sc.error(format!("expected {count} hex digits, found {found}")));
			}
		}
	}
	Ok(code)
}
