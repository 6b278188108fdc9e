//! Character-level cursor over a page script.

use crate::error::LoadError;

pub(super) struct Scanner<'a> {
	src: &'a str,
	pos: usize,
}

impl<'a> Scanner<'a> {
	pub(super) fn new(src: &'a str) -> Self {
		Self { src, pos: 0 }
	}

	pub(super) fn pos(&self) -> usize {
		self.pos
	}

	pub(super) fn rest(&self) -> &'a str {
		&self.src[self.pos..]
	}

	pub(super) fn at_end(&self) -> bool {
		self.pos >= self.src.len()
	}

	pub(super) fn peek(&self) -> Option<char> {
		self.rest().chars().next()
	}

	pub(super) fn bump(&mut self) -> Option<char> {
		let c = self.peek()?;
		self.pos += c.len_utf8();
		Some(c)
	}

	/// Skips whitespace and `//` or `/* */` comments.
	pub(super) fn skip_trivia(&mut self) {
		loop {
			let rest = self.rest();
			let trimmed = rest.trim_start();
			self.pos += rest.len() - trimmed.len();

			if trimmed.starts_with("//") {
				let end = trimmed.find('\n').unwrap_or(trimmed.len());
				self.pos += end;
			} else if let Some(body) = trimmed.strip_prefix("/*") {
				match body.find("*/") {
					Some(end) => self.pos += end + 4,
					None => self.pos = self.src.len(),
				}
			} else {
				return;
			}
		}
	}

	/// Consumes `punct` if it comes next.
	pub(super) fn eat(&mut self, punct: &str) -> bool {
		if self.rest().starts_with(punct) {
			self.pos += punct.len();
			true
		} else {
			false
		}
	}

	/// Consumes the identifier `word` if it comes next as a whole word.
	pub(super) fn eat_word(&mut self, word: &str) -> bool {
		let rest = self.rest();
		if !rest.starts_with(word) {
			return false;
		}
		let boundary = rest[word.len()..].chars().next().is_none_or(|c| !is_ident_char(c));
		if boundary {
			self.pos += word.len();
		}
		boundary
	}

	/// Consumes a token sequence separated by optional trivia, or nothing at all.
	pub(super) fn eat_seq(&mut self, tokens: &[&str]) -> bool {
		let start = self.pos;
		for (i, token) in tokens.iter().enumerate() {
			if i > 0 {
				self.skip_trivia();
			}
			let ok = if token.chars().all(is_ident_char) {
				self.eat_word(token)
			} else {
				self.eat(token)
			};
			if !ok {
				self.pos = start;
				return false;
			}
		}
		true
	}

	pub(super) fn expect(&mut self, punct: &str) -> Result<(), LoadError> {
		self.skip_trivia();
		if self.eat(punct) {
			Ok(())
		} else {
			Err(self.error(format!("expected `{punct}`, found {}", self.describe_next())))
		}
	}

	/// Moves past one statement: through a `;` or a closing `}` at depth zero.
	///
	/// Strings and comments are stepped over whole. Stops in front of an
	/// unmatched closing bracket.
	pub(super) fn skip_statement(&mut self) {
		let mut depth = 0usize;
		while let Some(c) = self.peek() {
			let rest = self.rest();
			if rest.starts_with("//") || rest.starts_with("/*") {
				self.skip_trivia();
				continue;
			}
			match c {
				'"' | '\'' | '`' => self.skip_string(c),
				'(' | '[' | '{' => {
					depth += 1;
					self.bump();
				}
				')' | ']' | '}' => {
					if depth == 0 {
						return;
					}
					depth -= 1;
					self.bump();
					if depth == 0 && c == '}' {
						self.eat(";");
						return;
					}
				}
				';' if depth == 0 => {
					self.bump();
					return;
				}
				_ => {
					self.bump();
				}
			}
		}
	}

	/// Steps over a quoted string without decoding it. Unterminated quotes end
	/// at the line break; template literals may span lines.
	fn skip_string(&mut self, quote: char) {
		self.bump();
		while let Some(c) = self.bump() {
			match c {
				'\\' => {
					self.bump();
				}
				'\n' if quote != '`' => return,
				c if c == quote => return,
				_ => {}
			}
		}
	}

	pub(super) fn describe_next(&self) -> String {
		match self.peek() {
			Some(c) => format!("`{c}`"),
			None => "end of input".to_string(),
		}
	}

	pub(super) fn error(&self, message: impl Into<String>) -> LoadError {
		self.error_at(self.pos, message)
	}

	/// Builds a syntax error positioned at byte `offset`, 1-based line and column.
	pub(super) fn error_at(&self, offset: usize, message: impl Into<String>) -> LoadError {
		let before = &self.src[..offset.min(self.src.len())];
		let line = before.matches('\n').count() + 1;
		let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
		LoadError::Syntax {
			line,
			column,
			message: message.into(),
		}
	}

	pub(super) fn seek(&mut self, pos: usize) {
		self.pos = pos;
	}
}

fn is_ident_char(c: char) -> bool {
	c.is_alphanumeric() || c == '_' || c == '$'
}
