use crate::span::{Location, Span};

/// Read position in an in-memory document, tracking line and column.
///
/// Columns count characters, not bytes.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
	buf: &'a str,
	pos: usize,
	line: usize,
	col: usize,
}

impl<'a> Cursor<'a> {
	pub(crate) fn new(buf: &'a str) -> Cursor<'a> {
		Cursor{
			buf: buf,
			pos: 0,
			line: 1,
			col: 1,
		}
	}

	pub(crate) fn location(&self) -> Location {
		Location::new(self.line, self.col)
	}

	pub(crate) fn is_eof(&self) -> bool {
		self.pos >= self.buf.len()
	}

	pub(crate) fn rest(&self) -> &'a str {
		&self.buf[self.pos..]
	}

	pub(crate) fn peek(&self) -> Option<char> {
		self.rest().chars().next()
	}

	pub(crate) fn peek_byte_at(&self, n: usize) -> Option<u8> {
		self.rest().as_bytes().get(n).copied()
	}

	pub(crate) fn starts_with(&self, s: &str) -> bool {
		self.rest().starts_with(s)
	}

	/// ASCII-case-insensitive prefix test; `s` must be ASCII.
	pub(crate) fn starts_with_ignore_case(&self, s: &str) -> bool {
		let rest = self.rest().as_bytes();
		rest.len() >= s.len() && rest[..s.len()].eq_ignore_ascii_case(s.as_bytes())
	}

	/// Byte offset of `needle` relative to the current position.
	pub(crate) fn find<P: FindPattern>(&self, needle: P) -> Option<usize> {
		needle.find_in(self.rest())
	}

	/// Move forward by `n` bytes, which must end on a char boundary.
	pub(crate) fn advance(&mut self, n: usize) {
		let end = self.pos + n;
		for ch in self.buf[self.pos..end].chars() {
			if ch == '\n' {
				self.line += 1;
				self.col = 1;
			} else {
				self.col += 1;
			}
		}
		self.pos = end;
	}

	/// Zero-length span at the current position; also used as a start mark
	/// for [`Cursor::span_from`].
	pub(crate) fn here(&self) -> Span {
		Span::new(self.pos, 0, self.line, self.col)
	}

	/// Span from `mark` up to the current position.
	pub(crate) fn span_from(&self, mark: Span) -> Span {
		Span::new(mark.offset, self.pos - mark.offset, mark.line, mark.col)
	}

	pub(crate) fn take(&mut self, n: usize) -> Span {
		let mark = self.here();
		self.advance(n);
		self.span_from(mark)
	}

	pub(crate) fn take_while<F: Fn(char) -> bool>(&mut self, f: F) -> Span {
		let rest = self.rest();
		let n = rest.char_indices()
			.find(|(_, ch)| !f(*ch))
			.map(|(i, _)| i)
			.unwrap_or(rest.len());
		self.take(n)
	}
}

// std::str::pattern::Pattern is unstable
pub(crate) trait FindPattern {
	fn find_in(self, haystack: &str) -> Option<usize>;
}

impl FindPattern for char {
	fn find_in(self, haystack: &str) -> Option<usize> {
		haystack.find(self)
	}
}

impl<'x> FindPattern for &'x str {
	fn find_in(self, haystack: &str) -> Option<usize> {
		haystack.find(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn advance_tracks_lines_and_columns() {
		let mut c = Cursor::new("ab\ncä\nd");
		c.advance(2);
		assert_eq!(c.location(), Location::new(1, 3));
		c.advance(1);
		assert_eq!(c.location(), Location::new(2, 1));
		// 'ä' is two bytes but one column
		c.advance(3);
		assert_eq!(c.location(), Location::new(2, 3));
		c.advance(1);
		assert_eq!(c.location(), Location::new(3, 1));
	}

	#[test]
	fn take_while_returns_span_with_start_location() {
		let mut c = Cursor::new("  foo bar");
		c.advance(2);
		let s = c.take_while(|ch| ch.is_ascii_alphabetic());
		assert_eq!(s, Span::new(2, 3, 1, 3));
		assert_eq!(c.peek(), Some(' '));
	}

	#[test]
	fn take_while_stops_at_eof() {
		let mut c = Cursor::new("foo");
		let s = c.take_while(|_| true);
		assert_eq!(s.len, 3);
		assert!(c.is_eof());
		assert_eq!(c.peek(), None);
	}

	#[test]
	fn starts_with_ignore_case() {
		let c = Cursor::new("<!DocType html>");
		assert!(c.starts_with_ignore_case("<!doctype"));
		assert!(!c.starts_with("<!doctype"));
		assert!(!Cursor::new("<!Doc").starts_with_ignore_case("<!doctype"));
	}

	#[test]
	fn find_is_relative_to_position() {
		let mut c = Cursor::new("a-->b-->");
		c.advance(4);
		assert_eq!(c.find("-->"), Some(1));
		assert_eq!(c.find('b'), Some(0));
	}
}
