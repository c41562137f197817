/*!
# Buffer spans and source locations

Scanners report every lexical field as a [`Span`] into the buffer they are
currently working on. A span is only meaningful together with that buffer and
only for the duration of the callback which received it.
*/

/// Line and column of a construct in the source document.
///
/// Both are 1-based. Locations are passed through the adapter unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Location {
	pub line: usize,
	pub col: usize,
}

impl Location {
	pub const fn new(line: usize, col: usize) -> Location {
		Location{
			line: line,
			col: col,
		}
	}
}

/// Byte range into the scan buffer, together with the location of its first
/// character.
///
/// A span with a length of zero denotes an absent optional field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Span {
	pub offset: usize,
	pub len: usize,
	pub line: usize,
	pub col: usize,
}

impl Span {
	pub const fn new(offset: usize, len: usize, line: usize, col: usize) -> Span {
		Span{
			offset: offset,
			len: len,
			line: line,
			col: col,
		}
	}

	/// Construct a zero-length span, i.e. an absent field.
	pub const fn empty() -> Span {
		Span::new(0, 0, 0, 0)
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Offset of the first byte after the span.
	pub fn end(&self) -> usize {
		self.offset + self.len
	}

	pub fn location(&self) -> Location {
		Location::new(self.line, self.col)
	}

	/// Borrow the spanned text from `buffer`.
	///
	/// # Panics
	///
	/// If the span does not lie within `buffer` or does not fall on char
	/// boundaries. Scanners guarantee both for the spans they report.
	pub fn slice<'b>(&self, buffer: &'b str) -> &'b str {
		&buffer[self.offset..self.end()]
	}

	/// Borrow the spanned text, or `None` for a zero-length span.
	pub fn slice_opt<'b>(&self, buffer: &'b str) -> Option<&'b str> {
		if self.is_empty() {
			None
		} else {
			Some(self.slice(buffer))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn span_slice_returns_exact_content() {
		let buf = "<a href=\"x\"/>";
		let s = Span::new(1, 1, 1, 2);
		assert_eq!(s.slice(buf), "a");
		assert_eq!(s.end(), 2);
		assert_eq!(s.location(), Location::new(1, 2));
	}

	#[test]
	fn span_slice_opt_treats_zero_length_as_absent() {
		let buf = "foo";
		assert_eq!(Span::new(1, 0, 1, 2).slice_opt(buf), None);
		assert_eq!(Span::new(1, 2, 1, 2).slice_opt(buf), Some("oo"));
	}
}
