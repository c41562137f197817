use crate::span::Span;

/// Stack of the name spans of currently open elements.
#[derive(Debug, Clone, Default)]
pub(crate) struct ElementStack {
	open: Vec<Span>,
}

fn names_match(a: &str, b: &str, case_sensitive: bool) -> bool {
	if case_sensitive {
		a == b
	} else {
		a.eq_ignore_ascii_case(b)
	}
}

impl ElementStack {
	pub(crate) fn new() -> ElementStack {
		ElementStack{
			open: Vec::new(),
		}
	}

	pub(crate) fn len(&self) -> usize {
		self.open.len()
	}

	pub(crate) fn push(&mut self, name: Span) {
		self.open.push(name);
	}

	pub(crate) fn pop(&mut self) -> Option<Span> {
		self.open.pop()
	}

	/// Index of the innermost open element named `name`.
	pub(crate) fn position(&self, buffer: &str, name: &str, case_sensitive: bool) -> Option<usize> {
		self.open.iter().rposition(|span| names_match(span.slice(buffer), name, case_sensitive))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn position_finds_innermost_match() {
		let buf = "<a><b><a>";
		let mut s = ElementStack::new();
		s.push(Span::new(1, 1, 1, 2));
		s.push(Span::new(4, 1, 1, 5));
		s.push(Span::new(7, 1, 1, 8));
		assert_eq!(s.position(buf, "a", true), Some(2));
		assert_eq!(s.position(buf, "b", true), Some(1));
		assert_eq!(s.position(buf, "c", true), None);
	}

	#[test]
	fn position_respects_case_sensitivity() {
		let buf = "<Div>";
		let mut s = ElementStack::new();
		s.push(Span::new(1, 3, 1, 2));
		assert_eq!(s.position(buf, "div", true), None);
		assert_eq!(s.position(buf, "DIV", false), Some(0));
	}

	#[test]
	fn pop_returns_innermost() {
		let mut s = ElementStack::new();
		s.push(Span::new(1, 1, 1, 2));
		s.push(Span::new(4, 1, 1, 5));
		assert_eq!(s.pop(), Some(Span::new(4, 1, 1, 5)));
		assert_eq!(s.len(), 1);
	}
}
