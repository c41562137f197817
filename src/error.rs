/*!
# Error types

The adapter itself introduces no error conditions; whatever the downstream
[`TemplateHandler`](crate::TemplateHandler) returns is passed back to the
scanner untouched. The types here describe malformed input detected by the
bundled [`Scanner`](crate::Scanner) and give consumers a ready-made error type
for their handlers.
*/
use std::error;
use std::fmt;
use std::result::Result as StdResult;

use crate::span::Location;

pub const ERRCTX_ATTVAL: &'static str = "in attribute value";
pub const ERRCTX_ELEMENT: &'static str = "in element";
pub const ERRCTX_ELEMENT_FOOT: &'static str = "in element footer";
pub const ERRCTX_CDATA_SECTION: &'static str = "in CDATA section";
pub const ERRCTX_COMMENT: &'static str = "in comment";
pub const ERRCTX_DOCTYPE: &'static str = "in DOCTYPE";
pub const ERRCTX_XML_DECL: &'static str = "in XML declaration";
pub const ERRCTX_PI: &'static str = "in processing instruction";

/// Violation of the (very lax) markup grammar accepted by the scanner.
#[derive(Debug, Clone, PartialEq, Copy)]
pub enum WFError {
	/// End of input encountered during a construct where more data was
	/// expected.
	///
	/// The contents are implementation details.
	InvalidEof(&'static str),

	/// Character which was not expected at that point in the grammar.
	///
	/// The contents are implementation details.
	UnexpectedChar(&'static str, char, Option<&'static [&'static str]>),

	/// Generalized invalid syntactic construct which does not fit into any
	/// of the other categories.
	///
	/// The contents are implementation details.
	InvalidSyntax(&'static str),
}

impl error::Error for WFError {}

impl fmt::Display for WFError {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		match self {
			WFError::InvalidEof(ctx) => write!(f, "invalid eof {}", ctx),
			WFError::UnexpectedChar(ctx, ch, Some(opts)) if opts.len() > 0 => {
				write!(f, "U+{:x} not allowed {} (expected ", *ch as u32, ctx)?;
				if opts.len() == 1 {
					f.write_str(opts[0])?;
					f.write_str(")")
				} else {
					f.write_str("one of: ")?;
					for (i, opt) in opts.iter().enumerate() {
						if i > 0 {
							f.write_str(", ")?;
						}
						f.write_str(*opt)?;
					}
					f.write_str(")")
				}
			},
			WFError::UnexpectedChar(ctx, ch, _) => write!(f, "U+{:x} not allowed {}", *ch as u32, ctx),
			WFError::InvalidSyntax(msg) => write!(f, "invalid syntax: {}", msg),
		}
	}
}

/// Error types which may be returned from a parse.
#[derive(Debug)]
pub enum Error {
	/// The scanner rejected the input at the given location.
	NotWellFormed(WFError, Location),

	/// A template handler aborted the parse.
	///
	/// Handlers using [`Error`] as their error type report their own
	/// failures through this variant; the cause is available via
	/// [`std::error::Error::source`].
	Handler(Box<dyn error::Error + Send + Sync + 'static>),
}

pub type Result<T> = StdResult<T, Error>;

impl Error {
	pub(crate) fn wf(e: WFError, at: Location) -> Error {
		Error::NotWellFormed(e, at)
	}

	pub(crate) fn wfeof(ctx: &'static str, at: Location) -> Error {
		Error::NotWellFormed(WFError::InvalidEof(ctx), at)
	}

	/// Wrap an arbitrary handler failure.
	pub fn handler<E: Into<Box<dyn error::Error + Send + Sync + 'static>>>(e: E) -> Error {
		Error::Handler(e.into())
	}

	/// Location of a scanner error, if this is one.
	pub fn location(&self) -> Option<Location> {
		match self {
			Error::NotWellFormed(_, at) => Some(*at),
			Error::Handler(_) => None,
		}
	}
}

impl fmt::Display for Error {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::NotWellFormed(e, at) => write!(f, "not-well-formed: {} (line {}, col {})", e, at.line, at.col),
			Error::Handler(e) => write!(f, "handler error: {}", e),
		}
	}
}

impl error::Error for Error {
	fn source(&self) -> Option<&(dyn error::Error + 'static)> {
		match self {
			Error::Handler(e) => Some(&**e),
			Error::NotWellFormed(..) => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn invalid_syntax_display() {
		let e = WFError::InvalidSyntax("unknown XML declaration attribute");
		assert_eq!(format!("{}", e), "invalid syntax: unknown XML declaration attribute");
	}

	#[test]
	fn error_display_includes_location() {
		let e = Error::wfeof(ERRCTX_ELEMENT, Location::new(3, 7));
		assert_eq!(format!("{}", e), "not-well-formed: invalid eof in element (line 3, col 7)");
		assert_eq!(e.location(), Some(Location::new(3, 7)));
	}

	#[test]
	fn handler_error_exposes_source() {
		use std::error::Error as _;
		let e = Error::handler("stop right there");
		assert!(e.source().is_some());
		assert_eq!(format!("{}", e), "handler error: stop right there");
		assert!(e.location().is_none());
	}

	#[test]
	fn unexpected_char_lists_alternatives() {
		const EXPECTED: &'static [&'static str] = &["'>'", "'/>'"];
		let e = WFError::UnexpectedChar(ERRCTX_ELEMENT, '<', Some(EXPECTED));
		assert_eq!(format!("{}", e), "U+3c not allowed in element (expected one of: '>', '/>')");
	}
}
