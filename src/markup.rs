/*!
# Lexical callback surface

A markup scanner reports what it finds through a [`MarkupHandler`]. Every
callback receives the scan buffer as a `&str` plus [`Span`]s into it; the
buffer is only valid for the duration of the call and must not be retained
(the borrow checker enforces this). Zero-length spans denote absent optional
fields.

Constructs which may contain attributes are split into a *start* and an *end*
callback. Attribute and inner-whitespace callbacks for a tag arrive strictly
between them, and the name span passed to the end callback is identical to
the one passed to its start.
*/
use std::time::{Duration, Instant};

use crate::span::{Location, Span};

/// Spans of an XML declaration (`<?xml version="1.0" ...?>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XmlDeclarationSpans {
	/// `xml`
	pub keyword: Span,
	pub version: Span,
	pub encoding: Span,
	pub standalone: Span,
	/// The complete declaration, including delimiters.
	pub outer: Span,
}

/// Spans of a DOCTYPE clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocTypeSpans {
	/// `DOCTYPE`, in whatever casing it was written
	pub keyword: Span,
	pub element_name: Span,
	/// `PUBLIC` or `SYSTEM`
	pub doctype_type: Span,
	pub public_id: Span,
	pub system_id: Span,
	/// Content between `[` and `]`
	pub internal_subset: Span,
	/// The complete clause, including delimiters.
	pub outer: Span,
}

/// Spans of a single attribute inside a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttributeSpans {
	pub name: Span,
	/// `=`, including any whitespace around it; empty for bare attributes.
	pub operator: Span,
	/// The value without delimiters.
	pub value_content: Span,
	/// The value including its delimiters, if any.
	pub value_outer: Span,
}

/// Spans of a processing instruction (`<?target content?>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessingInstructionSpans {
	pub target: Span,
	pub content: Span,
	/// The complete instruction, including delimiters.
	pub outer: Span,
}

/**
# Receiver of lexical events

All methods default to doing nothing, so implementors only need to override
what they care about. Returning an error aborts the scan; the scanner passes
the error back to its caller unchanged.

The `at` argument is the location the construct is attributed to: the
opening `<` for tags and markup declarations, the attribute name for
attributes and the first character for text.
*/
#[allow(unused_variables)]
pub trait MarkupHandler {
	type Error;

	fn handle_document_start(&mut self, start_time: Instant, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_document_end(&mut self, end_time: Instant, total_time: Duration, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_xml_declaration(&mut self, buffer: &str, spans: &XmlDeclarationSpans, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_doctype(&mut self, buffer: &str, spans: &DocTypeSpans, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_cdata_section(&mut self, buffer: &str, content: &Span, outer: &Span, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_comment(&mut self, buffer: &str, content: &Span, outer: &Span, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_text(&mut self, buffer: &str, text: &Span, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_standalone_element_start(&mut self, buffer: &str, name: &Span, minimized: bool, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_standalone_element_end(&mut self, buffer: &str, name: &Span, minimized: bool, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_open_element_start(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_open_element_end(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_auto_open_element_start(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_auto_open_element_end(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_close_element_start(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_close_element_end(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_auto_close_element_start(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_auto_close_element_end(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_unmatched_close_element_start(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_unmatched_close_element_end(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_attribute(&mut self, buffer: &str, spans: &AttributeSpans, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_inner_whitespace(&mut self, buffer: &str, whitespace: &Span, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_processing_instruction(&mut self, buffer: &str, spans: &ProcessingInstructionSpans, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}
}
