/*!
# Typed template event surface

The downstream half of the adapter: a [`TemplateHandler`] receives events
carrying resolved definitions and owned text instead of buffer offsets.
Nothing passed to a template handler borrows from the scan buffer except
the plain `&str` arguments of text, comment and CDATA events, which are
forwarded without copying; handlers wishing to retain those must copy them.
*/
use std::time::{Duration, Instant};

use crate::attribute::AttributeValueQuoting;
use crate::definition::{AttributeDefinition, ElementDefinition};
use crate::span::Location;
use crate::RcPtr;

/// Materialized XML declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDeclaration {
	/// The complete declaration as written.
	pub xml_declaration: RcPtr<str>,
	pub keyword: RcPtr<str>,
	pub version: Option<RcPtr<str>>,
	pub encoding: Option<RcPtr<str>>,
	pub standalone: Option<RcPtr<str>>,
}

/// Materialized DOCTYPE clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocType {
	/// The complete clause as written.
	pub doctype: RcPtr<str>,
	pub keyword: RcPtr<str>,
	pub root_element_name: RcPtr<str>,
	/// `PUBLIC` or `SYSTEM`, if given.
	pub doctype_type: Option<RcPtr<str>>,
	pub public_id: Option<RcPtr<str>>,
	pub system_id: Option<RcPtr<str>>,
	pub internal_subset: Option<RcPtr<str>>,
}

/// Materialized processing instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingInstruction {
	/// The complete instruction as written.
	pub processing_instruction: RcPtr<str>,
	pub target: RcPtr<str>,
	pub content: Option<RcPtr<str>>,
}

/// Attribute of an element, with its name resolved.
///
/// `operator`, `value` and `quoting` are either all `None` (bare attribute)
/// or all `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
	pub definition: RcPtr<AttributeDefinition>,
	/// The name as written in the source.
	pub name: RcPtr<str>,
	pub operator: Option<RcPtr<str>>,
	pub value: Option<RcPtr<str>>,
	pub quoting: Option<AttributeValueQuoting>,
}

/**
# Receiver of template events

Every method has a default implementation which accepts the event and does
nothing. Returning an error aborts processing; the adapter propagates it to
the scanner unchanged.

Element events come in start/end pairs. All attribute and inner-whitespace
events of a tag arrive between them, and the definition and name passed to
the end event are reference-identical to those passed to the start event.
*/
#[allow(unused_variables)]
pub trait TemplateHandler {
	type Error;

	fn handle_document_start(&mut self, start_time: Instant, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_document_end(&mut self, end_time: Instant, total_time: Duration, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_xml_declaration(&mut self, decl: &XmlDeclaration, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_doctype(&mut self, doctype: &DocType, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_cdata_section(&mut self, content: &str, outer: &str, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_comment(&mut self, content: &str, outer: &str, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_text(&mut self, text: &str, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_standalone_element_start(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, minimized: bool, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_standalone_element_end(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, minimized: bool, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_open_element_start(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_open_element_end(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_auto_open_element_start(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_auto_open_element_end(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_close_element_start(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_close_element_end(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_auto_close_element_start(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_auto_close_element_end(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_unmatched_close_element_start(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_unmatched_close_element_end(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_attribute(&mut self, attribute: &Attribute, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_inner_whitespace(&mut self, whitespace: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}

	fn handle_processing_instruction(&mut self, pi: &ProcessingInstruction, at: Location) -> Result<(), Self::Error> {
		Ok(())
	}
}

macro_rules! forward_element_events {
	($($method:ident),*) => {
		$(
			fn $method(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
				(**self).$method(definition, name, at)
			}
		)*
	}
}

impl<H: TemplateHandler + ?Sized> TemplateHandler for &mut H {
	type Error = H::Error;

	fn handle_document_start(&mut self, start_time: Instant, at: Location) -> Result<(), Self::Error> {
		(**self).handle_document_start(start_time, at)
	}

	fn handle_document_end(&mut self, end_time: Instant, total_time: Duration, at: Location) -> Result<(), Self::Error> {
		(**self).handle_document_end(end_time, total_time, at)
	}

	fn handle_xml_declaration(&mut self, decl: &XmlDeclaration, at: Location) -> Result<(), Self::Error> {
		(**self).handle_xml_declaration(decl, at)
	}

	fn handle_doctype(&mut self, doctype: &DocType, at: Location) -> Result<(), Self::Error> {
		(**self).handle_doctype(doctype, at)
	}

	fn handle_cdata_section(&mut self, content: &str, outer: &str, at: Location) -> Result<(), Self::Error> {
		(**self).handle_cdata_section(content, outer, at)
	}

	fn handle_comment(&mut self, content: &str, outer: &str, at: Location) -> Result<(), Self::Error> {
		(**self).handle_comment(content, outer, at)
	}

	fn handle_text(&mut self, text: &str, at: Location) -> Result<(), Self::Error> {
		(**self).handle_text(text, at)
	}

	fn handle_standalone_element_start(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, minimized: bool, at: Location) -> Result<(), Self::Error> {
		(**self).handle_standalone_element_start(definition, name, minimized, at)
	}

	fn handle_standalone_element_end(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, minimized: bool, at: Location) -> Result<(), Self::Error> {
		(**self).handle_standalone_element_end(definition, name, minimized, at)
	}

	forward_element_events!(
		handle_open_element_start,
		handle_open_element_end,
		handle_auto_open_element_start,
		handle_auto_open_element_end,
		handle_close_element_start,
		handle_close_element_end,
		handle_auto_close_element_start,
		handle_auto_close_element_end,
		handle_unmatched_close_element_start,
		handle_unmatched_close_element_end
	);

	fn handle_attribute(&mut self, attribute: &Attribute, at: Location) -> Result<(), Self::Error> {
		(**self).handle_attribute(attribute, at)
	}

	fn handle_inner_whitespace(&mut self, whitespace: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		(**self).handle_inner_whitespace(whitespace, at)
	}

	fn handle_processing_instruction(&mut self, pi: &ProcessingInstruction, at: Location) -> Result<(), Self::Error> {
		(**self).handle_processing_instruction(pi, at)
	}
}
