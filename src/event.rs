/*!
# Owned template events

[`Event`] is the tagged-union view of the [`TemplateHandler`] surface: one
variant per callback, owning all of its data. [`EventRecorder`] is a
template handler which simply collects these, which is handy for tests and
for consumers preferring to match on data over implementing a trait.
*/
use std::time::{Duration, Instant};

use crate::definition::ElementDefinition;
use crate::error::Error;
use crate::span::Location;
use crate::template::{Attribute, DocType, ProcessingInstruction, TemplateHandler, XmlDeclaration};
use crate::RcPtr;

/// A single template event.
///
/// Text, comment and CDATA contents, which are borrowed from the scan
/// buffer on the handler surface, are copied into owned strings here.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
	DocumentStart{ start_time: Instant, at: Location },
	DocumentEnd{ end_time: Instant, total_time: Duration, at: Location },
	XmlDeclaration{ decl: XmlDeclaration, at: Location },
	DocType{ doctype: DocType, at: Location },
	CDataSection{ content: String, outer: String, at: Location },
	Comment{ content: String, outer: String, at: Location },
	Text{ text: String, at: Location },
	StandaloneElementStart{ definition: RcPtr<ElementDefinition>, name: RcPtr<str>, minimized: bool, at: Location },
	StandaloneElementEnd{ definition: RcPtr<ElementDefinition>, name: RcPtr<str>, minimized: bool, at: Location },
	OpenElementStart{ definition: RcPtr<ElementDefinition>, name: RcPtr<str>, at: Location },
	OpenElementEnd{ definition: RcPtr<ElementDefinition>, name: RcPtr<str>, at: Location },
	AutoOpenElementStart{ definition: RcPtr<ElementDefinition>, name: RcPtr<str>, at: Location },
	AutoOpenElementEnd{ definition: RcPtr<ElementDefinition>, name: RcPtr<str>, at: Location },
	CloseElementStart{ definition: RcPtr<ElementDefinition>, name: RcPtr<str>, at: Location },
	CloseElementEnd{ definition: RcPtr<ElementDefinition>, name: RcPtr<str>, at: Location },
	AutoCloseElementStart{ definition: RcPtr<ElementDefinition>, name: RcPtr<str>, at: Location },
	AutoCloseElementEnd{ definition: RcPtr<ElementDefinition>, name: RcPtr<str>, at: Location },
	UnmatchedCloseElementStart{ definition: RcPtr<ElementDefinition>, name: RcPtr<str>, at: Location },
	UnmatchedCloseElementEnd{ definition: RcPtr<ElementDefinition>, name: RcPtr<str>, at: Location },
	Attribute{ attribute: Attribute, at: Location },
	InnerWhitespace{ whitespace: RcPtr<str>, at: Location },
	ProcessingInstruction{ pi: ProcessingInstruction, at: Location },
}

impl Event {
	/// Location the event was reported at.
	pub fn location(&self) -> Location {
		match self {
			Self::DocumentStart{ at, .. } |
			Self::DocumentEnd{ at, .. } |
			Self::XmlDeclaration{ at, .. } |
			Self::DocType{ at, .. } |
			Self::CDataSection{ at, .. } |
			Self::Comment{ at, .. } |
			Self::Text{ at, .. } |
			Self::StandaloneElementStart{ at, .. } |
			Self::StandaloneElementEnd{ at, .. } |
			Self::OpenElementStart{ at, .. } |
			Self::OpenElementEnd{ at, .. } |
			Self::AutoOpenElementStart{ at, .. } |
			Self::AutoOpenElementEnd{ at, .. } |
			Self::CloseElementStart{ at, .. } |
			Self::CloseElementEnd{ at, .. } |
			Self::AutoCloseElementStart{ at, .. } |
			Self::AutoCloseElementEnd{ at, .. } |
			Self::UnmatchedCloseElementStart{ at, .. } |
			Self::UnmatchedCloseElementEnd{ at, .. } |
			Self::Attribute{ at, .. } |
			Self::InnerWhitespace{ at, .. } |
			Self::ProcessingInstruction{ at, .. } => *at,
		}
	}

	/// Element definition and name, if this is an element event.
	pub fn element(&self) -> Option<(&RcPtr<ElementDefinition>, &RcPtr<str>)> {
		match self {
			Self::StandaloneElementStart{ definition, name, .. } |
			Self::StandaloneElementEnd{ definition, name, .. } |
			Self::OpenElementStart{ definition, name, .. } |
			Self::OpenElementEnd{ definition, name, .. } |
			Self::AutoOpenElementStart{ definition, name, .. } |
			Self::AutoOpenElementEnd{ definition, name, .. } |
			Self::CloseElementStart{ definition, name, .. } |
			Self::CloseElementEnd{ definition, name, .. } |
			Self::AutoCloseElementStart{ definition, name, .. } |
			Self::AutoCloseElementEnd{ definition, name, .. } |
			Self::UnmatchedCloseElementStart{ definition, name, .. } |
			Self::UnmatchedCloseElementEnd{ definition, name, .. } => Some((definition, name)),
			_ => None,
		}
	}
}

/// Template handler collecting all events into a vector.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
	events: Vec<Event>,
}

impl EventRecorder {
	pub fn new() -> EventRecorder {
		EventRecorder{
			events: Vec::new(),
		}
	}

	pub fn events(&self) -> &[Event] {
		&self.events
	}

	pub fn into_events(self) -> Vec<Event> {
		self.events
	}

	pub fn len(&self) -> usize {
		self.events.len()
	}

	pub fn is_empty(&self) -> bool {
		self.events.is_empty()
	}

	pub fn clear(&mut self) {
		self.events.clear()
	}

	fn push(&mut self, ev: Event) -> Result<(), Error> {
		self.events.push(ev);
		Ok(())
	}
}

impl TemplateHandler for EventRecorder {
	type Error = Error;

	fn handle_document_start(&mut self, start_time: Instant, at: Location) -> Result<(), Self::Error> {
		self.push(Event::DocumentStart{ start_time, at })
	}

	fn handle_document_end(&mut self, end_time: Instant, total_time: Duration, at: Location) -> Result<(), Self::Error> {
		self.push(Event::DocumentEnd{ end_time, total_time, at })
	}

	fn handle_xml_declaration(&mut self, decl: &XmlDeclaration, at: Location) -> Result<(), Self::Error> {
		self.push(Event::XmlDeclaration{ decl: decl.clone(), at })
	}

	fn handle_doctype(&mut self, doctype: &DocType, at: Location) -> Result<(), Self::Error> {
		self.push(Event::DocType{ doctype: doctype.clone(), at })
	}

	fn handle_cdata_section(&mut self, content: &str, outer: &str, at: Location) -> Result<(), Self::Error> {
		self.push(Event::CDataSection{ content: content.to_string(), outer: outer.to_string(), at })
	}

	fn handle_comment(&mut self, content: &str, outer: &str, at: Location) -> Result<(), Self::Error> {
		self.push(Event::Comment{ content: content.to_string(), outer: outer.to_string(), at })
	}

	fn handle_text(&mut self, text: &str, at: Location) -> Result<(), Self::Error> {
		self.push(Event::Text{ text: text.to_string(), at })
	}

	fn handle_standalone_element_start(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, minimized: bool, at: Location) -> Result<(), Self::Error> {
		self.push(Event::StandaloneElementStart{ definition: definition.clone(), name: name.clone(), minimized, at })
	}

	fn handle_standalone_element_end(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, minimized: bool, at: Location) -> Result<(), Self::Error> {
		self.push(Event::StandaloneElementEnd{ definition: definition.clone(), name: name.clone(), minimized, at })
	}

	fn handle_open_element_start(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		self.push(Event::OpenElementStart{ definition: definition.clone(), name: name.clone(), at })
	}

	fn handle_open_element_end(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		self.push(Event::OpenElementEnd{ definition: definition.clone(), name: name.clone(), at })
	}

	fn handle_auto_open_element_start(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		self.push(Event::AutoOpenElementStart{ definition: definition.clone(), name: name.clone(), at })
	}

	fn handle_auto_open_element_end(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		self.push(Event::AutoOpenElementEnd{ definition: definition.clone(), name: name.clone(), at })
	}

	fn handle_close_element_start(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		self.push(Event::CloseElementStart{ definition: definition.clone(), name: name.clone(), at })
	}

	fn handle_close_element_end(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		self.push(Event::CloseElementEnd{ definition: definition.clone(), name: name.clone(), at })
	}

	fn handle_auto_close_element_start(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		self.push(Event::AutoCloseElementStart{ definition: definition.clone(), name: name.clone(), at })
	}

	fn handle_auto_close_element_end(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		self.push(Event::AutoCloseElementEnd{ definition: definition.clone(), name: name.clone(), at })
	}

	fn handle_unmatched_close_element_start(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		self.push(Event::UnmatchedCloseElementStart{ definition: definition.clone(), name: name.clone(), at })
	}

	fn handle_unmatched_close_element_end(&mut self, definition: &RcPtr<ElementDefinition>, name: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		self.push(Event::UnmatchedCloseElementEnd{ definition: definition.clone(), name: name.clone(), at })
	}

	fn handle_attribute(&mut self, attribute: &Attribute, at: Location) -> Result<(), Self::Error> {
		self.push(Event::Attribute{ attribute: attribute.clone(), at })
	}

	fn handle_inner_whitespace(&mut self, whitespace: &RcPtr<str>, at: Location) -> Result<(), Self::Error> {
		self.push(Event::InnerWhitespace{ whitespace: whitespace.clone(), at })
	}

	fn handle_processing_instruction(&mut self, pi: &ProcessingInstruction, at: Location) -> Result<(), Self::Error> {
		self.push(Event::ProcessingInstruction{ pi: pi.clone(), at })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use crate::definition::ElementType;

	#[test]
	fn recorder_copies_borrowed_text() {
		let mut r = EventRecorder::new();
		{
			let buf = String::from("hello");
			r.handle_text(&buf[1..3], Location::new(1, 2)).unwrap();
		}
		assert_eq!(r.events(), &[Event::Text{ text: "el".to_string(), at: Location::new(1, 2) }][..]);
	}

	#[test]
	fn element_accessor_returns_definition_and_name() {
		let def = RcPtr::new(ElementDefinition::new("br", ElementType::Void));
		let name: RcPtr<str> = RcPtr::from("BR");
		let mut r = EventRecorder::new();
		r.handle_standalone_element_start(&def, &name, false, Location::new(2, 4)).unwrap();
		r.handle_text("x", Location::new(2, 8)).unwrap();
		let events = r.into_events();
		let (d, n) = events[0].element().unwrap();
		assert!(RcPtr::ptr_eq(d, &def));
		assert_eq!(&**n, "BR");
		assert_eq!(events[0].location(), Location::new(2, 4));
		assert!(events[1].element().is_none());
	}

	#[test]
	fn recorder_clear() {
		let mut r = EventRecorder::new();
		r.handle_comment("c", "<!--c-->", Location::new(1, 1)).unwrap();
		assert_eq!(r.len(), 1);
		r.clear();
		assert!(r.is_empty());
	}
}
