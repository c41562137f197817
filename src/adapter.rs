/*!
# Adapter from lexical callbacks to template events

The [`TemplateAdapter`] sits between a scanner and a template handler. It
implements [`MarkupHandler`] and, for each callback, materializes exactly the
fields the corresponding template event needs, resolves names through a
[`DefinitionRegistry`] and forwards one event to the wrapped
[`TemplateHandler`].
*/
use std::fmt;
use std::time::{Duration, Instant};

use crate::attribute::AttributeDecoder;
use crate::definition::ElementDefinition;
use crate::markup::{AttributeSpans, DocTypeSpans, MarkupHandler, ProcessingInstructionSpans, XmlDeclarationSpans};
use crate::registry::DefinitionRegistry;
use crate::span::{Location, Span};
use crate::template::{Attribute, DocType, ProcessingInstruction, TemplateHandler, XmlDeclaration};
use crate::text::{LruTextRepository, TextRepository};
use crate::RcPtr;

/// Element whose start tag has been seen but whose end-of-tag has not.
struct OpenElement {
	definition: RcPtr<ElementDefinition>,
	name: RcPtr<str>,
}

/**
# Lexical-to-template event adapter

One adapter is meant to process one document. Between a start-of-tag and its
end-of-tag callback the adapter holds the resolved definition and name of the
element (the *open element*); the end callback forwards those very objects
instead of resolving the name again. There is at most one open element at a
time, because scanners deliver start/end pairs without nesting them.

Errors returned by the template handler are returned unchanged; the adapter
has no failure modes of its own.

## Example

```
use markup_bridge::{Catalog, DefinitionRegistry, Event, EventRecorder, MarkupHandler, RcPtr, Span, Location, TemplateAdapter};
let registry = DefinitionRegistry::new(RcPtr::new(Catalog::html()));
let mut adapter = TemplateAdapter::new(EventRecorder::new(), registry);
let buf = "<P>";
let name = Span::new(1, 1, 1, 2);
adapter.handle_open_element_start(buf, &name, Location::new(1, 1)).unwrap();
adapter.handle_open_element_end(buf, &name, Location::new(1, 1)).unwrap();
let events = adapter.into_inner().into_events();
match &events[0] {
	Event::OpenElementStart{ definition, name, .. } => {
		assert_eq!(definition.name(), "p");
		assert_eq!(&**name, "P");
	},
	other => panic!("unexpected event: {:?}", other),
}
```
*/
pub struct TemplateAdapter<H, T = LruTextRepository> {
	handler: H,
	registry: DefinitionRegistry,
	texts: T,
	attributes: AttributeDecoder,
	current: Option<OpenElement>,
	events: usize,
}

impl<H: TemplateHandler> TemplateAdapter<H, LruTextRepository> {
	/// Create an adapter forwarding to `handler`, using a default
	/// [`LruTextRepository`].
	pub fn new(handler: H, registry: DefinitionRegistry) -> Self {
		Self::with_text_repository(handler, registry, LruTextRepository::new())
	}
}

impl<H: TemplateHandler, T: TextRepository> TemplateAdapter<H, T> {
	/// Create an adapter forwarding to `handler` and materializing text
	/// through `texts`.
	pub fn with_text_repository(handler: H, registry: DefinitionRegistry, texts: T) -> Self {
		Self{
			handler: handler,
			registry: registry,
			texts: texts,
			attributes: AttributeDecoder::new(),
			current: None,
			events: 0,
		}
	}

	/// Access the template handler.
	pub fn get_ref(&self) -> &H {
		&self.handler
	}

	/// Access the template handler mutably.
	pub fn get_mut(&mut self) -> &mut H {
		&mut self.handler
	}

	/// Release the template handler.
	pub fn into_inner(self) -> H {
		self.handler
	}

	pub fn registry(&self) -> &DefinitionRegistry {
		&self.registry
	}

	pub fn text_repository(&self) -> &T {
		&self.texts
	}

	/// Number of events the template handler has accepted so far.
	pub fn events(&self) -> usize {
		self.events
	}

	/// Forget the open element, if any, so that the adapter can be used for
	/// another document.
	///
	/// Definitions and cached text are kept.
	pub fn reset(&mut self) {
		self.current = None;
		self.events = 0;
	}

	fn trace(&self, what: &'static str, at: Location) {
		log::trace!(target: "markup_bridge::adapter", "{} at {}:{}", what, at.line, at.col);
	}

	/// Count an event once the handler has accepted it.
	fn forwarded<E>(&mut self, result: Result<(), E>) -> Result<(), E> {
		if result.is_ok() {
			self.events += 1;
		}
		result
	}

	fn text(&mut self, buffer: &str, span: &Span) -> RcPtr<str> {
		self.texts.get_text(buffer, span)
	}

	fn text_opt(&mut self, buffer: &str, span: &Span) -> Option<RcPtr<str>> {
		if span.is_empty() {
			None
		} else {
			Some(self.texts.get_text(buffer, span))
		}
	}

	/// Resolve a start-of-tag name and make it the open element.
	fn open(&mut self, buffer: &str, name: &Span) -> (RcPtr<ElementDefinition>, RcPtr<str>) {
		let definition = self.registry.resolve_element(buffer, name);
		let name = self.texts.get_text(buffer, name);
		self.current = Some(OpenElement{
			definition: definition.clone(),
			name: name.clone(),
		});
		(definition, name)
	}

	/// Take the open element for an end-of-tag callback.
	fn close(&mut self, buffer: &str, name: &Span, what: &'static str) -> (RcPtr<ElementDefinition>, RcPtr<str>) {
		match self.current.take() {
			Some(OpenElement{ definition, name }) => (definition, name),
			None => {
				log::warn!(
					target: "markup_bridge::adapter",
					"{} without preceding start at {}:{}, resolving name again",
					what, name.line, name.col,
				);
				let definition = self.registry.resolve_element(buffer, name);
				(definition, self.texts.get_text(buffer, name))
			},
		}
	}
}

impl<H: TemplateHandler, T: TextRepository> MarkupHandler for TemplateAdapter<H, T> {
	type Error = H::Error;

	fn handle_document_start(&mut self, start_time: Instant, at: Location) -> Result<(), Self::Error> {
		self.trace("document start", at);
		let result = self.handler.handle_document_start(start_time, at);
		self.forwarded(result)
	}

	fn handle_document_end(&mut self, end_time: Instant, total_time: Duration, at: Location) -> Result<(), Self::Error> {
		self.trace("document end", at);
		log::debug!(
			target: "markup_bridge::adapter",
			"document adapted in {:?}: {} events, {} generic definitions",
			total_time, self.events, self.registry.len(),
		);
		let result = self.handler.handle_document_end(end_time, total_time, at);
		self.forwarded(result)
	}

	fn handle_xml_declaration(&mut self, buffer: &str, spans: &XmlDeclarationSpans, at: Location) -> Result<(), Self::Error> {
		self.trace("xml declaration", at);
		let decl = XmlDeclaration{
			xml_declaration: self.text(buffer, &spans.outer),
			keyword: self.text(buffer, &spans.keyword),
			version: self.text_opt(buffer, &spans.version),
			encoding: self.text_opt(buffer, &spans.encoding),
			standalone: self.text_opt(buffer, &spans.standalone),
		};
		let result = self.handler.handle_xml_declaration(&decl, at);
		self.forwarded(result)
	}

	fn handle_doctype(&mut self, buffer: &str, spans: &DocTypeSpans, _at: Location) -> Result<(), Self::Error> {
		let at = spans.outer.location();
		self.trace("doctype", at);
		let doctype = DocType{
			doctype: self.text(buffer, &spans.outer),
			keyword: self.text(buffer, &spans.keyword),
			root_element_name: self.text(buffer, &spans.element_name),
			doctype_type: self.text_opt(buffer, &spans.doctype_type),
			public_id: self.text_opt(buffer, &spans.public_id),
			system_id: self.text_opt(buffer, &spans.system_id),
			internal_subset: self.text_opt(buffer, &spans.internal_subset),
		};
		let result = self.handler.handle_doctype(&doctype, at);
		self.forwarded(result)
	}

	fn handle_cdata_section(&mut self, buffer: &str, content: &Span, outer: &Span, at: Location) -> Result<(), Self::Error> {
		self.trace("cdata section", at);
		let result = self.handler.handle_cdata_section(content.slice(buffer), outer.slice(buffer), at);
		self.forwarded(result)
	}

	fn handle_comment(&mut self, buffer: &str, content: &Span, outer: &Span, at: Location) -> Result<(), Self::Error> {
		self.trace("comment", at);
		let result = self.handler.handle_comment(content.slice(buffer), outer.slice(buffer), at);
		self.forwarded(result)
	}

	fn handle_text(&mut self, buffer: &str, text: &Span, at: Location) -> Result<(), Self::Error> {
		self.trace("text", at);
		let result = self.handler.handle_text(text.slice(buffer), at);
		self.forwarded(result)
	}

	fn handle_standalone_element_start(&mut self, buffer: &str, name: &Span, minimized: bool, at: Location) -> Result<(), Self::Error> {
		self.trace("standalone element start", at);
		let (definition, name) = self.open(buffer, name);
		let result = self.handler.handle_standalone_element_start(&definition, &name, minimized, at);
		self.forwarded(result)
	}

	fn handle_standalone_element_end(&mut self, buffer: &str, name: &Span, minimized: bool, at: Location) -> Result<(), Self::Error> {
		self.trace("standalone element end", at);
		let (definition, name) = self.close(buffer, name, "standalone element end");
		let result = self.handler.handle_standalone_element_end(&definition, &name, minimized, at);
		self.forwarded(result)
	}

	fn handle_open_element_start(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		self.trace("open element start", at);
		let (definition, name) = self.open(buffer, name);
		let result = self.handler.handle_open_element_start(&definition, &name, at);
		self.forwarded(result)
	}

	fn handle_open_element_end(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		self.trace("open element end", at);
		let (definition, name) = self.close(buffer, name, "open element end");
		let result = self.handler.handle_open_element_end(&definition, &name, at);
		self.forwarded(result)
	}

	fn handle_auto_open_element_start(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		self.trace("auto-open element start", at);
		let (definition, name) = self.open(buffer, name);
		let result = self.handler.handle_auto_open_element_start(&definition, &name, at);
		self.forwarded(result)
	}

	fn handle_auto_open_element_end(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		self.trace("auto-open element end", at);
		let (definition, name) = self.close(buffer, name, "auto-open element end");
		let result = self.handler.handle_auto_open_element_end(&definition, &name, at);
		self.forwarded(result)
	}

	fn handle_close_element_start(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		self.trace("close element start", at);
		let (definition, name) = self.open(buffer, name);
		let result = self.handler.handle_close_element_start(&definition, &name, at);
		self.forwarded(result)
	}

	fn handle_close_element_end(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		self.trace("close element end", at);
		let (definition, name) = self.close(buffer, name, "close element end");
		let result = self.handler.handle_close_element_end(&definition, &name, at);
		self.forwarded(result)
	}

	fn handle_auto_close_element_start(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		self.trace("auto-close element start", at);
		let (definition, name) = self.open(buffer, name);
		let result = self.handler.handle_auto_close_element_start(&definition, &name, at);
		self.forwarded(result)
	}

	fn handle_auto_close_element_end(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		self.trace("auto-close element end", at);
		let (definition, name) = self.close(buffer, name, "auto-close element end");
		let result = self.handler.handle_auto_close_element_end(&definition, &name, at);
		self.forwarded(result)
	}

	fn handle_unmatched_close_element_start(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		self.trace("unmatched close element start", at);
		let (definition, name) = self.open(buffer, name);
		let result = self.handler.handle_unmatched_close_element_start(&definition, &name, at);
		self.forwarded(result)
	}

	fn handle_unmatched_close_element_end(&mut self, buffer: &str, name: &Span, at: Location) -> Result<(), Self::Error> {
		self.trace("unmatched close element end", at);
		let (definition, name) = self.close(buffer, name, "unmatched close element end");
		let result = self.handler.handle_unmatched_close_element_end(&definition, &name, at);
		self.forwarded(result)
	}

	fn handle_attribute(&mut self, buffer: &str, spans: &AttributeSpans, _at: Location) -> Result<(), Self::Error> {
		let at = spans.name.location();
		self.trace("attribute", at);
		let definition = self.registry.resolve_attribute(buffer, &spans.name);
		let name = self.texts.get_text(buffer, &spans.name);
		let value = self.attributes.decode(
			&mut self.texts,
			buffer,
			&spans.operator,
			&spans.value_content,
			&spans.value_outer,
		);
		let attribute = Attribute{
			definition: definition,
			name: name,
			operator: value.operator,
			value: value.value,
			quoting: value.quoting,
		};
		let result = self.handler.handle_attribute(&attribute, at);
		self.forwarded(result)
	}

	fn handle_inner_whitespace(&mut self, buffer: &str, whitespace: &Span, at: Location) -> Result<(), Self::Error> {
		self.trace("inner whitespace", at);
		let whitespace = self.texts.get_text(buffer, whitespace);
		let result = self.handler.handle_inner_whitespace(&whitespace, at);
		self.forwarded(result)
	}

	fn handle_processing_instruction(&mut self, buffer: &str, spans: &ProcessingInstructionSpans, at: Location) -> Result<(), Self::Error> {
		self.trace("processing instruction", at);
		let pi = ProcessingInstruction{
			processing_instruction: self.text(buffer, &spans.outer),
			target: self.text(buffer, &spans.target),
			content: self.text_opt(buffer, &spans.content),
		};
		let result = self.handler.handle_processing_instruction(&pi, at);
		self.forwarded(result)
	}
}

impl<H: fmt::Debug, T: fmt::Debug> fmt::Debug for TemplateAdapter<H, T> {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("TemplateAdapter")
			.field("handler", &self.handler)
			.field("registry", &self.registry)
			.field("texts", &self.texts)
			.field("current", &self.current.as_ref().map(|e| &e.definition))
			.field("events", &self.events)
			.finish()
	}
}
