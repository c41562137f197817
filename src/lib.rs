/*!
# Markup-to-template event bridge

This crate translates the offset-based callbacks of a streaming markup
scanner into typed template events: element and attribute names resolved to
canonical definitions, text materialized into owned strings, attribute values
decoded with their quoting style and all source positions passed through.

## Features

* Definitions are interned: the same element or attribute name always
  resolves to the same [`RcPtr`], so consumers can dispatch on identity.
* HTML names match ASCII-case-insensitively, XML names exactly.
* Materialized text is deduplicated through a bounded LRU cache or a shared
  weak pool.
* Absent optional fields (zero-length spans) become `None`, never `""`.
* Handler errors propagate unchanged; the adapter has no failure modes of
  its own.
* A small bundled scanner with element balancing makes the crate usable
  end to end.

## Example

```
use markup_bridge::{Catalog, Event, EventRecorder, RcPtr, TemplateParser, AttributeValueQuoting};
let parser = TemplateParser::new(RcPtr::new(Catalog::html()));
let events = parser.parse("<a href=\"x\"/>", EventRecorder::new()).unwrap().into_events();
assert_eq!(events.len(), 5);
match &events[2] {
	Event::Attribute{ attribute, .. } => {
		assert_eq!(attribute.definition.name(), "href");
		assert_eq!(attribute.value.as_deref(), Some("x"));
		assert_eq!(attribute.quoting, Some(AttributeValueQuoting::Double));
	},
	other => panic!("unexpected event: {:?}", other),
}
```

## High-level usage

### With the bundled scanner

[`TemplateParser`] runs the bundled [`Scanner`] over a complete document and
feeds a fresh [`TemplateAdapter`] per document. Implement
[`TemplateHandler`] to receive the events, or use [`EventRecorder`] to
collect them as [`Event`]s.

### With another scanner

Any scanner reporting through the [`MarkupHandler`] trait can drive a
[`TemplateAdapter`] directly. Construct it from a [`DefinitionRegistry`]
and, optionally, a [`TextRepository`] of your choice.

### Multithreading

With the `mt` feature, [`RcPtr`] is an [`std::sync::Arc`] instead of an
[`std::rc::Rc`], so that a [`Catalog`] or [`TextPool`] can be shared between
threads.
*/
#[cfg(feature = "mt")]
use std::sync::Arc;
#[cfg(not(feature = "mt"))]
use std::rc::Rc;

pub mod span;
pub mod error;
pub mod markup;
pub mod template;
pub mod definition;
pub mod catalog;
pub mod registry;
pub mod text;
pub mod attribute;
pub mod adapter;
pub mod event;
pub mod scanner;

#[cfg(test)]
pub mod tests;

#[doc(inline)]
pub use span::{Span, Location};
#[doc(inline)]
pub use error::{Error, WFError, Result};
#[doc(inline)]
pub use markup::{MarkupHandler, XmlDeclarationSpans, DocTypeSpans, AttributeSpans, ProcessingInstructionSpans};
#[doc(inline)]
pub use template::{TemplateHandler, XmlDeclaration, DocType, ProcessingInstruction, Attribute};
#[doc(inline)]
pub use definition::{Dialect, ElementType, ElementDefinition, AttributeDefinition};
#[doc(inline)]
pub use catalog::Catalog;
#[doc(inline)]
pub use registry::DefinitionRegistry;
#[doc(inline)]
pub use text::{TextRepository, UncachedTextRepository, LruTextRepository, SharedTextRepository, TextPool};
#[doc(inline)]
pub use attribute::{AttributeDecoder, AttributeValue, AttributeValueQuoting};
#[doc(inline)]
pub use adapter::TemplateAdapter;
#[doc(inline)]
pub use event::{Event, EventRecorder};
#[doc(inline)]
pub use scanner::{Scanner, ScannerOptions};

/// Shared pointer used for definitions and materialized text
///
/// In builds with the `mt` feature, this is a [`Arc`]. In non-`mt` builds,
/// this is a [`std::rc::Rc`]
#[cfg(feature = "mt")]
pub type RcPtr<T> = Arc<T>;
/// Shared pointer used for definitions and materialized text
///
/// In builds with the `mt` feature, this is a [`std::sync::Arc`].
/// In non-`mt` builds, this is a [`Rc`].
#[cfg(not(feature = "mt"))]
pub type RcPtr<T> = Rc<T>;

pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");

/**
# Configuration of a [`TemplateParser`]
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
	/// Maximum number of distinct strings kept by the per-document text
	/// cache.
	pub text_cache_capacity: usize,

	/// Texts longer than this (in bytes) are not cached.
	pub max_cached_text_len: usize,

	pub scanner: ScannerOptions,
}

impl ParserOptions {
	pub fn defaults() -> ParserOptions {
		ParserOptions{
			text_cache_capacity: text::DEFAULT_TEXT_CACHE_CAPACITY,
			max_cached_text_len: text::DEFAULT_MAX_CACHED_TEXT_LEN,
			scanner: ScannerOptions::defaults(),
		}
	}

	pub fn text_cache_capacity<'a>(&'a mut self, v: usize) -> &'a mut ParserOptions {
		self.text_cache_capacity = v;
		self
	}

	pub fn max_cached_text_len<'a>(&'a mut self, v: usize) -> &'a mut ParserOptions {
		self.max_cached_text_len = v;
		self
	}

	pub fn scanner<'a>(&'a mut self, v: ScannerOptions) -> &'a mut ParserOptions {
		self.scanner = v;
		self
	}
}

impl Default for ParserOptions {
	fn default() -> Self {
		Self::defaults()
	}
}

/**
# Complete-document front-end

Bundles a [`Scanner`] with the creation of one [`TemplateAdapter`] (with its
own [`DefinitionRegistry`] and [`LruTextRepository`]) per document. The
[`Catalog`] is shared between all documents parsed.

The handler is passed by value and returned on success. To keep access to it
on failure, pass a mutable reference instead; `&mut H` is a
[`TemplateHandler`] as well.

## Example

```
use markup_bridge::{Catalog, Error, EventRecorder, RcPtr, TemplateParser};
let parser = TemplateParser::new(RcPtr::new(Catalog::html()));
let mut recorder = EventRecorder::new();
let result = parser.parse("<p>unterminated <!-- comment", &mut recorder);
assert!(matches!(result, Err(Error::NotWellFormed(..))));
// events before the error are delivered
assert!(recorder.len() > 0);
```
*/
#[derive(Debug, Clone)]
pub struct TemplateParser {
	scanner: Scanner,
	opts: ParserOptions,
}

impl TemplateParser {
	/// Create a parser with default options.
	pub fn new(catalog: RcPtr<Catalog>) -> TemplateParser {
		Self::with_options(catalog, ParserOptions::defaults())
	}

	pub fn with_options(catalog: RcPtr<Catalog>, opts: ParserOptions) -> TemplateParser {
		TemplateParser{
			scanner: Scanner::with_options(catalog, opts.scanner),
			opts: opts,
		}
	}

	pub fn catalog(&self) -> &RcPtr<Catalog> {
		self.scanner.catalog()
	}

	pub fn options(&self) -> &ParserOptions {
		&self.opts
	}

	/// Parse a complete document, delivering events to `handler`.
	pub fn parse<H: TemplateHandler>(&self, input: &str, handler: H) -> std::result::Result<H, H::Error>
		where H::Error: From<Error>
	{
		let registry = DefinitionRegistry::new(self.scanner.catalog().clone());
		let texts = LruTextRepository::with_capacity(self.opts.text_cache_capacity, self.opts.max_cached_text_len);
		let mut adapter = TemplateAdapter::with_text_repository(handler, registry, texts);
		self.scanner.scan(input, &mut adapter)?;
		Ok(adapter.into_inner())
	}
}
