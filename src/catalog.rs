/*!
# Catalogs of known names

A [`Catalog`] is the immutable, read-only table of element and attribute
definitions known in advance for a dialect. It is meant to be built once and
shared (via [`RcPtr`]) between all parses, similar to how a shared context
is passed to parsers. Definitions handed out from a catalog are therefore
identical across every registry constructed from it.
*/
use std::collections::HashMap;
use std::fmt;

use smartstring::alias::String as SmartString;

use crate::definition::{AttributeDefinition, Dialect, ElementDefinition, ElementType};
use crate::RcPtr;

/// Elements with no content and no end tag.
pub const HTML_VOID_ELEMENTS: &'static [&'static str] = &[
	"area", "base", "br", "col", "command", "embed", "hr", "img", "input",
	"keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose content is raw text.
pub const HTML_RAW_TEXT_ELEMENTS: &'static [&'static str] = &["script", "style"];

/// Elements whose content is text with character references.
pub const HTML_ESCAPABLE_RAW_TEXT_ELEMENTS: &'static [&'static str] = &["textarea", "title"];

/// Roots of embedded foreign content.
pub const HTML_FOREIGN_ELEMENTS: &'static [&'static str] = &["svg", "math"];

pub const HTML_NORMAL_ELEMENTS: &'static [&'static str] = &[
	"a", "abbr", "address", "article", "aside", "audio", "b", "bdi", "bdo",
	"blockquote", "body", "button", "canvas", "caption", "cite", "code",
	"colgroup", "data", "datalist", "dd", "del", "details", "dfn", "dialog",
	"div", "dl", "dt", "em", "fieldset", "figcaption", "figure", "footer",
	"form", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "html", "i",
	"iframe", "ins", "kbd", "label", "legend", "li", "main", "map", "mark",
	"menu", "meter", "nav", "noscript", "object", "ol", "optgroup", "option",
	"output", "p", "picture", "pre", "progress", "q", "rp", "rt", "ruby", "s",
	"samp", "section", "select", "small", "span", "strong", "sub", "summary",
	"sup", "table", "tbody", "td", "template", "tfoot", "th", "thead", "time",
	"tr", "u", "ul", "var", "video",
];

/// Attributes whose presence alone carries their meaning.
pub const HTML_BOOLEAN_ATTRIBUTES: &'static [&'static str] = &[
	"allowfullscreen", "async", "autofocus", "autoplay", "checked", "compact",
	"controls", "declare", "default", "defaultchecked", "defaultmuted",
	"defaultselected", "defer", "disabled", "enabled", "formnovalidate",
	"hidden", "indeterminate", "inert", "ismap", "itemscope", "loop",
	"multiple", "muted", "nohref", "noresize", "noshade", "novalidate",
	"nowrap", "open", "pauseonexit", "readonly", "required", "reversed",
	"scoped", "seamless", "selected", "sortable", "truespeed",
	"typemustmatch", "visible",
];

/**
# Immutable table of known definitions

Lookups take an already normalized name (see
[`Catalog::normalize_into`]). Unknown names are not an error; the
[`DefinitionRegistry`](crate::DefinitionRegistry) creates generic
definitions for those.

## Example

```
use markup_bridge::{Catalog, ElementType};
let catalog = Catalog::html();
assert_eq!(catalog.element("br").unwrap().element_type(), ElementType::Void);
assert!(catalog.attribute("disabled").unwrap().is_boolean());
assert!(catalog.element("blink").is_none());
```
*/
pub struct Catalog {
	dialect: Dialect,
	elements: HashMap<SmartString, RcPtr<ElementDefinition>>,
	attributes: HashMap<SmartString, RcPtr<AttributeDefinition>>,
}

impl Catalog {
	/// Create an empty catalog for the given dialect.
	pub fn new(dialect: Dialect) -> Catalog {
		Catalog{
			dialect: dialect,
			elements: HashMap::new(),
			attributes: HashMap::new(),
		}
	}

	/// Create the built-in HTML catalog.
	pub fn html() -> Catalog {
		let mut result = Self::new(Dialect::Html);
		let groups: [(&[&str], ElementType); 5] = [
			(HTML_VOID_ELEMENTS, ElementType::Void),
			(HTML_RAW_TEXT_ELEMENTS, ElementType::RawText),
			(HTML_ESCAPABLE_RAW_TEXT_ELEMENTS, ElementType::EscapableRawText),
			(HTML_FOREIGN_ELEMENTS, ElementType::Foreign),
			(HTML_NORMAL_ELEMENTS, ElementType::Normal),
		];
		for (names, element_type) in groups.iter() {
			for name in names.iter() {
				result = result.with_element(name, *element_type);
			}
		}
		for name in HTML_BOOLEAN_ATTRIBUTES.iter() {
			result = result.with_attribute(name, true);
		}
		result
	}

	/// Create an empty, case-sensitive catalog.
	pub fn xml() -> Catalog {
		Self::new(Dialect::Xml)
	}

	/// Add or replace an element definition.
	///
	/// The name is normalized according to the dialect before insertion.
	pub fn with_element(mut self, name: &str, element_type: ElementType) -> Catalog {
		let mut key = SmartString::new();
		self.normalize_into(name, &mut key);
		let def = ElementDefinition::new(key.as_str(), element_type);
		self.elements.insert(key, RcPtr::new(def));
		self
	}

	/// Add or replace an attribute definition.
	///
	/// The name is normalized according to the dialect before insertion.
	pub fn with_attribute(mut self, name: &str, boolean: bool) -> Catalog {
		let mut key = SmartString::new();
		self.normalize_into(name, &mut key);
		let def = AttributeDefinition::new(key.as_str(), boolean);
		self.attributes.insert(key, RcPtr::new(def));
		self
	}

	pub fn dialect(&self) -> Dialect {
		self.dialect
	}

	/// Look up an element by its normalized name.
	pub fn element(&self, name: &str) -> Option<&RcPtr<ElementDefinition>> {
		self.elements.get(name)
	}

	/// Look up an attribute by its normalized name.
	pub fn attribute(&self, name: &str) -> Option<&RcPtr<AttributeDefinition>> {
		self.attributes.get(name)
	}

	/// Return true if `name` (in any casing the dialect accepts) denotes a
	/// void element.
	pub fn is_void_element(&self, name: &str) -> bool {
		let mut key = SmartString::new();
		self.element(self.normalize(name, &mut key))
			.map(|def| def.is_void())
			.unwrap_or(false)
	}

	/// Write the normalized form of `name` into `dest`, replacing its
	/// previous contents.
	pub fn normalize_into(&self, name: &str, dest: &mut SmartString) {
		dest.clear();
		if self.dialect.is_case_sensitive() {
			dest.push_str(name);
		} else {
			for ch in name.chars() {
				dest.push(ch.to_ascii_lowercase());
			}
		}
	}

	/// Return the normalized form of `name`.
	///
	/// `name` itself is returned if it is already normalized; otherwise the
	/// folded name is written to `scratch` and a reference to it returned.
	pub fn normalize<'a>(&self, name: &'a str, scratch: &'a mut SmartString) -> &'a str {
		if self.dialect.is_case_sensitive() || !name.bytes().any(|b| b.is_ascii_uppercase()) {
			return name
		}
		self.normalize_into(name, scratch);
		scratch.as_str()
	}

	/// Number of known element definitions.
	pub fn elements(&self) -> usize {
		self.elements.len()
	}

	/// Number of known attribute definitions.
	pub fn attributes(&self) -> usize {
		self.attributes.len()
	}
}

impl fmt::Debug for Catalog {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("Catalog")
			.field("dialect", &self.dialect)
			.field("elements.len()", &self.elements.len())
			.field("attributes.len()", &self.attributes.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn html_catalog_knows_void_elements() {
		let c = Catalog::html();
		for name in HTML_VOID_ELEMENTS.iter() {
			assert!(c.element(name).unwrap().is_void(), "{}", name);
		}
		assert_eq!(c.element("div").unwrap().element_type(), ElementType::Normal);
		assert_eq!(c.element("script").unwrap().element_type(), ElementType::RawText);
		assert_eq!(c.element("title").unwrap().element_type(), ElementType::EscapableRawText);
		assert_eq!(c.element("svg").unwrap().element_type(), ElementType::Foreign);
	}

	#[test]
	fn html_catalog_stores_lowercase_keys() {
		let c = Catalog::html().with_element("MyWidget", ElementType::Normal);
		assert!(c.element("mywidget").is_some());
		assert!(c.element("MyWidget").is_none());
		assert_eq!(c.element("mywidget").unwrap().name(), "mywidget");
	}

	#[test]
	fn xml_catalog_preserves_case() {
		let c = Catalog::xml().with_element("MyWidget", ElementType::Void);
		assert!(c.element("MyWidget").is_some());
		assert!(c.element("mywidget").is_none());
	}

	#[test]
	fn normalize_borrows_already_lowercase_names() {
		let c = Catalog::html();
		let mut scratch = SmartString::new();
		let name = "div";
		let normalized = c.normalize(name, &mut scratch);
		assert_eq!(normalized.as_ptr(), name.as_ptr());
	}

	#[test]
	fn normalize_folds_ascii_only() {
		let c = Catalog::html();
		let mut scratch = SmartString::new();
		assert_eq!(c.normalize("DÄtA", &mut scratch), "dÄta");
	}

	#[test]
	fn is_void_element_ignores_case_in_html() {
		let c = Catalog::html();
		assert!(c.is_void_element("BR"));
		assert!(c.is_void_element("img"));
		assert!(!c.is_void_element("div"));
		assert!(!c.is_void_element("unknown"));
	}

	#[test]
	fn catalog_definitions_are_reference_identical() {
		let c = Catalog::html();
		let a = c.element("p").unwrap();
		let b = c.element("p").unwrap();
		assert!(RcPtr::ptr_eq(a, b));
	}
}
