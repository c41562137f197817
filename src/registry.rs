/*!
# Resolution of name spans to definitions
*/
use std::collections::HashMap;
use std::fmt;

use smartstring::alias::String as SmartString;

use crate::catalog::Catalog;
use crate::definition::{AttributeDefinition, Dialect, ElementDefinition};
use crate::span::Span;
use crate::RcPtr;

/**
# Per-parse definition cache

The registry maps raw element and attribute names, as found in the scan
buffer, to canonical definitions. Names are first normalized according to
the dialect of the backing [`Catalog`]; the catalog is consulted next and,
for names it does not know, a generic definition is created once and cached.

Guarantees:

* Resolving the same canonical name twice yields reference-identical
  definitions ([`RcPtr::ptr_eq`]) for the lifetime of the registry.
* Definitions coming from the catalog are identical across all registries
  sharing that catalog.
* Resolution never fails.

Lookups of already-normalized names do not allocate.
*/
pub struct DefinitionRegistry {
	catalog: RcPtr<Catalog>,
	elements: HashMap<SmartString, RcPtr<ElementDefinition>>,
	attributes: HashMap<SmartString, RcPtr<AttributeDefinition>>,
	/// scratch buffer for case folding, reused across lookups
	scratch: SmartString,
}

impl DefinitionRegistry {
	/// Create a new, empty registry backed by `catalog`.
	///
	/// The catalog's dialect selects whether names are matched
	/// case-sensitively.
	pub fn new(catalog: RcPtr<Catalog>) -> DefinitionRegistry {
		DefinitionRegistry{
			catalog: catalog,
			elements: HashMap::new(),
			attributes: HashMap::new(),
			scratch: SmartString::new(),
		}
	}

	pub fn dialect(&self) -> Dialect {
		self.catalog.dialect()
	}

	pub fn catalog(&self) -> &RcPtr<Catalog> {
		&self.catalog
	}

	/// Resolve the element name found at `span` in `buffer`.
	pub fn resolve_element(&mut self, buffer: &str, span: &Span) -> RcPtr<ElementDefinition> {
		self.element_for_name(span.slice(buffer))
	}

	/// Resolve the attribute name found at `span` in `buffer`.
	pub fn resolve_attribute(&mut self, buffer: &str, span: &Span) -> RcPtr<AttributeDefinition> {
		self.attribute_for_name(span.slice(buffer))
	}

	/// Resolve an element name given as string.
	pub fn element_for_name(&mut self, name: &str) -> RcPtr<ElementDefinition> {
		let key = self.catalog.normalize(name, &mut self.scratch);
		if let Some(def) = self.elements.get(key) {
			return def.clone()
		}
		if let Some(def) = self.catalog.element(key) {
			return def.clone()
		}
		let def = RcPtr::new(ElementDefinition::generic(key));
		self.elements.insert(key.into(), def.clone());
		log::trace!(target: "markup_bridge::registry", "new generic element definition {:?}", key);
		def
	}

	/// Resolve an attribute name given as string.
	pub fn attribute_for_name(&mut self, name: &str) -> RcPtr<AttributeDefinition> {
		let key = self.catalog.normalize(name, &mut self.scratch);
		if let Some(def) = self.attributes.get(key) {
			return def.clone()
		}
		if let Some(def) = self.catalog.attribute(key) {
			return def.clone()
		}
		let def = RcPtr::new(AttributeDefinition::generic(key));
		self.attributes.insert(key.into(), def.clone());
		log::trace!(target: "markup_bridge::registry", "new generic attribute definition {:?}", key);
		def
	}

	/// Number of generic definitions created by this registry so far.
	///
	/// Catalog definitions are not counted.
	pub fn len(&self) -> usize {
		self.elements.len() + self.attributes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl fmt::Debug for DefinitionRegistry {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("DefinitionRegistry")
			.field("catalog", &*self.catalog)
			.field("elements.len()", &self.elements.len())
			.field("attributes.len()", &self.attributes.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use crate::definition::ElementType;

	fn html() -> DefinitionRegistry {
		DefinitionRegistry::new(RcPtr::new(Catalog::html()))
	}

	fn xml() -> DefinitionRegistry {
		DefinitionRegistry::new(RcPtr::new(Catalog::xml()))
	}

	fn span_of(buf: &str, needle: &str) -> Span {
		let offset = buf.find(needle).unwrap();
		Span::new(offset, needle.len(), 1, offset + 1)
	}

	#[test]
	fn registry_resolves_same_name_to_identical_definition() {
		let mut r = xml();
		let buf = "<foo><foo>";
		let a = r.resolve_element(buf, &Span::new(1, 3, 1, 2));
		let b = r.resolve_element(buf, &Span::new(6, 3, 1, 7));
		assert!(RcPtr::ptr_eq(&a, &b));
		assert_eq!(a.name(), "foo");
	}

	#[test]
	fn registry_html_ignores_case() {
		let mut r = html();
		let buf = "DIV div Div";
		let a = r.resolve_element(buf, &Span::new(0, 3, 1, 1));
		let b = r.resolve_element(buf, &Span::new(4, 3, 1, 5));
		let c = r.resolve_element(buf, &Span::new(8, 3, 1, 9));
		assert!(RcPtr::ptr_eq(&a, &b));
		assert!(RcPtr::ptr_eq(&b, &c));
		assert_eq!(a.name(), "div");
	}

	#[test]
	fn registry_html_ignores_case_for_unknown_names() {
		let mut r = html();
		let a = r.element_for_name("MyWidget");
		let b = r.element_for_name("mywidget");
		let c = r.element_for_name("MYWIDGET");
		assert!(RcPtr::ptr_eq(&a, &b));
		assert!(RcPtr::ptr_eq(&b, &c));
		assert_eq!(a.name(), "mywidget");
		assert_eq!(r.len(), 1);
	}

	#[test]
	fn registry_xml_is_case_sensitive() {
		let mut r = xml();
		let a = r.element_for_name("Foo");
		let b = r.element_for_name("foo");
		assert!(!RcPtr::ptr_eq(&a, &b));
		assert_eq!(a.name(), "Foo");
		assert_eq!(b.name(), "foo");
	}

	#[test]
	fn registry_unknown_names_yield_generic_definitions() {
		let mut r = html();
		let e = r.element_for_name("blink");
		assert_eq!(e.element_type(), ElementType::Normal);
		let a = r.attribute_for_name("th:text");
		assert!(!a.is_boolean());
		assert_eq!(a.name(), "th:text");
	}

	#[test]
	fn registry_returns_catalog_definitions() {
		let catalog = RcPtr::new(Catalog::html());
		let mut r1 = DefinitionRegistry::new(catalog.clone());
		let mut r2 = DefinitionRegistry::new(catalog.clone());
		let a = r1.element_for_name("BR");
		let b = r2.element_for_name("br");
		assert!(a.is_void());
		assert!(RcPtr::ptr_eq(&a, &b));
		assert!(RcPtr::ptr_eq(&a, catalog.element("br").unwrap()));
		assert!(r1.is_empty());
	}

	#[test]
	fn registry_knows_boolean_attributes() {
		let mut r = html();
		let buf = "<input DISABLED>";
		let a = r.resolve_attribute(buf, &span_of(buf, "DISABLED"));
		assert!(a.is_boolean());
		assert_eq!(a.name(), "disabled");
	}

	#[test]
	fn registry_separates_elements_and_attributes() {
		let mut r = xml();
		let e = r.element_for_name("title");
		let a = r.attribute_for_name("title");
		assert_eq!(e.name(), a.name());
		assert_eq!(r.len(), 2);
	}

	#[test]
	fn registry_keeps_generic_definitions_for_its_lifetime() {
		let mut r = html();
		let a = r.element_for_name("widget");
		for name in ["div", "gadget", "span", "Gizmo"].iter() {
			r.element_for_name(name);
			r.attribute_for_name(name);
		}
		let b = r.element_for_name("WIDGET");
		assert!(RcPtr::ptr_eq(&a, &b));
		assert_eq!(r.len(), 7);
	}
}
