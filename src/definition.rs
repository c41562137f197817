/*!
# Element and attribute definitions

A definition is the canonical, immutable description of a *kind* of element
or attribute name. Definitions are handed out as [`RcPtr`]s by the
[`DefinitionRegistry`](crate::DefinitionRegistry); two resolutions of the
same canonical name yield the very same allocation, so consumers may dispatch
with [`RcPtr::ptr_eq`] instead of comparing strings.
*/
use std::fmt;

use crate::RcPtr;

/// Markup dialect, governing how names are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
	/// HTML: names match ASCII-case-insensitively and are canonicalized to
	/// lowercase.
	Html,
	/// XML and XML-like dialects: names match exactly.
	Xml,
}

impl Dialect {
	pub fn is_case_sensitive(&self) -> bool {
		match self {
			Self::Html => false,
			Self::Xml => true,
		}
	}
}

/// Content model of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
	/// Element which never has content nor a closing tag (`br`, `img`, ...).
	Void,
	/// Element whose content is not markup (`script`, `style`).
	RawText,
	/// Element whose content is text with references (`textarea`, `title`).
	EscapableRawText,
	/// Element from a foreign namespace (`svg`, `math`).
	Foreign,
	/// Any other element, including all unknown ones.
	Normal,
}

/// Canonical metadata for an element name.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ElementDefinition {
	name: RcPtr<str>,
	element_type: ElementType,
}

impl ElementDefinition {
	pub fn new<T: Into<RcPtr<str>>>(name: T, element_type: ElementType) -> ElementDefinition {
		ElementDefinition{
			name: name.into(),
			element_type: element_type,
		}
	}

	/// Construct the definition used for names without catalog entry.
	pub fn generic<T: Into<RcPtr<str>>>(name: T) -> ElementDefinition {
		Self::new(name, ElementType::Normal)
	}

	/// Canonical (normalized) name.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn element_type(&self) -> ElementType {
		self.element_type
	}

	pub fn is_void(&self) -> bool {
		self.element_type == ElementType::Void
	}
}

impl fmt::Debug for ElementDefinition {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		f.debug_tuple("ElementDefinition")
			.field(&&*self.name)
			.field(&self.element_type)
			.finish()
	}
}

/// Canonical metadata for an attribute name.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AttributeDefinition {
	name: RcPtr<str>,
	boolean: bool,
}

impl AttributeDefinition {
	pub fn new<T: Into<RcPtr<str>>>(name: T, boolean: bool) -> AttributeDefinition {
		AttributeDefinition{
			name: name.into(),
			boolean: boolean,
		}
	}

	/// Construct the definition used for names without catalog entry.
	pub fn generic<T: Into<RcPtr<str>>>(name: T) -> AttributeDefinition {
		Self::new(name, false)
	}

	/// Canonical (normalized) name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Whether the attribute is boolean-valued, i.e. its presence alone
	/// carries its meaning (`disabled`, `checked`, ...).
	pub fn is_boolean(&self) -> bool {
		self.boolean
	}
}

impl fmt::Debug for AttributeDefinition {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		f.debug_tuple("AttributeDefinition")
			.field(&&*self.name)
			.field(&self.boolean)
			.finish()
	}
}
