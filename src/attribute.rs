/*!
# Decoding of attribute value spans

An attribute arrives as four spans: name, operator, value content and value
outer. The [`AttributeDecoder`] turns the latter three into an
[`AttributeValue`]: the operator text, the unquoted value and the quoting
style the value was written in.
*/
use crate::span::Span;
use crate::text::TextRepository;
use crate::RcPtr;

/// How an attribute value was delimited in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeValueQuoting {
	/// `name=value`
	Unquoted,
	/// `name='value'`
	Single,
	/// `name="value"`
	Double,
}

/// Operator, value and quoting of an attribute.
///
/// For bare attributes (`<input disabled>`) all three are `None`. Otherwise,
/// the operator and quoting are always set and the value is set, though it
/// may be empty (`a=""`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeValue {
	pub operator: Option<RcPtr<str>>,
	pub value: Option<RcPtr<str>>,
	pub quoting: Option<AttributeValueQuoting>,
}

impl AttributeValue {
	/// Return true if the attribute was written without operator and value.
	pub fn is_bare(&self) -> bool {
		self.operator.is_none()
	}
}

/**
# Decoder for attribute value spans

The operator, if it is exactly `=`, is served from a constant held by the
decoder, so that the overwhelmingly common case does not touch the text
repository at all. Operators with surrounding whitespace (`a = "b"`) are
materialized as written.

Quoting is derived from the relation of the outer and content spans: if the
content starts at the same offset as the outer span, the value is unquoted;
otherwise the first outer character tells double from single quotes.
*/
#[derive(Debug, Clone)]
pub struct AttributeDecoder {
	equals: RcPtr<str>,
}

impl AttributeDecoder {
	pub fn new() -> AttributeDecoder {
		AttributeDecoder{
			equals: RcPtr::from("="),
		}
	}

	/// Decode the operator and value spans of an attribute.
	pub fn decode<T: TextRepository>(
			&self,
			texts: &mut T,
			buffer: &str,
			operator: &Span,
			value_content: &Span,
			value_outer: &Span,
			) -> AttributeValue
	{
		if operator.is_empty() {
			return AttributeValue::default()
		}
		let operator = if operator.slice(buffer) == "=" {
			self.equals.clone()
		} else {
			texts.get_text(buffer, operator)
		};
		AttributeValue{
			operator: Some(operator),
			value: Some(texts.get_text(buffer, value_content)),
			quoting: Some(quoting_of(buffer, value_content, value_outer)),
		}
	}
}

impl Default for AttributeDecoder {
	fn default() -> Self {
		Self::new()
	}
}

fn quoting_of(buffer: &str, content: &Span, outer: &Span) -> AttributeValueQuoting {
	if outer.offset == content.offset {
		return AttributeValueQuoting::Unquoted
	}
	match buffer.as_bytes().get(outer.offset) {
		Some(b'"') => AttributeValueQuoting::Double,
		_ => AttributeValueQuoting::Single,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use crate::text::{LruTextRepository, UncachedTextRepository};

	struct Parts {
		operator: Span,
		content: Span,
		outer: Span,
	}

	// crude splitter for test inputs of the form `name`, `name=v`, `name="v"`
	fn split(attr: &str) -> Parts {
		let eq = match attr.find('=') {
			Some(eq) => eq,
			None => return Parts{
				operator: Span::new(attr.len(), 0, 1, 1),
				content: Span::new(attr.len(), 0, 1, 1),
				outer: Span::new(attr.len(), 0, 1, 1),
			},
		};
		let rest = &attr[eq + 1..];
		let value_start = eq + 1 + (rest.len() - rest.trim_start().len());
		let op_end = value_start;
		let op_start = attr[..eq].trim_end().len();
		let outer = Span::new(value_start, attr.len() - value_start, 1, value_start + 1);
		let quoted = attr[value_start..].starts_with('"') || attr[value_start..].starts_with('\'');
		let content = if quoted {
			Span::new(value_start + 1, outer.len - 2, 1, value_start + 2)
		} else {
			outer
		};
		Parts{
			operator: Span::new(op_start, op_end - op_start, 1, op_start + 1),
			content: content,
			outer: outer,
		}
	}

	fn decode(attr: &str) -> AttributeValue {
		let parts = split(attr);
		let mut texts = UncachedTextRepository::new();
		AttributeDecoder::new().decode(&mut texts, attr, &parts.operator, &parts.content, &parts.outer)
	}

	#[test]
	fn bare_attribute_has_no_operator_value_or_quoting() {
		let v = decode("disabled");
		assert!(v.is_bare());
		assert_eq!(v, AttributeValue::default());
	}

	#[test]
	fn double_quoted_value() {
		let v = decode("a=\"b\"");
		assert_eq!(v.operator.as_deref(), Some("="));
		assert_eq!(v.value.as_deref(), Some("b"));
		assert_eq!(v.quoting, Some(AttributeValueQuoting::Double));
	}

	#[test]
	fn single_quoted_value() {
		let v = decode("a='b'");
		assert_eq!(v.value.as_deref(), Some("b"));
		assert_eq!(v.quoting, Some(AttributeValueQuoting::Single));
	}

	#[test]
	fn unquoted_value() {
		let v = decode("a=b");
		assert_eq!(v.operator.as_deref(), Some("="));
		assert_eq!(v.value.as_deref(), Some("b"));
		assert_eq!(v.quoting, Some(AttributeValueQuoting::Unquoted));
	}

	#[test]
	fn empty_quoted_value_is_present() {
		let v = decode("a=\"\"");
		assert_eq!(v.value.as_deref(), Some(""));
		assert_eq!(v.quoting, Some(AttributeValueQuoting::Double));
	}

	#[test]
	fn operator_with_whitespace_is_kept_verbatim() {
		let v = decode("a = 'b'");
		assert_eq!(v.operator.as_deref(), Some(" = "));
		assert_eq!(v.value.as_deref(), Some("b"));
		assert_eq!(v.quoting, Some(AttributeValueQuoting::Single));
	}

	#[test]
	fn plain_operator_is_shared() {
		let decoder = AttributeDecoder::new();
		let mut texts = LruTextRepository::new();
		let buf = "a=b c=d";
		let op1 = Span::new(1, 1, 1, 2);
		let op2 = Span::new(5, 1, 1, 6);
		let v1 = decoder.decode(&mut texts, buf, &op1, &Span::new(2, 1, 1, 3), &Span::new(2, 1, 1, 3));
		let v2 = decoder.decode(&mut texts, buf, &op2, &Span::new(6, 1, 1, 7), &Span::new(6, 1, 1, 7));
		assert!(RcPtr::ptr_eq(v1.operator.as_ref().unwrap(), v2.operator.as_ref().unwrap()));
		// the constant operator bypasses the repository
		assert_eq!(texts.hits() + texts.misses(), 2);
	}
}
