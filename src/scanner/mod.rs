/*!
# Bundled markup scanner

A small, non-validating, single-pass scanner over an in-memory `&str` which
reports everything it finds to a [`MarkupHandler`]. It understands enough
HTML and XML to drive a [`TemplateAdapter`](crate::TemplateAdapter) end to
end; it is not a conforming HTML5 tokenizer.

Element balancing and void element detection are optional, see
[`ScannerOptions`].
*/
use std::time::Instant;

use crate::catalog::Catalog;
use crate::definition::{Dialect, ElementType};
use crate::error::*;
use crate::markup::{AttributeSpans, DocTypeSpans, MarkupHandler, ProcessingInstructionSpans, XmlDeclarationSpans};
use crate::span::{Location, Span};
use crate::RcPtr;

mod balance;
mod cursor;

use balance::ElementStack;
use cursor::Cursor;

const EXPECT_TAG_END: &'static [&'static str] = &["'>'", "'/>'"];
const EXPECT_GT: &'static [&'static str] = &["'>'"];
const EXPECT_EQ: &'static [&'static str] = &["'='"];
const EXPECT_QUOTE: &'static [&'static str] = &["'\"'", "\"'\""];
const EXPECT_PI_END: &'static [&'static str] = &["'?>'"];

/**
# Scanner configuration

Balancing and void element detection default to on, inner whitespace
reporting to off.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerOptions {
	/// Track open elements and report auto-close and unmatched-close events.
	///
	/// If disabled, every end tag is reported as a plain close.
	pub balance_elements: bool,

	/// In the HTML dialect, report open tags of void elements (`<br>`) as
	/// standalone elements which are not minimized.
	pub void_elements: bool,

	/// Report whitespace inside tags as inner whitespace events.
	pub inner_whitespace: bool,
}

impl ScannerOptions {
	pub fn defaults() -> ScannerOptions {
		ScannerOptions{
			balance_elements: true,
			void_elements: true,
			inner_whitespace: false,
		}
	}

	pub fn balance_elements<'a>(&'a mut self, v: bool) -> &'a mut ScannerOptions {
		self.balance_elements = v;
		self
	}

	pub fn void_elements<'a>(&'a mut self, v: bool) -> &'a mut ScannerOptions {
		self.void_elements = v;
		self
	}

	pub fn inner_whitespace<'a>(&'a mut self, v: bool) -> &'a mut ScannerOptions {
		self.inner_whitespace = v;
		self
	}
}

impl Default for ScannerOptions {
	fn default() -> Self {
		Self::defaults()
	}
}

/// Things found between a tag name and the end of the tag.
enum TagItem {
	Whitespace(Span),
	Attribute(AttributeSpans),
}

fn is_name_start(b: u8) -> bool {
	b.is_ascii_alphabetic() || b == b'_' || b == b':' || b >= 0x80
}

fn is_name_char(ch: char) -> bool {
	!ch.is_ascii_whitespace() && !matches!(ch, '/' | '>' | '<' | '=' | '"' | '\'' | '?')
}

fn is_whitespace(ch: char) -> bool {
	ch.is_ascii_whitespace()
}

/**
# Markup scanner

The scanner itself holds only configuration; all per-document state lives
on the stack of [`Scanner::scan`], so one scanner may be used for any number
of documents.

Element and attribute names are matched against the catalog with the
catalog's dialect rules; that is, case-insensitively for HTML.

Malformed input aborts the scan with [`Error::NotWellFormed`], converted
into the handler's error type. Events reported before are not retracted.
*/
#[derive(Debug, Clone)]
pub struct Scanner {
	catalog: RcPtr<Catalog>,
	opts: ScannerOptions,
}

impl Scanner {
	/// Create a scanner with default options.
	pub fn new(catalog: RcPtr<Catalog>) -> Scanner {
		Self::with_options(catalog, ScannerOptions::defaults())
	}

	pub fn with_options(catalog: RcPtr<Catalog>, opts: ScannerOptions) -> Scanner {
		Scanner{
			catalog: catalog,
			opts: opts,
		}
	}

	pub fn options(&self) -> &ScannerOptions {
		&self.opts
	}

	pub fn catalog(&self) -> &RcPtr<Catalog> {
		&self.catalog
	}

	/// Scan `input` completely, reporting to `handler`.
	///
	/// The whole of `input` serves as the buffer passed to the handler.
	pub fn scan<H: MarkupHandler>(&self, input: &str, handler: &mut H) -> StdResult<(), H::Error>
		where H::Error: From<Error>
	{
		let mut run = Run{
			catalog: &*self.catalog,
			opts: &self.opts,
			buf: input,
			cur: Cursor::new(input),
			stack: ElementStack::new(),
			items: Vec::new(),
			handler: handler,
		};
		run.document()
	}
}

type StdResult<T, E> = std::result::Result<T, E>;

/// State of a single scan.
struct Run<'s, 'a, H> {
	catalog: &'s Catalog,
	opts: &'s ScannerOptions,
	buf: &'a str,
	cur: Cursor<'a>,
	stack: ElementStack,
	items: Vec<TagItem>,
	handler: &'s mut H,
}

impl<'s, 'a, H: MarkupHandler> Run<'s, 'a, H>
	where H::Error: From<Error>
{
	fn document(&mut self) -> StdResult<(), H::Error> {
		let start = Instant::now();
		self.handler.handle_document_start(start, self.cur.location())?;
		while !self.cur.is_eof() {
			if self.at_markup() {
				self.markup()?;
			} else {
				self.text()?;
			}
		}
		let at = self.cur.location();
		self.auto_close_above(0, at)?;
		let end = Instant::now();
		log::debug!(target: "markup_bridge::scanner", "scanned {} bytes in {:?}", self.buf.len(), end.duration_since(start));
		self.handler.handle_document_end(end, end.duration_since(start), at)
	}

	fn is_case_sensitive(&self) -> bool {
		self.catalog.dialect().is_case_sensitive()
	}

	/// Error for the character at the cursor, or for EOF if there is none.
	fn unexpected(&self, ctx: &'static str, expected: Option<&'static [&'static str]>) -> Error {
		match self.cur.peek() {
			Some(ch) => Error::wf(WFError::UnexpectedChar(ctx, ch, expected), self.cur.location()),
			None => Error::wfeof(ctx, self.cur.location()),
		}
	}

	fn skip_whitespace(&mut self) -> Span {
		self.cur.take_while(is_whitespace)
	}

	fn at_markup(&self) -> bool {
		if self.cur.peek_byte_at(0) != Some(b'<') {
			return false
		}
		if self.cur.starts_with("<!--") || self.cur.starts_with("<![CDATA[") || self.cur.starts_with("<?") {
			return true
		}
		if self.cur.starts_with_ignore_case("<!doctype") {
			return true
		}
		if self.cur.starts_with("</") {
			return self.cur.peek_byte_at(2).map(is_name_start).unwrap_or(false)
		}
		self.cur.peek_byte_at(1).map(is_name_start).unwrap_or(false)
	}

	fn markup(&mut self) -> StdResult<(), H::Error> {
		if self.cur.starts_with("<!--") {
			self.comment()
		} else if self.cur.starts_with("<![CDATA[") {
			self.cdata_section()
		} else if self.cur.starts_with_ignore_case("<!doctype") {
			self.doctype()
		} else if self.cur.starts_with("<?xml") && self.cur.peek_byte_at(5).map(|b| b.is_ascii_whitespace()).unwrap_or(false) {
			self.xml_declaration()
		} else if self.cur.starts_with("<?") {
			self.processing_instruction()
		} else if self.cur.starts_with("</") {
			self.close_tag()
		} else {
			self.open_tag()
		}
	}

	fn text(&mut self) -> StdResult<(), H::Error> {
		let mark = self.cur.here();
		// a '<' which does not start markup is text
		let first = self.cur.peek().map(|ch| ch.len_utf8()).unwrap_or(0);
		self.cur.advance(first);
		while !self.cur.is_eof() && !self.at_markup() {
			match self.cur.find('<') {
				Some(0) => self.cur.advance(1),
				Some(n) => self.cur.advance(n),
				None => self.cur.advance(self.cur.rest().len()),
			}
		}
		let text = self.cur.span_from(mark);
		log::trace!(target: "markup_bridge::scanner", "text of {} bytes at {}:{}", text.len, text.line, text.col);
		self.handler.handle_text(self.buf, &text, text.location())
	}

	/// Scan `open ... close`, returning content and outer span.
	fn delimited(&mut self, open: usize, close: &str, ctx: &'static str) -> StdResult<(Span, Span), H::Error> {
		let at = self.cur.location();
		let outer = self.cur.here();
		self.cur.advance(open);
		let content = self.cur.here();
		let n = match self.cur.find(close) {
			Some(n) => n,
			None => return Err(Error::wfeof(ctx, at).into()),
		};
		self.cur.advance(n);
		let content = self.cur.span_from(content);
		self.cur.advance(close.len());
		Ok((content, self.cur.span_from(outer)))
	}

	fn comment(&mut self) -> StdResult<(), H::Error> {
		let (content, outer) = self.delimited(4, "-->", ERRCTX_COMMENT)?;
		log::trace!(target: "markup_bridge::scanner", "comment at {}:{}", outer.line, outer.col);
		self.handler.handle_comment(self.buf, &content, &outer, outer.location())
	}

	fn cdata_section(&mut self) -> StdResult<(), H::Error> {
		let (content, outer) = self.delimited(9, "]]>", ERRCTX_CDATA_SECTION)?;
		log::trace!(target: "markup_bridge::scanner", "CDATA section at {}:{}", outer.line, outer.col);
		self.handler.handle_cdata_section(self.buf, &content, &outer, outer.location())
	}

	/// Scan a quoted value, returning the span between the quotes.
	fn quoted(&mut self, ctx: &'static str) -> StdResult<Span, H::Error> {
		let at = self.cur.location();
		let quote = match self.cur.peek() {
			Some(q @ '"') | Some(q @ '\'') => q,
			_ => return Err(self.unexpected(ctx, Some(EXPECT_QUOTE)).into()),
		};
		self.cur.advance(1);
		let mark = self.cur.here();
		let n = match self.cur.find(quote) {
			Some(n) => n,
			None => return Err(Error::wfeof(ctx, at).into()),
		};
		self.cur.advance(n);
		let content = self.cur.span_from(mark);
		self.cur.advance(1);
		Ok(content)
	}

	fn xml_declaration(&mut self) -> StdResult<(), H::Error> {
		let at = self.cur.location();
		let outer = self.cur.here();
		self.cur.advance(2);
		let mut spans = XmlDeclarationSpans{
			keyword: self.cur.take(3),
			..XmlDeclarationSpans::default()
		};
		loop {
			self.skip_whitespace();
			if self.cur.starts_with("?>") {
				self.cur.advance(2);
				break;
			}
			if self.cur.is_eof() {
				return Err(Error::wfeof(ERRCTX_XML_DECL, at).into())
			}
			let name = self.cur.take_while(is_name_char);
			if name.is_empty() {
				return Err(self.unexpected(ERRCTX_XML_DECL, Some(EXPECT_PI_END)).into())
			}
			self.skip_whitespace();
			if self.cur.peek() != Some('=') {
				return Err(self.unexpected(ERRCTX_XML_DECL, Some(EXPECT_EQ)).into())
			}
			self.cur.advance(1);
			self.skip_whitespace();
			let value = self.quoted(ERRCTX_XML_DECL)?;
			match name.slice(self.buf) {
				"version" => spans.version = value,
				"encoding" => spans.encoding = value,
				"standalone" => spans.standalone = value,
				_ => return Err(Error::wf(WFError::InvalidSyntax("unknown XML declaration attribute"), name.location()).into()),
			}
		}
		spans.outer = self.cur.span_from(outer);
		log::trace!(target: "markup_bridge::scanner", "XML declaration at {}:{}", at.line, at.col);
		self.handler.handle_xml_declaration(self.buf, &spans, at)
	}

	fn processing_instruction(&mut self) -> StdResult<(), H::Error> {
		let at = self.cur.location();
		let outer = self.cur.here();
		self.cur.advance(2);
		let target = self.cur.take_while(is_name_char);
		if target.is_empty() {
			return Err(self.unexpected(ERRCTX_PI, None).into())
		}
		self.skip_whitespace();
		let mark = self.cur.here();
		let n = match self.cur.find("?>") {
			Some(n) => n,
			None => return Err(Error::wfeof(ERRCTX_PI, at).into()),
		};
		self.cur.advance(n);
		let content = self.cur.span_from(mark);
		self.cur.advance(2);
		let spans = ProcessingInstructionSpans{
			target: target,
			content: content,
			outer: self.cur.span_from(outer),
		};
		log::trace!(target: "markup_bridge::scanner", "processing instruction at {}:{}", at.line, at.col);
		self.handler.handle_processing_instruction(self.buf, &spans, at)
	}

	fn require_whitespace(&mut self, ctx: &'static str) -> StdResult<(), H::Error> {
		if self.skip_whitespace().is_empty() {
			return Err(self.unexpected(ctx, None).into())
		}
		Ok(())
	}

	fn doctype(&mut self) -> StdResult<(), H::Error> {
		let at = self.cur.location();
		let outer = self.cur.here();
		self.cur.advance(2);
		let keyword = self.cur.take(7);
		self.require_whitespace(ERRCTX_DOCTYPE)?;
		let element_name = self.cur.take_while(is_name_char);
		if element_name.is_empty() {
			return Err(self.unexpected(ERRCTX_DOCTYPE, None).into())
		}
		let mut spans = DocTypeSpans{
			keyword: keyword,
			element_name: element_name,
			..DocTypeSpans::default()
		};
		self.skip_whitespace();
		if self.cur.starts_with_ignore_case("PUBLIC") {
			spans.doctype_type = self.cur.take(6);
			self.require_whitespace(ERRCTX_DOCTYPE)?;
			spans.public_id = self.quoted(ERRCTX_DOCTYPE)?;
			self.skip_whitespace();
			if let Some('"') | Some('\'') = self.cur.peek() {
				spans.system_id = self.quoted(ERRCTX_DOCTYPE)?;
			}
		} else if self.cur.starts_with_ignore_case("SYSTEM") {
			spans.doctype_type = self.cur.take(6);
			self.require_whitespace(ERRCTX_DOCTYPE)?;
			spans.system_id = self.quoted(ERRCTX_DOCTYPE)?;
		}
		self.skip_whitespace();
		if self.cur.starts_with("[") {
			self.cur.advance(1);
			let mark = self.cur.here();
			let n = match self.cur.find(']') {
				Some(n) => n,
				None => return Err(Error::wfeof(ERRCTX_DOCTYPE, at).into()),
			};
			self.cur.advance(n);
			spans.internal_subset = self.cur.span_from(mark);
			self.cur.advance(1);
			self.skip_whitespace();
		}
		if self.cur.peek() != Some('>') {
			return Err(self.unexpected(ERRCTX_DOCTYPE, Some(EXPECT_GT)).into())
		}
		self.cur.advance(1);
		spans.outer = self.cur.span_from(outer);
		log::trace!(target: "markup_bridge::scanner", "DOCTYPE at {}:{}", at.line, at.col);
		self.handler.handle_doctype(self.buf, &spans, at)
	}

	/// Scan one attribute, starting at its name.
	///
	/// Whitespace after the name is only consumed if an operator follows.
	fn attribute(&mut self) -> StdResult<AttributeSpans, H::Error> {
		let name = self.cur.take_while(is_name_char);
		let op_mark = self.cur.here();
		let before_ws = self.cur.clone();
		self.skip_whitespace();
		if self.cur.peek() != Some('=') {
			self.cur = before_ws;
			return Ok(AttributeSpans{
				name: name,
				operator: op_mark,
				value_content: op_mark,
				value_outer: op_mark,
			})
		}
		self.cur.advance(1);
		self.skip_whitespace();
		let operator = self.cur.span_from(op_mark);
		let (value_content, value_outer) = match self.cur.peek() {
			Some('"') | Some('\'') => {
				let mark = self.cur.here();
				let content = self.quoted(ERRCTX_ATTVAL)?;
				(content, self.cur.span_from(mark))
			},
			_ => {
				let value = self.cur.take_while(|ch| !is_whitespace(ch) && ch != '>');
				(value, value)
			},
		};
		Ok(AttributeSpans{
			name: name,
			operator: operator,
			value_content: value_content,
			value_outer: value_outer,
		})
	}

	fn push_whitespace(&mut self, ws: Span) {
		if self.opts.inner_whitespace && !ws.is_empty() {
			self.items.push(TagItem::Whitespace(ws));
		}
	}

	fn emit_tag_items(&mut self) -> StdResult<(), H::Error> {
		for item in self.items.iter() {
			match item {
				TagItem::Whitespace(ws) => self.handler.handle_inner_whitespace(self.buf, ws, ws.location())?,
				TagItem::Attribute(attr) => self.handler.handle_attribute(self.buf, attr, attr.name.location())?,
			}
		}
		Ok(())
	}

	fn open_tag(&mut self) -> StdResult<(), H::Error> {
		let at = self.cur.location();
		self.cur.advance(1);
		let name = self.cur.take_while(is_name_char);
		self.items.clear();
		let minimized = loop {
			let ws = self.skip_whitespace();
			self.push_whitespace(ws);
			match self.cur.peek() {
				None => return Err(Error::wfeof(ERRCTX_ELEMENT, at).into()),
				Some('>') => {
					self.cur.advance(1);
					break false;
				},
				Some('/') if self.cur.starts_with("/>") => {
					self.cur.advance(2);
					break true;
				},
				Some(ch) if is_name_char(ch) => {
					let attr = self.attribute()?;
					self.items.push(TagItem::Attribute(attr));
				},
				Some(_) => return Err(self.unexpected(ERRCTX_ELEMENT, Some(EXPECT_TAG_END)).into()),
			}
		};
		let name_str = name.slice(self.buf);
		let dialect = self.catalog.dialect();
		let void = !minimized
			&& self.opts.void_elements
			&& dialect == Dialect::Html
			&& self.catalog.is_void_element(name_str);
		if minimized || void {
			log::trace!(target: "markup_bridge::scanner", "standalone element {:?} at {}:{}", name_str, at.line, at.col);
			self.handler.handle_standalone_element_start(self.buf, &name, minimized, at)?;
			self.emit_tag_items()?;
			return self.handler.handle_standalone_element_end(self.buf, &name, minimized, at)
		}
		log::trace!(target: "markup_bridge::scanner", "open element {:?} at {}:{}", name_str, at.line, at.col);
		self.handler.handle_open_element_start(self.buf, &name, at)?;
		self.emit_tag_items()?;
		self.handler.handle_open_element_end(self.buf, &name, at)?;
		if self.opts.balance_elements {
			self.stack.push(name);
		}
		if dialect == Dialect::Html && self.is_raw_text_element(name_str) {
			self.raw_text(name_str)?;
		}
		Ok(())
	}

	fn is_raw_text_element(&self, name: &str) -> bool {
		let mut scratch = smartstring::alias::String::new();
		match self.catalog.element(self.catalog.normalize(name, &mut scratch)) {
			Some(def) => matches!(def.element_type(), ElementType::RawText | ElementType::EscapableRawText),
			None => false,
		}
	}

	/// Report everything up to the end tag of `name` as a single text.
	fn raw_text(&mut self, name: &str) -> StdResult<(), H::Error> {
		let mark = self.cur.here();
		let rest = self.cur.rest();
		let mut end = rest.len();
		let mut from = 0;
		while let Some(i) = rest[from..].find("</") {
			let candidate = from + i;
			let after = &rest.as_bytes()[candidate + 2..];
			let terminated = match after.get(name.len()) {
				None => true,
				Some(b) => b.is_ascii_whitespace() || *b == b'>' || *b == b'/',
			};
			if after.len() >= name.len() && after[..name.len()].eq_ignore_ascii_case(name.as_bytes()) && terminated {
				end = candidate;
				break;
			}
			from = candidate + 2;
		}
		if end == 0 {
			return Ok(())
		}
		self.cur.advance(end);
		let text = self.cur.span_from(mark);
		log::trace!(target: "markup_bridge::scanner", "raw text of {} bytes at {}:{}", text.len, text.line, text.col);
		self.handler.handle_text(self.buf, &text, text.location())
	}

	fn close_tag(&mut self) -> StdResult<(), H::Error> {
		let at = self.cur.location();
		self.cur.advance(2);
		let name = self.cur.take_while(is_name_char);
		self.items.clear();
		let ws = self.skip_whitespace();
		self.push_whitespace(ws);
		if self.cur.peek() != Some('>') {
			return Err(self.unexpected(ERRCTX_ELEMENT_FOOT, Some(EXPECT_GT)).into())
		}
		self.cur.advance(1);

		if !self.opts.balance_elements {
			log::trace!(target: "markup_bridge::scanner", "close element at {}:{}", at.line, at.col);
			self.handler.handle_close_element_start(self.buf, &name, at)?;
			self.emit_tag_items()?;
			return self.handler.handle_close_element_end(self.buf, &name, at)
		}

		match self.stack.position(self.buf, name.slice(self.buf), self.is_case_sensitive()) {
			Some(depth) => {
				self.auto_close_above(depth + 1, at)?;
				self.stack.pop();
				log::trace!(target: "markup_bridge::scanner", "close element at {}:{}", at.line, at.col);
				self.handler.handle_close_element_start(self.buf, &name, at)?;
				self.emit_tag_items()?;
				self.handler.handle_close_element_end(self.buf, &name, at)
			},
			None => {
				log::trace!(target: "markup_bridge::scanner", "unmatched close element at {}:{}", at.line, at.col);
				self.handler.handle_unmatched_close_element_start(self.buf, &name, at)?;
				self.emit_tag_items()?;
				self.handler.handle_unmatched_close_element_end(self.buf, &name, at)
			},
		}
	}

	/// Auto-close open elements, innermost first, until `depth` remain.
	fn auto_close_above(&mut self, depth: usize, at: Location) -> StdResult<(), H::Error> {
		while self.stack.len() > depth {
			let name = match self.stack.pop() {
				Some(name) => name,
				None => break,
			};
			log::trace!(target: "markup_bridge::scanner", "auto-closing {:?} at {}:{}", name.slice(self.buf), at.line, at.col);
			self.handler.handle_auto_close_element_start(self.buf, &name, at)?;
			self.handler.handle_auto_close_element_end(self.buf, &name, at)?;
		}
		Ok(())
	}
}
