use super::*;

// note that these are smoketests of the whole pipeline; the components are
// tested in their modules.

fn parse_html(doc: &str) -> Vec<Event> {
	TemplateParser::new(RcPtr::new(Catalog::html()))
		.parse(doc, EventRecorder::new())
		.unwrap()
		.into_events()
}

fn parse_xml(doc: &str) -> Vec<Event> {
	TemplateParser::new(RcPtr::new(Catalog::xml()))
		.parse(doc, EventRecorder::new())
		.unwrap()
		.into_events()
}

#[test]
fn minimal_document_yields_exact_event_sequence() {
	let events = parse_html("<a href=\"x\"/>");
	assert_eq!(events.len(), 5);
	let mut iter = events.iter();
	assert!(matches!(iter.next().unwrap(), Event::DocumentStart{ .. }));
	let (start_def, start_name) = match iter.next().unwrap() {
		Event::StandaloneElementStart{ definition, name, minimized: true, at } => {
			assert_eq!(definition.name(), "a");
			assert_eq!(&**name, "a");
			assert_eq!(*at, Location::new(1, 1));
			(definition, name)
		},
		other => panic!("unexpected event: {:?}", other),
	};
	match iter.next().unwrap() {
		Event::Attribute{ attribute, .. } => {
			assert_eq!(&*attribute.name, "href");
			assert_eq!(attribute.operator.as_deref(), Some("="));
			assert_eq!(attribute.value.as_deref(), Some("x"));
			assert_eq!(attribute.quoting, Some(AttributeValueQuoting::Double));
		},
		other => panic!("unexpected event: {:?}", other),
	};
	match iter.next().unwrap() {
		Event::StandaloneElementEnd{ definition, name, minimized: true, .. } => {
			assert!(RcPtr::ptr_eq(definition, start_def));
			assert!(RcPtr::ptr_eq(name, start_name));
		},
		other => panic!("unexpected event: {:?}", other),
	};
	assert!(matches!(iter.next().unwrap(), Event::DocumentEnd{ .. }));
	assert!(iter.next().is_none());
}

#[test]
fn doctype_without_identifiers() {
	let events = parse_html("<!DOCTYPE html>\n<html></html>");
	match &events[1] {
		Event::DocType{ doctype, at } => {
			assert_eq!(&*doctype.root_element_name, "html");
			assert!(doctype.public_id.is_none());
			assert!(doctype.system_id.is_none());
			assert!(doctype.doctype_type.is_none());
			assert_eq!(*at, Location::new(1, 1));
		},
		other => panic!("unexpected event: {:?}", other),
	}
}

#[test]
fn html_names_resolve_case_insensitively() {
	let events = parse_html("<DIV><div></Div></div>");
	let defs: Vec<_> = events.iter().filter_map(|ev| ev.element()).collect();
	assert_eq!(defs.len(), 8);
	for (def, _) in defs.iter() {
		assert!(RcPtr::ptr_eq(*def, defs[0].0));
	}
	// the name is kept as written
	assert_eq!(&**defs[0].1, "DIV");
	assert_eq!(&**defs[4].1, "Div");
}

#[test]
fn xml_names_resolve_case_sensitively() {
	let events = parse_xml("<Item><item/></Item>");
	let defs: Vec<_> = events.iter().filter_map(|ev| ev.element()).collect();
	assert!(!RcPtr::ptr_eq(defs[0].0, defs[2].0));
	assert!(RcPtr::ptr_eq(defs[0].0, defs[4].0));
}

#[test]
fn repeated_attribute_names_share_definition_and_text() {
	let events = parse_html("<li class=\"x\"></li><li class=\"x\"></li>");
	let attrs: Vec<&Attribute> = events.iter().filter_map(|ev| match ev {
		Event::Attribute{ attribute, .. } => Some(attribute),
		_ => None,
	}).collect();
	assert_eq!(attrs.len(), 2);
	assert!(RcPtr::ptr_eq(&attrs[0].definition, &attrs[1].definition));
	assert!(RcPtr::ptr_eq(&attrs[0].name, &attrs[1].name));
	assert!(RcPtr::ptr_eq(attrs[0].value.as_ref().unwrap(), attrs[1].value.as_ref().unwrap()));
}

#[test]
fn bare_and_empty_attributes_are_distinguished() {
	let events = parse_html("<input disabled value=\"\">");
	let attrs: Vec<&Attribute> = events.iter().filter_map(|ev| match ev {
		Event::Attribute{ attribute, .. } => Some(attribute),
		_ => None,
	}).collect();
	assert!(attrs[0].definition.is_boolean());
	assert!(attrs[0].value.is_none());
	assert!(attrs[0].quoting.is_none());
	assert_eq!(attrs[1].value.as_deref(), Some(""));
	assert_eq!(attrs[1].quoting, Some(AttributeValueQuoting::Double));
	// input is void, so no auto-close happens at the end
	assert!(matches!(events[1], Event::StandaloneElementStart{ minimized: false, .. }));
	assert_eq!(events.len(), 6);
}

#[test]
fn auto_close_and_unmatched_close_reach_the_handler() {
	let events = parse_html("<ul><li>one</ul></p>");
	let kinds: Vec<&str> = events.iter().map(|ev| match ev {
		Event::DocumentStart{ .. } => "doc-start",
		Event::DocumentEnd{ .. } => "doc-end",
		Event::OpenElementStart{ .. } => "open-start",
		Event::OpenElementEnd{ .. } => "open-end",
		Event::AutoCloseElementStart{ .. } => "auto-close-start",
		Event::AutoCloseElementEnd{ .. } => "auto-close-end",
		Event::CloseElementStart{ .. } => "close-start",
		Event::CloseElementEnd{ .. } => "close-end",
		Event::UnmatchedCloseElementStart{ .. } => "unmatched-start",
		Event::UnmatchedCloseElementEnd{ .. } => "unmatched-end",
		Event::Text{ .. } => "text",
		other => panic!("unexpected event: {:?}", other),
	}).collect();
	assert_eq!(kinds, vec![
		"doc-start",
		"open-start", "open-end",
		"open-start", "open-end",
		"text",
		"auto-close-start", "auto-close-end",
		"close-start", "close-end",
		"unmatched-start", "unmatched-end",
		"doc-end",
	]);
}

#[test]
fn declarations_and_comments_are_forwarded() {
	let events = parse_xml("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!-- hi --><?pi data?><r><![CDATA[a<b]]></r>");
	match &events[1] {
		Event::XmlDeclaration{ decl, .. } => {
			assert_eq!(decl.version.as_deref(), Some("1.0"));
			assert_eq!(decl.encoding.as_deref(), Some("utf-8"));
			assert!(decl.standalone.is_none());
		},
		other => panic!("unexpected event: {:?}", other),
	}
	assert!(matches!(&events[2], Event::Text{ text, .. } if text == "\n"));
	assert!(matches!(&events[3], Event::Comment{ content, at, .. } if content == " hi " && *at == Location::new(2, 1)));
	assert!(matches!(&events[4], Event::ProcessingInstruction{ pi, .. } if &*pi.target == "pi" && pi.content.as_deref() == Some("data")));
	assert!(matches!(&events[7], Event::CDataSection{ content, .. } if content == "a<b"));
}

#[test]
fn scanner_errors_surface_through_the_handler_error_type() {
	let parser = TemplateParser::new(RcPtr::new(Catalog::html()));
	let mut recorder = EventRecorder::new();
	let err = parser.parse("<p class=\"x", &mut recorder).err().unwrap();
	assert!(matches!(err, Error::NotWellFormed(WFError::InvalidEof(error::ERRCTX_ATTVAL), _)));
	// document start was delivered and is not retracted
	assert_eq!(recorder.len(), 1);
}

#[test]
fn handler_errors_abort_the_parse_unchanged() {
	#[derive(Debug)]
	enum MyError {
		Stop(String),
		Markup(Error),
	}

	impl From<Error> for MyError {
		fn from(e: Error) -> Self {
			MyError::Markup(e)
		}
	}

	struct StopAt {
		seen: usize,
	}

	impl TemplateHandler for StopAt {
		type Error = MyError;

		fn handle_open_element_start(&mut self, definition: &RcPtr<ElementDefinition>, _name: &RcPtr<str>, _at: Location) -> std::result::Result<(), MyError> {
			self.seen += 1;
			if definition.name() == "stop" {
				return Err(MyError::Stop(definition.name().to_string()))
			}
			Ok(())
		}
	}

	let parser = TemplateParser::new(RcPtr::new(Catalog::html()));
	let mut handler = StopAt{ seen: 0 };
	match parser.parse("<a><b><stop><c>", &mut handler) {
		Err(MyError::Stop(name)) => assert_eq!(name, "stop"),
		other => panic!("unexpected result: {:?}", other.map(|_| ())),
	}
	assert_eq!(handler.seen, 3);
}

#[test]
fn shared_text_pool_across_parses() {
	let catalog = RcPtr::new(Catalog::html());
	let pool = RcPtr::new(TextPool::new());
	let scanner = Scanner::new(catalog.clone());
	let mut names = Vec::new();
	for _ in 0..2 {
		let registry = DefinitionRegistry::new(catalog.clone());
		let texts = SharedTextRepository::new(pool.clone());
		let mut adapter = TemplateAdapter::with_text_repository(EventRecorder::new(), registry, texts);
		scanner.scan("<widget data-x=\"1\"/>", &mut adapter).unwrap();
		let events = adapter.into_inner().into_events();
		match &events[1] {
			Event::StandaloneElementStart{ name, .. } => names.push(name.clone()),
			other => panic!("unexpected event: {:?}", other),
		}
	}
	assert!(RcPtr::ptr_eq(&names[0], &names[1]));
}

#[test]
fn parser_options_are_applied() {
	let mut opts = ParserOptions::defaults();
	let mut scanner = ScannerOptions::defaults();
	scanner.inner_whitespace(true);
	opts.text_cache_capacity(16).scanner(scanner);
	let parser = TemplateParser::with_options(RcPtr::new(Catalog::html()), opts);
	assert_eq!(parser.options().text_cache_capacity, 16);
	let events = parser.parse("<a  b>", EventRecorder::new()).unwrap().into_events();
	assert!(matches!(&events[2], Event::InnerWhitespace{ whitespace, .. } if &**whitespace == "  "));
}
