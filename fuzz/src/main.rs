#[macro_use]
extern crate afl;

use markup_bridge::{Catalog, Event, EventRecorder, ParserOptions, RcPtr, TemplateParser};

fn main() {
	let html = TemplateParser::new(RcPtr::new(Catalog::html()));
	let mut opts = ParserOptions::defaults();
	opts.text_cache_capacity(4).max_cached_text_len(8);
	let xml = TemplateParser::with_options(RcPtr::new(Catalog::xml()), opts);

	fuzz!(|data: &[u8]| {
		let doc = match std::str::from_utf8(data) {
			Ok(doc) => doc,
			Err(_) => return,
		};
		for parser in [&html, &xml].iter() {
			let mut recorder = EventRecorder::new();
			if parser.parse(doc, &mut recorder).is_err() {
				continue;
			}
			let events = recorder.into_events();
			assert!(matches!(events.first(), Some(Event::DocumentStart{ .. })));
			assert!(matches!(events.last(), Some(Event::DocumentEnd{ .. })));
			// start/end pairs carry the identical definition
			for pair in events.windows(2) {
				if let (Some((d1, _)), Some((d2, _))) = (pair[0].element(), pair[1].element()) {
					if d1.name() == d2.name() {
						assert!(RcPtr::ptr_eq(d1, d2));
					}
				}
			}
		}
	});
}
