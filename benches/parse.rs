use criterion::{black_box, criterion_group, criterion_main, Criterion};

use markup_bridge::{
	Catalog, DefinitionRegistry, Error, EventRecorder, LruTextRepository, MarkupHandler, RcPtr,
	Scanner, SharedTextRepository, TemplateAdapter, TemplateHandler, TextPool,
	UncachedTextRepository,
};

/// Template handler which accepts everything and keeps nothing.
struct Discard;

impl TemplateHandler for Discard {
	type Error = Error;
}

/// Markup handler which ignores all callbacks.
struct Ignore;

impl MarkupHandler for Ignore {
	type Error = Error;
}

fn repetitive_document(rows: usize) -> String {
	let mut doc = String::from("<!DOCTYPE html>\n<html><body><table>\n");
	for i in 0..rows {
		doc.push_str("<tr class=\"row\" data-kind='item'>");
		doc.push_str(&format!("<td class=\"cell\">{}</td><td class=\"cell\"><input type=checkbox checked></td>", i));
		doc.push_str("</tr>\n");
	}
	doc.push_str("</table></body></html>\n");
	doc
}

fn adapt_repetitive(c: &mut Criterion) {
	let doc = repetitive_document(1000);
	let catalog = RcPtr::new(Catalog::html());
	let scanner = Scanner::new(catalog.clone());
	let mut group = c.benchmark_group("adapting a repetitive document");

	group.bench_function("scanner only", |b| {
		b.iter(|| {
			let mut h = Ignore;
			scanner.scan(black_box(&doc), &mut h).unwrap();
		});
	});

	group.bench_function("UncachedTextRepository", |b| {
		b.iter(|| {
			let registry = DefinitionRegistry::new(catalog.clone());
			let mut adapter = TemplateAdapter::with_text_repository(Discard, registry, UncachedTextRepository::new());
			scanner.scan(black_box(&doc), &mut adapter).unwrap();
		});
	});

	group.bench_function("LruTextRepository", |b| {
		b.iter(|| {
			let registry = DefinitionRegistry::new(catalog.clone());
			let mut adapter = TemplateAdapter::with_text_repository(Discard, registry, LruTextRepository::new());
			scanner.scan(black_box(&doc), &mut adapter).unwrap();
		});
	});

	let pool = RcPtr::new(TextPool::new());
	group.bench_function("SharedTextRepository", |b| {
		b.iter(|| {
			let registry = DefinitionRegistry::new(catalog.clone());
			let texts = SharedTextRepository::new(pool.clone());
			let mut adapter = TemplateAdapter::with_text_repository(Discard, registry, texts);
			scanner.scan(black_box(&doc), &mut adapter).unwrap();
		});
	});

	group.bench_function("EventRecorder", |b| {
		b.iter(|| {
			let registry = DefinitionRegistry::new(catalog.clone());
			let mut adapter = TemplateAdapter::new(EventRecorder::new(), registry);
			scanner.scan(black_box(&doc), &mut adapter).unwrap();
			adapter.into_inner().len()
		});
	});
}

criterion_group!(benches, adapt_repetitive);
criterion_main!(benches);
