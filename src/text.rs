/*!
# Materialization of buffer text

The scan buffer is only valid while a callback runs. Everything the adapter
hands downstream which may outlive the callback is copied out of the buffer
through a [`TextRepository`]. Repositories may return a shared instance for
repeated identical text, which bounds allocation for documents repeating the
same handful of names and values thousands of times.

Three implementations are provided:

* [`UncachedTextRepository`] copies every time.
* [`LruTextRepository`] keeps a bounded, least-recently-used set of strings
  for the duration of a parse. This is the default.
* [`SharedTextRepository`] interns into a [`TextPool`] which can be shared by
  many parses; strings are kept alive only as long as someone references
  them.
*/
use std::fmt;
use std::num::NonZeroUsize;

#[cfg(feature = "mt")]
use std::sync::{Mutex, MutexGuard, Weak};
#[cfg(not(feature = "mt"))]
use std::rc::Weak;
#[cfg(not(feature = "mt"))]
use std::cell::{RefCell, RefMut};

use lru::LruCache;

use crate::span::Span;
use crate::RcPtr;

/// Source of materialized text.
pub trait TextRepository {
	/// Return a string equal to the text at `span` in `buffer`.
	///
	/// The returned value never borrows from `buffer`.
	fn get_text(&mut self, buffer: &str, span: &Span) -> RcPtr<str>;

	/// Release cached strings which are not needed anymore.
	///
	/// This is sensible to call when it is expected that no more data will be
	/// processed for a while and the memory is better used elsewhere.
	fn release_temporaries(&mut self) {}
}

impl<T: TextRepository + ?Sized> TextRepository for &mut T {
	fn get_text(&mut self, buffer: &str, span: &Span) -> RcPtr<str> {
		(**self).get_text(buffer, span)
	}

	fn release_temporaries(&mut self) {
		(**self).release_temporaries()
	}
}

/// Repository which allocates a fresh string for every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct UncachedTextRepository;

impl UncachedTextRepository {
	pub fn new() -> UncachedTextRepository {
		UncachedTextRepository
	}
}

impl TextRepository for UncachedTextRepository {
	fn get_text(&mut self, buffer: &str, span: &Span) -> RcPtr<str> {
		RcPtr::from(span.slice(buffer))
	}
}

/// Default number of strings retained by an [`LruTextRepository`].
pub const DEFAULT_TEXT_CACHE_CAPACITY: usize = 1024;

/// Default length limit above which text is not cached.
pub const DEFAULT_MAX_CACHED_TEXT_LEN: usize = 64;

/**
# Bounded text cache

Keeps up to `capacity` distinct strings, evicting the least recently used
one when full. Texts longer than `max_len` bytes are copied without being
cached: long strings rarely repeat and would displace the short names and
values which do.
*/
pub struct LruTextRepository {
	cache: LruCache<RcPtr<str>, RcPtr<str>>,
	max_len: usize,
	hits: usize,
	misses: usize,
}

impl LruTextRepository {
	/// Create a repository with default settings.
	pub fn new() -> LruTextRepository {
		Self::with_capacity(DEFAULT_TEXT_CACHE_CAPACITY, DEFAULT_MAX_CACHED_TEXT_LEN)
	}

	/// Create a repository retaining up to `capacity` strings of at most
	/// `max_len` bytes each.
	///
	/// A capacity of zero is treated as one.
	pub fn with_capacity(capacity: usize, max_len: usize) -> LruTextRepository {
		let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
		LruTextRepository{
			cache: LruCache::new(capacity),
			max_len: max_len,
			hits: 0,
			misses: 0,
		}
	}

	/// Number of strings currently retained.
	pub fn len(&self) -> usize {
		self.cache.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cache.is_empty()
	}

	pub fn capacity(&self) -> usize {
		self.cache.cap().get()
	}

	/// Number of requests served from the cache.
	pub fn hits(&self) -> usize {
		self.hits
	}

	/// Number of requests which had to allocate.
	pub fn misses(&self) -> usize {
		self.misses
	}
}

impl Default for LruTextRepository {
	fn default() -> Self {
		Self::new()
	}
}

impl TextRepository for LruTextRepository {
	fn get_text(&mut self, buffer: &str, span: &Span) -> RcPtr<str> {
		let text = span.slice(buffer);
		if text.len() > self.max_len {
			self.misses += 1;
			return RcPtr::from(text)
		}
		if let Some(cached) = self.cache.get(text) {
			self.hits += 1;
			return cached.clone()
		}
		self.misses += 1;
		let owned: RcPtr<str> = RcPtr::from(text);
		self.cache.put(owned.clone(), owned.clone());
		owned
	}

	fn release_temporaries(&mut self) {
		self.cache.clear();
	}
}

impl fmt::Debug for LruTextRepository {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("LruTextRepository")
			.field("len", &self.cache.len())
			.field("capacity", &self.cache.cap())
			.field("max_len", &self.max_len)
			.field("hits", &self.hits)
			.field("misses", &self.misses)
			.finish()
	}
}

type TextWeakSet = weak_table::WeakHashSet<Weak<str>>;

#[cfg(feature = "mt")]
type TextCell = Mutex<TextWeakSet>;
#[cfg(not(feature = "mt"))]
type TextCell = RefCell<TextWeakSet>;

/**
# Weakly referenced text pool

Interns strings for any number of [`SharedTextRepository`] instances, and
thus for any number of parses. The pool holds only weak references: an
entry lives exactly as long as some event, definition or consumer still
holds the returned [`RcPtr`].

All methods take `&self`. With the `mt` feature the pool locks a mutex
internally and may be shared between threads; without it, it uses a
`RefCell` and must stay on one thread.
*/
pub struct TextPool {
	texts: TextCell,
}

impl TextPool {
	pub fn new() -> TextPool {
		TextPool{
			texts: TextCell::new(TextWeakSet::new()),
		}
	}

	#[cfg(feature = "mt")]
	fn texts_mut<'a>(&'a self) -> MutexGuard<'a, TextWeakSet> {
		// the set holds no invariants a panicking holder could break
		self.texts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
	}

	#[cfg(not(feature = "mt"))]
	fn texts_mut<'a>(&'a self) -> RefMut<'a, TextWeakSet> {
		self.texts.borrow_mut()
	}

	/// Return the pooled instance equal to `text`, adding it if needed.
	///
	/// Entries whose last strong reference is gone are not removed right
	/// away; the set reuses their slots when it next needs room.
	pub fn intern(&self, text: &str) -> RcPtr<str> {
		let mut texts = self.texts_mut();
		if let Some(ptr) = texts.get(text) {
			return ptr
		}
		let ptr: RcPtr<str> = RcPtr::from(text);
		texts.insert(ptr.clone());
		ptr
	}

	/// Purge dead entries and give unused capacity back to the allocator.
	///
	/// Calling this is only worthwhile after a burst of parses when the pool
	/// is expected to sit idle.
	pub fn release_temporaries(&self) {
		let mut texts = self.texts_mut();
		texts.remove_expired();
		texts.shrink_to_fit();
	}

	/// Number of entries, dead ones which were not purged yet included.
	pub fn texts(&self) -> usize {
		self.texts_mut().len()
	}
}

impl Default for TextPool {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for TextPool {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		let texts = self.texts_mut();
		f.debug_struct("TextPool")
			.field("len", &texts.len())
			.field("capacity", &texts.capacity())
			.finish()
	}
}

/// Repository interning into a shared [`TextPool`].
#[derive(Debug, Clone)]
pub struct SharedTextRepository {
	pool: RcPtr<TextPool>,
}

impl SharedTextRepository {
	pub fn new(pool: RcPtr<TextPool>) -> SharedTextRepository {
		SharedTextRepository{
			pool: pool,
		}
	}

	pub fn pool(&self) -> &RcPtr<TextPool> {
		&self.pool
	}
}

impl TextRepository for SharedTextRepository {
	fn get_text(&mut self, buffer: &str, span: &Span) -> RcPtr<str> {
		self.pool.intern(span.slice(buffer))
	}

	fn release_temporaries(&mut self) {
		self.pool.release_temporaries();
	}
}
