//! Shared read cache for loaded items
//!
//! Every mutation invalidates the whole cache; the generation counter lets
//! callers observe that an invalidation happened.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::prelude::*;
use ringo_types::item::Item;

const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::MIN.saturating_add(999);

pub struct ReadCache {
	items: Mutex<LruCache<(Box<str>, ItemId), Item>>,
	generation: AtomicU64,
}

impl ReadCache {
	pub fn new(capacity: usize) -> Self {
		let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY);
		Self { items: Mutex::new(LruCache::new(capacity)), generation: AtomicU64::new(0) }
	}

	pub fn get(&self, module: &str, id: ItemId) -> Option<Item> {
		self.items.lock().get(&(module.into(), id)).cloned()
	}

	pub fn put(&self, item: Item) {
		self.items.lock().put((item.module.clone(), item.id), item);
	}

	/// Drop every cached item
	pub fn invalidate(&self) {
		self.items.lock().clear();
		let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
		debug!("Read cache invalidated (generation {})", generation);
	}

	/// Number of invalidations so far
	pub fn generation(&self) -> u64 {
		self.generation.load(Ordering::Relaxed)
	}

	pub fn len(&self) -> usize {
		self.items.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.lock().is_empty()
	}
}


// vim: ts=4
