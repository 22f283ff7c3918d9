use super::byteview::ByteView;
use crate::lru::Cache;
use parking_lot::Mutex;

/// Lock-guarded LRU store owned by a single group.
///
/// The store is built eagerly with the group's byte budget. Every call holds the lock for the
/// whole underlying operation; the guard is released on every exit path.
pub struct MainCache {
    lru: Mutex<Cache<ByteView>>,
}

impl MainCache {
    pub fn new(cache_bytes: u64) -> Self {
        Self {
            lru: Mutex::new(Cache::new(cache_bytes, None)),
        }
    }

    pub fn add(&self, key: &str, value: ByteView) {
        self.lru.lock().add(key, value);
    }

    pub fn get(&self, key: &str) -> Option<ByteView> {
        self.lru.lock().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.lru.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lru.lock().is_empty()
    }

    pub fn bytes(&self) -> u64 {
        self.lru.lock().bytes()
    }
}
