use std::collections::HashMap;

/// Anything stored in the [`Cache`] must report its size in bytes.
pub trait Value {
    fn len(&self) -> usize;
}

/// Hook invoked with the exact key and value of every entry dropped by `remove_oldest`.
pub type OnEvicted<V> = Box<dyn FnMut(String, V) + Send>;

struct Entry<V> {
    key: String,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

impl<V: Value> Entry<V> {
    fn cost(&self) -> u64 {
        (self.key.len() + self.value.len()) as u64
    }
}

/// Least-recently-used store bounded by a byte budget.
///
/// Entries live in a slot vector and are threaded into a doubly linked recency list by index:
/// `head` is the most recently used entry, `tail` the next eviction victim.
pub struct Cache<V> {
    max_bytes: u64,
    n_bytes: u64,
    slots: Vec<Option<Entry<V>>>,
    free: Vec<usize>,
    index: HashMap<String, usize>,
    head: Option<usize>,
    tail: Option<usize>,
    on_evicted: Option<OnEvicted<V>>,
}

impl<V: Value> Cache<V> {
    /// Creates an empty store. `max_bytes == 0` means unbounded.
    pub fn new(max_bytes: u64, on_evicted: Option<OnEvicted<V>>) -> Self {
        Self {
            max_bytes,
            n_bytes: 0,
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
            on_evicted,
        }
    }

    /// Inserts or replaces `key`, marks it most recently used, then evicts until within budget.
    pub fn add(&mut self, key: &str, value: V) {
        if let Some(&idx) = self.index.get(key) {
            let entry = self.entry_mut(idx);
            let old = entry.cost();
            entry.value = value;
            let new = entry.cost();
            self.n_bytes = self.n_bytes - old + new;
            self.unlink(idx);
            self.push_front(idx);
        } else {
            let entry = Entry {
                key: key.to_string(),
                value,
                prev: None,
                next: None,
            };
            self.n_bytes += entry.cost();
            let idx = self.alloc(entry);
            self.index.insert(key.to_string(), idx);
            self.push_front(idx);
        }

        while self.max_bytes != 0 && self.n_bytes > self.max_bytes {
            self.remove_oldest();
        }
    }

    /// Looks up `key` and promotes it to most recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.unlink(idx);
        self.push_front(idx);
        Some(&self.entry_mut(idx).value)
    }

    /// Looks up `key` without touching the recency order.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.slots[idx].as_ref().map(|entry| &entry.value)
    }

    /// Evicts the least recently used entry, firing the eviction hook. No-op when empty.
    pub fn remove_oldest(&mut self) {
        let Some(idx) = self.tail else {
            return;
        };
        let entry = self.release(idx);
        tracing::trace!("lru: evicting {:?} ({} entries left)", entry.key, self.len());

        if let Some(on_evicted) = self.on_evicted.as_mut() {
            on_evicted(entry.key, entry.value);
        }
    }

    /// Deletes `key` outright. The eviction hook is not called.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = *self.index.get(key)?;
        Some(self.release(idx).value)
    }

    /// Number of live entries (not bytes).
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Sum of `key.len() + value.len()` over live entries.
    pub fn bytes(&self) -> u64 {
        self.n_bytes
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    fn entry_mut(&mut self, idx: usize) -> &mut Entry<V> {
        self.slots[idx]
            .as_mut()
            .unwrap_or_else(|| unreachable!("lru index points at an empty slot"))
    }

    fn alloc(&mut self, entry: Entry<V>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(entry);
                idx
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        }
    }

    /// Unlinks the slot, drops it from the index and the byte count, and frees it for reuse.
    fn release(&mut self, idx: usize) -> Entry<V> {
        self.unlink(idx);
        let entry = self.slots[idx]
            .take()
            .unwrap_or_else(|| unreachable!("lru index points at an empty slot"));
        self.free.push(idx);
        self.index.remove(&entry.key);
        self.n_bytes -= entry.cost();
        entry
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let entry = self.entry_mut(idx);
            let links = (entry.prev, entry.next);
            entry.prev = None;
            entry.next = None;
            links
        };

        match prev {
            Some(p) => self.entry_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.entry_mut(n).prev = prev,
            None => self.tail = prev,
        }
    }

    fn push_front(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let entry = self.entry_mut(idx);
            entry.prev = None;
            entry.next = old_head;
        }
        match old_head {
            Some(h) => self.entry_mut(h).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }
}

impl Value for String {
    fn len(&self) -> usize {
        String::len(self)
    }
}

impl Value for Vec<u8> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
}
