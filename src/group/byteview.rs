use crate::lru::Value;
use std::fmt;
use std::sync::Arc;

/// Read-only view over a cached value.
///
/// Cloning a view shares the buffer; nothing hands out a mutable or borrowed handle to it, and
/// [`ByteView::byte_slice`] always returns a fresh copy.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ByteView {
    b: Arc<[u8]>,
}

impl ByteView {
    /// Copies `bytes` into a new view.
    pub fn new(bytes: &[u8]) -> Self {
        Self { b: Arc::from(bytes) }
    }

    pub fn len(&self) -> usize {
        self.b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    /// Returns a copy of the data.
    pub fn byte_slice(&self) -> Vec<u8> {
        self.b.to_vec()
    }
}

impl Value for ByteView {
    fn len(&self) -> usize {
        self.b.len()
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(bytes: Vec<u8>) -> Self {
        Self { b: Arc::from(bytes) }
    }
}

impl From<&str> for ByteView {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.b))
    }
}

impl fmt::Debug for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteView({:?})", String::from_utf8_lossy(&self.b))
    }
}
