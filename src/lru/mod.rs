//! Byte-Bounded LRU Store
//!
//! A single-threaded, recency-ordered map from string keys to sized values.
//!
//! ## Core Concepts
//! - **Byte accounting**: every live entry costs `key.len() + value.len()` bytes.
//! - **Recency**: both `add` and a successful `get` move an entry to the most-recently-used end.
//! - **Eviction**: after an `add`, least-recently-used entries are dropped until the store fits
//!   its budget again (`max_bytes == 0` disables the budget).
//!
//! The store is not synchronized; `group::cache::MainCache` puts it behind a lock.

pub mod cache;

pub use cache::{Cache, OnEvicted, Value};
