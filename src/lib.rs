//! Peer-Aware Distributed Cache Library
//!
//! Each process keeps byte-bounded in-memory caches, and a set of cooperating processes split the
//! key space so that every key is normally loaded and cached by exactly one owning node. Other
//! nodes fetch it from the owner over HTTP instead of recomputing it.
//!
//! ## Architecture Modules
//! - **`lru`**: The single-threaded, byte-budgeted least-recently-used store.
//! - **`consistenthash`**: The hash ring with virtual nodes that maps keys to owning peers.
//! - **`group`**: Named cache namespaces (`Group`), their source loaders and the `GroupRegistry`.
//!   Implements the get-path: local hit, then owning peer, then local load.
//! - **`peers`**: The peer capabilities (`PeerPicker`, `PeerGetter`) and their HTTP
//!   implementation (`HttpPool` server and router, `HttpGetter` client).
//! - **`error`**: `CacheError` and `PeerError`.

pub mod consistenthash;
pub mod error;
pub mod group;
pub mod lru;
pub mod peers;

pub use error::{CacheError, PeerError};
pub use group::{ByteView, Getter, GetterFunc, Group, GroupRegistry};
pub use peers::{HttpPool, PeerGetter, PeerPicker, PoolOptions};
