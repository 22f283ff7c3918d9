//! Peer Routing & Protocol
//!
//! Lets a set of nodes split the key space between them.
//!
//! ## Core Concepts
//! - **Picking**: `PeerPicker` names the node that owns a key. `HttpPool` answers with a
//!   consistent hash ring over the configured peer addresses; it returns nothing when the ring is
//!   empty or when this node is the owner.
//! - **Fetching**: `PeerGetter` asks a remote node for `(group, key)`. `HttpGetter` issues
//!   `GET <peer><base_path><group>/<key>` and returns the raw body.
//! - **Serving**: `handlers::handle_peer_get` answers those requests from the local `GroupRegistry`.
//! - **Topology**: `HttpPool::set` swaps the whole peer set (ring and clients) in one step.

pub mod client;
pub mod handlers;
pub mod pool;
pub mod protocol;
pub mod types;

pub use client::HttpGetter;
pub use pool::{HttpPool, PoolOptions};
pub use types::{PeerGetter, PeerPicker};

#[cfg(test)]
mod tests;
