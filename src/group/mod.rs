//! Cache Namespaces
//!
//! A `Group` is an isolated caching domain: one byte-bounded store, one source loader and an
//! optional peer picker.
//!
//! ## Get path
//! 1. **Local hit**: served from the group's `MainCache`, no network and no loader call.
//! 2. **Peer delegation**: on a miss, the peer picker names the owning node. A remote owner is
//!    asked over HTTP; its answer is returned but not cached here.
//! 3. **Local load**: when there is no remote owner or the peer fetch fails, the `Getter` runs
//!    and its result is cached locally.
//!
//! Groups are registered by name in a `GroupRegistry`, which the peer server uses to route
//! inbound requests.
//!
//! Concurrent misses on the same key are not coalesced: each one may invoke the loader.

pub mod byteview;
pub mod cache;
pub mod getter;
pub mod group;
pub mod registry;

pub use byteview::ByteView;
pub use getter::{Getter, GetterFunc};
pub use group::{Group, GroupBuilder};
pub use registry::GroupRegistry;
