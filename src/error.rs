//! Error types shared across the cache.
//!
//! Loader failures keep the caller's `anyhow::Error` intact as the source; peer failures are
//! recovered inside `Group::get` and never reach its caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    /// A group was built without a source loader.
    #[error("group {0:?} has no getter")]
    MissingGetter(String),

    /// `register_peers` was called more than once on the same group.
    #[error("peers already registered for group {0:?}")]
    PeersAlreadyRegistered(String),

    /// The source loader could not produce a value.
    #[error("{source}")]
    Load {
        key: String,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Debug, Error)]
pub enum PeerError {
    #[error("peer request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned: {0}")]
    Status(u16),

    #[error("reading response body: {0}")]
    Body(#[source] reqwest::Error),
}
