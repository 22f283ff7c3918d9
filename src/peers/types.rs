use crate::error::PeerError;

use async_trait::async_trait;
use std::sync::Arc;

/// Locates the node that owns a key.
pub trait PeerPicker: Send + Sync {
    /// Returns a handle to the remote owner of `key`, or `None` when this node should load it
    /// itself (no peers, or this node is the owner).
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>>;
}

/// Fetches a value from one specific peer.
#[async_trait]
pub trait PeerGetter: Send + Sync {
    async fn get(&self, group: &str, key: &str) -> Result<Vec<u8>, PeerError>;
}
