use super::byteview::ByteView;
use super::cache::MainCache;
use super::getter::Getter;
use super::registry::GroupRegistry;
use crate::error::CacheError;
use crate::peers::{PeerGetter, PeerPicker};

use std::sync::{Arc, OnceLock};

/// A named cache namespace.
pub struct Group {
    name: String,
    main_cache: MainCache,
    getter: Arc<dyn Getter>,
    peers: OnceLock<Arc<dyn PeerPicker>>,
}

/// Collects the settings for a [`Group`]; `build` validates them and registers the group.
pub struct GroupBuilder {
    name: String,
    cache_bytes: u64,
    getter: Option<Arc<dyn Getter>>,
}

impl GroupBuilder {
    /// Byte budget of the group's store (`0` = unbounded). Fixed once built.
    pub fn cache_bytes(mut self, cache_bytes: u64) -> Self {
        self.cache_bytes = cache_bytes;
        self
    }

    pub fn getter<G: Getter + 'static>(mut self, getter: G) -> Self {
        self.getter = Some(Arc::new(getter));
        self
    }

    pub fn getter_arc(mut self, getter: Arc<dyn Getter>) -> Self {
        self.getter = Some(getter);
        self
    }

    /// Builds the group and registers it in `registry`, replacing any group of the same name.
    ///
    /// # Errors
    /// [`CacheError::MissingGetter`] if no getter was supplied.
    pub fn build(self, registry: &GroupRegistry) -> Result<Arc<Group>, CacheError> {
        let getter = self
            .getter
            .ok_or_else(|| CacheError::MissingGetter(self.name.clone()))?;

        let group = Arc::new(Group {
            name: self.name,
            main_cache: MainCache::new(self.cache_bytes),
            getter,
            peers: OnceLock::new(),
        });
        registry.register(group.clone());

        Ok(group)
    }
}

impl Group {
    pub fn builder(name: impl Into<String>) -> GroupBuilder {
        GroupBuilder {
            name: name.into(),
            cache_bytes: 0,
            getter: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wires in the peer picker used on local misses. Can be set once.
    pub fn register_peers(&self, peers: Arc<dyn PeerPicker>) -> Result<(), CacheError> {
        self.peers
            .set(peers)
            .map_err(|_| CacheError::PeersAlreadyRegistered(self.name.clone()))
    }

    /// Returns the value for `key`: local store, then the owning peer, then the source loader.
    ///
    /// Peer failures are logged and absorbed; only a loader failure reaches the caller.
    pub async fn get(&self, key: &str) -> Result<ByteView, CacheError> {
        if let Some(value) = self.main_cache.get(key) {
            tracing::debug!("[{}] cache hit for {:?}", self.name, key);
            return Ok(value);
        }

        self.load(key).await
    }

    async fn load(&self, key: &str) -> Result<ByteView, CacheError> {
        if let Some(peers) = self.peers.get() {
            if let Some(peer) = peers.pick_peer(key) {
                match self.get_from_peer(peer.as_ref(), key).await {
                    Ok(value) => return Ok(value),
                    Err(e) => {
                        tracing::warn!(
                            "[{}] failed to get {:?} from peer, loading locally: {}",
                            self.name,
                            key,
                            e
                        );
                    }
                }
            }
        }

        self.get_locally(key).await
    }

    /// Remote values are not cached: only the owning node keeps a copy.
    async fn get_from_peer(
        &self,
        peer: &dyn PeerGetter,
        key: &str,
    ) -> Result<ByteView, crate::error::PeerError> {
        let bytes = peer.get(&self.name, key).await?;
        Ok(ByteView::from(bytes))
    }

    async fn get_locally(&self, key: &str) -> Result<ByteView, CacheError> {
        tracing::debug!("[{}] loading {:?} from source", self.name, key);

        let bytes = self
            .getter
            .get(key)
            .await
            .map_err(|source| CacheError::Load {
                key: key.to_string(),
                source,
            })?;

        let value = ByteView::from(bytes);
        self.populate_cache(key, value.clone());
        Ok(value)
    }

    fn populate_cache(&self, key: &str, value: ByteView) {
        self.main_cache.add(key, value);
    }

    /// Number of entries held in this node's store.
    pub fn cached_len(&self) -> usize {
        self.main_cache.len()
    }

    /// Bytes accounted in this node's store.
    pub fn cached_bytes(&self) -> u64 {
        self.main_cache.bytes()
    }
}

impl std::fmt::Debug for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("cached_len", &self.main_cache.len())
            .field("has_peers", &self.peers.get().is_some())
            .finish()
    }
}
