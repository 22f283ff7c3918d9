use super::client::HttpGetter;
use super::handlers::handle_peer_get;
use super::protocol::{DEFAULT_BASE_PATH, DEFAULT_REPLICAS};
use super::types::{PeerGetter, PeerPicker};
use crate::consistenthash::HashRing;
use crate::group::GroupRegistry;

use axum::{Extension, Router, routing::get};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Settings shared by every node of a deployment.
#[derive(Debug, Clone)]
pub struct PoolOptions {
    /// URL prefix of peer requests; normalized to start and end with `/`.
    pub base_path: String,
    /// Virtual nodes per peer on the hash ring.
    pub replicas: usize,
    /// Per-request timeout for outgoing fetches. `None` waits for the peer indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            replicas: DEFAULT_REPLICAS,
            request_timeout: None,
        }
    }
}

#[derive(Default)]
struct PeerState {
    ring: Option<HashRing>,
    getters: HashMap<String, Arc<HttpGetter>>,
}

/// HTTP peer endpoint: picks owners on a hash ring, fetches from them, and serves their requests.
///
/// `self_addr` must be written exactly the way this node appears in the peer list passed to
/// [`HttpPool::set`] (e.g. `http://10.0.0.1:8001`), since ownership is decided by comparing them.
pub struct HttpPool {
    self_addr: String,
    base_path: String,
    replicas: usize,
    request_timeout: Option<Duration>,
    registry: Arc<GroupRegistry>,
    http_client: reqwest::Client,
    state: Mutex<PeerState>,
}

impl HttpPool {
    pub fn new(self_addr: impl Into<String>, registry: Arc<GroupRegistry>) -> Arc<Self> {
        Self::with_options(self_addr, registry, PoolOptions::default())
    }

    pub fn with_options(
        self_addr: impl Into<String>,
        registry: Arc<GroupRegistry>,
        options: PoolOptions,
    ) -> Arc<Self> {
        let cleaned = options.base_path.trim_matches('/');
        let base_path = if cleaned.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", cleaned)
        };

        Arc::new(Self {
            self_addr: self_addr.into(),
            base_path,
            replicas: options.replicas,
            request_timeout: options.request_timeout,
            registry,
            http_client: reqwest::Client::new(),
            state: Mutex::new(PeerState::default()),
        })
    }

    /// Replaces the peer set. The ring and the per-peer clients are rebuilt and swapped in
    /// under one lock, so pickers never observe a half-updated topology.
    pub fn set<I, S>(&self, peers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let peers: Vec<String> = peers.into_iter().map(Into::into).collect();

        let mut ring = HashRing::new(self.replicas, None);
        ring.add(&peers);

        let getters = peers
            .iter()
            .map(|peer| {
                let getter = HttpGetter::new(
                    format!("{}{}", peer.trim_end_matches('/'), self.base_path),
                    self.http_client.clone(),
                    self.request_timeout,
                );
                (peer.clone(), Arc::new(getter))
            })
            .collect();

        let mut state = self.state.lock();
        state.ring = Some(ring);
        state.getters = getters;

        tracing::info!(server = %self.self_addr, "Peer set updated: {} peer(s)", peers.len());
    }

    /// Builds the router serving `<base_path>*` for peer requests.
    pub fn router(self: &Arc<Self>) -> Router {
        Router::new()
            .route(&format!("{}*rest", self.base_path), get(handle_peer_get))
            .layer(Extension(self.clone()))
    }

    pub fn self_addr(&self) -> &str {
        &self.self_addr
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn registry(&self) -> &Arc<GroupRegistry> {
        &self.registry
    }

    /// Addresses of the current peer set, sorted.
    pub fn peers(&self) -> Vec<String> {
        let mut peers: Vec<String> = self.state.lock().getters.keys().cloned().collect();
        peers.sort();
        peers
    }
}

impl PeerPicker for HttpPool {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>> {
        let state = self.state.lock();

        let Some(ring) = state.ring.as_ref() else {
            tracing::debug!(server = %self.self_addr, "No peers configured");
            return None;
        };

        let peer = ring.get(key)?;
        if peer == self.self_addr {
            return None;
        }

        tracing::debug!(server = %self.self_addr, "Pick peer {} for {:?}", peer, key);
        state
            .getters
            .get(peer)
            .map(|getter| getter.clone() as Arc<dyn PeerGetter>)
    }
}
