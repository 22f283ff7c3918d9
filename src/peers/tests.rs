//! Peer Module Tests
//!
//! Runs real nodes on loopback: each test binds `127.0.0.1:0`, serves the pool's router with
//! `axum::serve`, and talks to it with `reqwest` or through another node.
//!
//! ## Test Scopes
//! - **Server**: status codes and body for the wire protocol.
//! - **Client**: `HttpGetter` against a live node, including escaping and error statuses.
//! - **Picking**: ring ownership, self exclusion and atomic peer set replacement.
//! - **Cluster**: two nodes splitting keys, and fallback when the owner is down.

#[cfg(test)]
mod tests {
    use crate::consistenthash::HashRing;
    use crate::error::{CacheError, PeerError};
    use crate::group::{GetterFunc, Group, GroupRegistry};
    use crate::peers::protocol::{DEFAULT_BASE_PATH, DEFAULT_REPLICAS};
    use crate::peers::{HttpGetter, HttpPool, PeerGetter, PeerPicker, PoolOptions};
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    type Counts = Arc<Mutex<HashMap<String, usize>>>;

    struct TestNode {
        addr: String,
        pool: Arc<HttpPool>,
        group: Arc<Group>,
        loads: Counts,
    }

    impl TestNode {
        fn loads(&self, key: &str) -> usize {
            self.loads.lock().get(key).copied().unwrap_or(0)
        }
    }

    /// Starts a node serving the "score" group. Keys ending in "!" make the loader fail; any
    /// other key `k` loads as `"<k>@<node addr>"`, except the fixed table entries.
    async fn spawn_node(options: PoolOptions) -> TestNode {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = format!("http://{}", listener.local_addr().unwrap());

        let registry = GroupRegistry::new();
        let loads = Counts::default();
        let getter = {
            let loads = loads.clone();
            let addr = addr.clone();
            GetterFunc(move |key: String| {
                let loads = loads.clone();
                let addr = addr.clone();
                async move {
                    *loads.lock().entry(key.clone()).or_insert(0) += 1;
                    match key.as_str() {
                        "Tom" => Ok(b"630".to_vec()),
                        k if k.ends_with('!') => Err(anyhow::anyhow!("key {} not exist", k)),
                        k => Ok(format!("{}@{}", k, addr).into_bytes()),
                    }
                }
            })
        };
        let group = Group::builder("score")
            .cache_bytes(2048)
            .getter(getter)
            .build(&registry)
            .unwrap();

        let pool = HttpPool::with_options(addr.clone(), registry, options);
        group.register_peers(pool.clone()).unwrap();

        let app = pool.router();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestNode {
            addr,
            pool,
            group,
            loads,
        }
    }

    /// Finds a key the ring assigns to `owner` among `peers`.
    fn key_owned_by(peers: &[String], owner: &str) -> String {
        let mut ring = HashRing::new(DEFAULT_REPLICAS, None);
        ring.add(peers);
        (0..10_000)
            .map(|i| format!("key-{}", i))
            .find(|key| ring.get(key) == Some(owner))
            .expect("some key should land on every peer")
    }

    // ============================================================
    // SERVER
    // ============================================================

    #[tokio::test]
    async fn test_serve_known_group_and_key() {
        let node = spawn_node(PoolOptions::default()).await;

        let url = format!("{}{}score/Tom", node.addr, DEFAULT_BASE_PATH);
        let response = reqwest::get(url).await.unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "application/octet-stream"
        );
        assert_eq!(response.bytes().await.unwrap().as_ref(), b"630");
        assert_eq!(node.loads("Tom"), 1);
    }

    #[tokio::test]
    async fn test_serve_unknown_group_is_404() {
        let node = spawn_node(PoolOptions::default()).await;

        let url = format!("{}{}unknown/Tom", node.addr, DEFAULT_BASE_PATH);
        let response = reqwest::get(url).await.unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
        assert_eq!(node.loads("Tom"), 0);
    }

    #[tokio::test]
    async fn test_serve_malformed_path_is_400() {
        let node = spawn_node(PoolOptions::default()).await;

        for path in ["score", "score/"] {
            let url = format!("{}{}{}", node.addr, DEFAULT_BASE_PATH, path);
            let response = reqwest::get(url).await.unwrap();
            assert_eq!(
                response.status(),
                reqwest::StatusCode::BAD_REQUEST,
                "path {:?}",
                path
            );
        }
    }

    #[tokio::test]
    async fn test_serve_loader_failure_is_500() {
        let node = spawn_node(PoolOptions::default()).await;

        let url = format!("{}{}score/ghost!", node.addr, DEFAULT_BASE_PATH);
        let response = reqwest::get(url).await.unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.text().await.unwrap().contains("not exist"));
    }

    #[tokio::test]
    async fn test_custom_base_path() {
        let options = PoolOptions {
            base_path: "peer-cache".to_string(),
            ..PoolOptions::default()
        };
        let node = spawn_node(options).await;
        assert_eq!(node.pool.base_path(), "/peer-cache/");

        let ok = reqwest::get(format!("{}/peer-cache/score/Tom", node.addr))
            .await
            .unwrap();
        assert_eq!(ok.status(), reqwest::StatusCode::OK);

        let other = reqwest::get(format!("{}{}score/Tom", node.addr, DEFAULT_BASE_PATH))
            .await
            .unwrap();
        assert_eq!(other.status(), reqwest::StatusCode::NOT_FOUND);
    }

    // ============================================================
    // CLIENT
    // ============================================================

    #[tokio::test]
    async fn test_http_getter_fetches_escaped_key() {
        let node = spawn_node(PoolOptions::default()).await;
        let getter = HttpGetter::new(
            format!("{}{}", node.addr, DEFAULT_BASE_PATH),
            reqwest::Client::new(),
            None,
        );

        let key = "a b/c?d";
        let bytes = getter.get("score", key).await.unwrap();
        assert_eq!(bytes, format!("{}@{}", key, node.addr).into_bytes());
        assert_eq!(node.loads(key), 1);
    }

    #[tokio::test]
    async fn test_http_getter_non_200_is_error() {
        let node = spawn_node(PoolOptions::default()).await;
        let getter = HttpGetter::new(
            format!("{}{}", node.addr, DEFAULT_BASE_PATH),
            reqwest::Client::new(),
            None,
        );

        let err = getter.get("missing-group", "Tom").await.unwrap_err();
        assert!(matches!(err, PeerError::Status(404)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_http_getter_unreachable_peer_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let getter = HttpGetter::new(
            format!("http://{}{}", addr, DEFAULT_BASE_PATH),
            reqwest::Client::new(),
            None,
        );
        let err = getter.get("score", "Tom").await.unwrap_err();
        assert!(matches!(err, PeerError::Transport(_)), "got {:?}", err);
    }

    // ============================================================
    // PEER PICKING
    // ============================================================

    #[test]
    fn test_pick_peer_without_peers_is_none() {
        let pool = HttpPool::new("http://127.0.0.1:8001", GroupRegistry::new());
        assert!(pool.pick_peer("Tom").is_none());
    }

    #[test]
    fn test_pick_peer_never_returns_self() {
        let self_addr = "http://127.0.0.1:8001";
        let pool = HttpPool::new(self_addr, GroupRegistry::new());

        pool.set([self_addr]);
        for i in 0..200 {
            assert!(pool.pick_peer(&format!("key-{}", i)).is_none());
        }
    }

    #[test]
    fn test_pick_peer_follows_ring() {
        let self_addr = "http://127.0.0.1:8001".to_string();
        let other = "http://127.0.0.1:8002".to_string();
        let peers = vec![self_addr.clone(), other.clone()];
        let pool = HttpPool::new(self_addr.clone(), GroupRegistry::new());
        pool.set(peers.clone());

        let remote_key = key_owned_by(&peers, &other);
        let local_key = key_owned_by(&peers, &self_addr);

        assert!(pool.pick_peer(&remote_key).is_some());
        assert!(pool.pick_peer(&local_key).is_none());
        assert_eq!(pool.peers(), peers);
    }

    #[test]
    fn test_set_replaces_whole_peer_set() {
        let self_addr = "http://127.0.0.1:8001";
        let pool = HttpPool::new(self_addr, GroupRegistry::new());

        pool.set([self_addr, "http://127.0.0.1:8002"]);
        pool.set([self_addr]);

        assert_eq!(pool.peers(), vec![self_addr.to_string()]);
        for i in 0..200 {
            assert!(
                pool.pick_peer(&format!("key-{}", i)).is_none(),
                "Dropped peers must not be picked"
            );
        }
    }

    // ============================================================
    // CLUSTER
    // ============================================================

    #[tokio::test]
    async fn test_two_nodes_split_keys() {
        let a = spawn_node(PoolOptions::default()).await;
        let b = spawn_node(PoolOptions::default()).await;
        let peers = vec![a.addr.clone(), b.addr.clone()];
        a.pool.set(peers.clone());
        b.pool.set(peers.clone());

        // A key owned by B, requested on A: B loads and caches it, A only relays.
        let key = key_owned_by(&peers, &b.addr);
        let value = a.group.get(&key).await.unwrap();
        assert_eq!(value.to_string(), format!("{}@{}", key, b.addr));
        assert_eq!(a.loads(&key), 0);
        assert_eq!(b.loads(&key), 1);
        assert_eq!(a.group.cached_len(), 0);
        assert_eq!(b.group.cached_len(), 1);

        // Asking again goes back to B, which now answers from its cache.
        a.group.get(&key).await.unwrap();
        assert_eq!(b.loads(&key), 1);

        // A key owned by A stays on A.
        let local = key_owned_by(&peers, &a.addr);
        let value = a.group.get(&local).await.unwrap();
        assert_eq!(value.to_string(), format!("{}@{}", local, a.addr));
        assert_eq!(a.loads(&local), 1);
        assert_eq!(b.loads(&local), 0);
    }

    #[tokio::test]
    async fn test_owner_load_failure_falls_back_locally() {
        let a = spawn_node(PoolOptions::default()).await;
        let b = spawn_node(PoolOptions::default()).await;
        let peers = vec![a.addr.clone(), b.addr.clone()];
        a.pool.set(peers.clone());
        b.pool.set(peers.clone());

        // B answers 500 for keys ending in "!"; A then runs its own loader, which fails too.
        let mut ring = HashRing::new(DEFAULT_REPLICAS, None);
        ring.add(&peers);
        let key = (0..10_000)
            .map(|i| format!("bad-{}!", i))
            .find(|key| ring.get(key) == Some(b.addr.as_str()))
            .unwrap();

        let err = a.group.get(&key).await.unwrap_err();
        assert!(matches!(err, CacheError::Load { .. }));
        assert_eq!(b.loads(&key), 1);
        assert_eq!(a.loads(&key), 1);
    }

    #[tokio::test]
    async fn test_unreachable_owner_falls_back_to_local_loader() {
        let a = spawn_node(PoolOptions::default()).await;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let dead = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let peers = vec![a.addr.clone(), dead.clone()];
        a.pool.set(peers.clone());

        let key = key_owned_by(&peers, &dead);
        let value = a.group.get(&key).await.expect("fallback should hide the peer failure");
        assert_eq!(value.to_string(), format!("{}@{}", key, a.addr));
        assert_eq!(a.loads(&key), 1);
        assert_eq!(a.group.cached_len(), 1);
    }
}
