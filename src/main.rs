use geecache::{GetterFunc, Group, GroupRegistry, HttpPool};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} --bind <addr:port> [--peer <http://addr:port>]...", args[0]);
        eprintln!("Example: {} --bind 127.0.0.1:8001", args[0]);
        eprintln!(
            "Example: {} --bind 127.0.0.1:8001 --peer http://127.0.0.1:8001 --peer http://127.0.0.1:8002",
            args[0]
        );

        std::process::exit(1);
    }

    let mut bind_addr: Option<SocketAddr> = None;
    let mut peers: Vec<String> = vec![];

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" if i + 1 < args.len() => {
                bind_addr = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--peer" if i + 1 < args.len() => {
                peers.push(args[i + 1].clone());
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let bind_addr = bind_addr.ok_or_else(|| anyhow::anyhow!("--bind is required"))?;
    let self_addr = format!("http://{}", bind_addr);
    if peers.is_empty() {
        peers.push(self_addr.clone());
    }

    // 1. Groups:
    let registry = GroupRegistry::new();
    let group = create_score_group(&registry)?;

    // 2. Peers:
    let pool = HttpPool::new(self_addr.clone(), registry.clone());
    pool.set(peers.clone());
    group.register_peers(pool.clone())?;

    tracing::info!("Node {} with peers {:?}", self_addr, peers);

    // 3. HTTP server:
    let app = pool.router();
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("geecache is running at {}", self_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_score_group(registry: &GroupRegistry) -> anyhow::Result<Arc<Group>> {
    let db: Arc<HashMap<&'static str, &'static str>> =
        Arc::new(HashMap::from([("Tom", "630"), ("Jack", "589"), ("Sam", "567")]));

    let getter = GetterFunc(move |key: String| {
        let db = db.clone();
        async move {
            tracing::info!("[SlowDB] search key {}", key);
            db.get(key.as_str())
                .map(|v| v.as_bytes().to_vec())
                .ok_or_else(|| anyhow::anyhow!("key {} not exist", key))
        }
    });

    let group = Group::builder("score")
        .cache_bytes(2 << 10)
        .getter(getter)
        .build(registry)?;

    Ok(group)
}
