use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use distributed_cache::group::{self, Group, GetterFn, StatsSnapshot};
use distributed_cache::peers::pool::HttpPool;
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "cache-node")]
#[command(about = "Peer-to-peer distributed cache node")]
struct Args {
    /// Address to bind and advertise
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port serving peer requests
    #[arg(short, long, default_value_t = 8001)]
    port: u16,

    /// Base URL of a cluster member, this node included (repeatable)
    #[arg(long = "peer")]
    peers: Vec<String>,

    /// Also serve the front-end API
    #[arg(long)]
    api: bool,

    /// Port of the front-end API
    #[arg(long, default_value_t = 9999)]
    api_port: u16,

    /// Byte budget of the local cache
    #[arg(long, default_value_t = 2 << 10)]
    cache_bytes: usize,
}

#[derive(Deserialize)]
struct ApiQuery {
    key: String,
}

async fn handle_api_get(
    Extension(scores): Extension<Arc<Group>>,
    Query(query): Query<ApiQuery>,
) -> Response {
    match scores.get(&query.key).await {
        Ok(view) => (
            [(header::CONTENT_TYPE, "application/octet-stream")],
            view.bytes(),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("API get {} failed: {}", query.key, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn handle_api_stats(Extension(scores): Extension<Arc<Group>>) -> Json<StatsSnapshot> {
    Json(scores.stats())
}

fn slow_db() -> HashMap<&'static str, &'static str> {
    HashMap::from([("Tom", "630"), ("Jack", "589"), ("Sam", "567")])
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        // .with_max_level(tracing::Level::DEBUG)
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    let self_addr = format!("http://{}:{}", args.host, args.port);
    let peers = if args.peers.is_empty() {
        vec![self_addr.clone()]
    } else {
        args.peers.clone()
    };

    tracing::info!("Starting cache node {}", self_addr);
    tracing::info!("Peers: {:?}", peers);

    // 1. Group backed by the slow database:
    let db = Arc::new(slow_db());
    let scores = group::new_group(
        "scores",
        args.cache_bytes,
        GetterFn(move |key: String| {
            let db = db.clone();
            async move {
                tracing::info!("[SlowDB] search key {}", key);
                tokio::time::sleep(Duration::from_millis(100)).await;
                match db.get(key.as_str()) {
                    Some(value) => Ok(value.as_bytes().to_vec()),
                    None => Err(anyhow::anyhow!("{} not exist", key)),
                }
            }
        }),
    );

    // 2. Peer pool:
    let pool = HttpPool::new(&self_addr);
    pool.set_peers(&peers);
    scores.register_peers(pool.clone());

    // 3. Front-end API:
    if args.api {
        let api = Router::new()
            .route("/api", get(handle_api_get))
            .route("/api/stats", get(handle_api_stats))
            .layer(Extension(scores.clone()));

        let api_addr: SocketAddr = format!("{}:{}", args.host, args.api_port).parse()?;
        let listener = tokio::net::TcpListener::bind(api_addr).await?;
        tracing::info!("API server listening on {}", api_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, api).await {
                tracing::error!("API server failed: {}", e);
            }
        });
    }

    // 4. Spawn stats reporter:
    let stats_group = scores.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30));

        loop {
            interval.tick().await;
            let stats = stats_group.stats();
            tracing::info!(
                "Group {} stats: gets={} hits={} loads={} deduped={} peer={} peer_errors={} local={} local_errors={}",
                stats.group,
                stats.gets,
                stats.cache_hits,
                stats.loads,
                stats.loads_deduped,
                stats.peer_loads,
                stats.peer_errors,
                stats.local_loads,
                stats.local_load_errs
            );
            tracing::info!(
                "  - cache: {} entries, {} bytes",
                stats.cache_entries,
                stats.cache_bytes
            );
        }
    });

    // 5. Peer server:
    let app = pool.router(group::global());
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    tracing::info!("Peer server listening on {}", addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
