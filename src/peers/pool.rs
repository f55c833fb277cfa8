//! HTTP Peer Pool
//!
//! Owns the peer set of a node. Peer selection goes through a consistent hash ring; every
//! remote peer has one `HttpGetter`, and both are replaced together by `set_peers` so a
//! lookup never sees a ring member without its getter.

use super::client::HttpGetter;
use super::handlers::handle_peer_get;
use super::protocol::route_path;
use super::{PeerGetter, PeerPicker};
use crate::config::PoolConfig;
use crate::group::GroupRegistry;
use crate::hashring::HashRing;

use axum::{Extension, Router, routing::get};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

struct PeerTable {
    ring: HashRing,
    getters: HashMap<String, Arc<HttpGetter>>,
}

pub struct HttpPool {
    /// This node's own address, e.g. `http://10.0.0.1:8001`.
    self_addr: String,
    config: PoolConfig,
    client: reqwest::Client,
    peers: Mutex<PeerTable>,
}

impl HttpPool {
    pub fn new(self_addr: &str) -> Arc<Self> {
        Self::with_config(self_addr, PoolConfig::default())
    }

    pub fn with_config(self_addr: &str, config: PoolConfig) -> Arc<Self> {
        let ring = HashRing::new(config.replicas, config.hash);
        Arc::new(Self {
            self_addr: self_addr.trim_end_matches('/').to_string(),
            config,
            client: reqwest::Client::new(),
            peers: Mutex::new(PeerTable {
                ring,
                getters: HashMap::new(),
            }),
        })
    }

    /// Replaces the peer set. The list should include this node's own address.
    pub fn set_peers<I, S>(&self, peers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let peers: Vec<String> = peers
            .into_iter()
            .map(|peer| peer.as_ref().trim_end_matches('/').to_string())
            .collect();

        let mut ring = HashRing::new(self.config.replicas, self.config.hash);
        ring.add(&peers);

        let getters = peers
            .iter()
            .map(|peer| {
                let getter = HttpGetter::new(
                    format!("{}{}", peer, self.config.base_path),
                    self.client.clone(),
                    self.config.request_timeout,
                );
                (peer.clone(), Arc::new(getter))
            })
            .collect();

        *self.peers.lock() = PeerTable { ring, getters };
        tracing::info!("[{}] Peer set updated: {:?}", self.self_addr, peers);
    }

    /// Current peers, sorted.
    pub fn peers(&self) -> Vec<String> {
        self.peers.lock().ring.nodes()
    }

    pub fn self_addr(&self) -> &str {
        &self.self_addr
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Router serving peer requests for the groups of `registry`.
    pub fn router(self: &Arc<Self>, registry: Arc<GroupRegistry>) -> Router {
        Router::new()
            .route(&route_path(&self.config.base_path), get(handle_peer_get))
            .layer(Extension(self.clone()))
            .layer(Extension(registry))
    }
}

impl PeerPicker for HttpPool {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>> {
        let table = self.peers.lock();
        let peer = table.ring.get(key)?;
        if peer == self.self_addr {
            return None;
        }

        tracing::debug!("[{}] Pick peer {} for {}", self.self_addr, peer, key);
        table
            .getters
            .get(peer)
            .map(|getter| getter.clone() as Arc<dyn PeerGetter>)
    }
}
