use std::collections::{HashMap, HashSet};

/// Hash function used to place keys and virtual points on the ring.
pub type HashFn = fn(&[u8]) -> u32;

/// Number of virtual points per peer used when none is configured.
pub const DEFAULT_REPLICAS: usize = 50;

fn crc32_ieee(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

pub struct HashRing {
    hash: HashFn,
    replicas: usize,
    /// Sorted virtual points.
    points: Vec<u32>,
    owners: HashMap<u32, String>,
    nodes: HashSet<String>,
}

impl HashRing {
    /// Creates an empty ring. `hash` defaults to CRC-32 (IEEE).
    ///
    /// # Panics
    /// If `replicas` is zero.
    pub fn new(replicas: usize, hash: Option<HashFn>) -> Self {
        assert!(replicas > 0, "hash ring needs at least one replica per node");
        Self {
            hash: hash.unwrap_or(crc32_ieee),
            replicas,
            points: Vec::new(),
            owners: HashMap::new(),
            nodes: HashSet::new(),
        }
    }

    /// Places every node on the ring `replicas` times.
    ///
    /// Nodes that are already present are skipped, so calling `add` twice with the same
    /// node does not skew the distribution towards it.
    pub fn add<I, S>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for node in nodes {
            let node = node.as_ref();
            if !self.nodes.insert(node.to_string()) {
                tracing::debug!("Node {} already on the ring, skipping", node);
                continue;
            }
            for i in 0..self.replicas {
                let point = (self.hash)(format!("{}{}", node, i).as_bytes());
                self.points.push(point);
                self.owners.insert(point, node.to_string());
            }
        }
        self.points.sort_unstable();
    }

    /// Returns the node owning `key`, or `None` if the ring is empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        if self.points.is_empty() {
            return None;
        }
        let hash = (self.hash)(key.as_bytes());
        let idx = self.points.partition_point(|&point| point < hash);
        let point = self.points[idx % self.points.len()];
        self.owners.get(&point).map(String::as_str)
    }

    /// Number of distinct nodes on the ring.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }

    pub fn contains(&self, node: &str) -> bool {
        self.nodes.contains(node)
    }

    pub fn nodes(&self) -> Vec<String> {
        let mut nodes: Vec<String> = self.nodes.iter().cloned().collect();
        nodes.sort();
        nodes
    }
}

impl Default for HashRing {
    fn default() -> Self {
        Self::new(DEFAULT_REPLICAS, None)
    }
}
