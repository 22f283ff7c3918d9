use std::collections::{HashMap, HashSet};

/// Maps a byte string to a position on the ring.
pub type HashFn = fn(&[u8]) -> u32;

pub struct HashRing {
    hash: HashFn,
    replicas: usize,
    /// Sorted virtual node hashes.
    keys: Vec<u32>,
    owners: HashMap<u32, String>,
    nodes: HashSet<String>,
}

impl HashRing {
    /// Creates an empty ring. Without a hash function, CRC-32 (IEEE) is used.
    pub fn new(replicas: usize, hash: Option<HashFn>) -> Self {
        Self {
            hash: hash.unwrap_or(crc32fast::hash),
            replicas,
            keys: Vec::new(),
            owners: HashMap::new(),
            nodes: HashSet::new(),
        }
    }

    /// Registers nodes. Additive: nodes from earlier calls stay on the ring, and a node that is
    /// already registered is skipped so it never gains extra virtual nodes.
    pub fn add<I, S>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for node in nodes {
            let node = node.as_ref();
            if !self.nodes.insert(node.to_string()) {
                continue;
            }
            for i in 0..self.replicas {
                let hash = (self.hash)(format!("{}{}", i, node).as_bytes());
                self.owners.insert(hash, node.to_string());
                self.keys.push(hash);
            }
        }
        self.keys.sort_unstable();
    }

    /// Returns the node owning `key`, or `None` when the ring is empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        if self.keys.is_empty() {
            return None;
        }

        let hash = (self.hash)(key.as_bytes());
        let idx = self.keys.partition_point(|&k| k < hash);
        let virtual_hash = self.keys[idx % self.keys.len()];

        self.owners.get(&virtual_hash).map(String::as_str)
    }

    /// Number of virtual nodes on the ring.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of distinct real nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }
}

impl std::fmt::Debug for HashRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashRing")
            .field("replicas", &self.replicas)
            .field("virtual_nodes", &self.keys.len())
            .finish()
    }
}
