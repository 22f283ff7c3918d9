//! Group Registry
//!
//! Maps group names to live `Group` instances. Build one per process at start-up and hand it to
//! every group and to the peer server; nothing resets it implicitly.

use super::group::Group;

use dashmap::DashMap;
use std::sync::Arc;

pub struct GroupRegistry {
    groups: DashMap<String, Arc<Group>>,
}

impl GroupRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers `group` under its name, replacing (and returning) any group already there.
    pub fn register(&self, group: Arc<Group>) -> Option<Arc<Group>> {
        let name = group.name().to_string();
        let previous = self.groups.insert(name.clone(), group);

        if previous.is_some() {
            tracing::warn!("Replaced existing group: {}", name);
        } else {
            tracing::info!("Registered group: {}", name);
        }
        previous
    }

    /// Looks up a group by name.
    pub fn get(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.get(name).map(|entry| entry.value().clone())
    }

    /// Returns the names of all registered groups.
    pub fn names(&self) -> Vec<String> {
        self.groups.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for GroupRegistry {
    fn default() -> Self {
        Self {
            groups: DashMap::new(),
        }
    }
}
