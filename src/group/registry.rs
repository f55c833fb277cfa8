//! Group Registry
//!
//! Maps group names to live groups so that the transport layer can route an incoming
//! `(group, key)` request to the right `Group`. A process normally uses the shared
//! [`global`] registry; tests and embedders that run several nodes in one process create
//! their own with [`GroupRegistry::new`].

use super::group::Group;
use super::types::Getter;

use dashmap::DashMap;
use std::sync::{Arc, LazyLock};

static GLOBAL: LazyLock<Arc<GroupRegistry>> = LazyLock::new(GroupRegistry::new);

/// Registry holding the mapping between group names and groups.
pub struct GroupRegistry {
    groups: DashMap<String, Arc<Group>>,
}

impl GroupRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Creates a group and registers it under `name`.
    ///
    /// A group already registered under the same name is replaced.
    pub fn new_group<G>(&self, name: &str, max_bytes: usize, getter: G) -> Arc<Group>
    where
        G: Getter + 'static,
    {
        let group = Arc::new(Group::new(name, max_bytes, Arc::new(getter)));
        if self.groups.insert(name.to_string(), group.clone()).is_some() {
            tracing::warn!("Group {} was already registered, replacing it", name);
        } else {
            tracing::info!("Registered group {} ({} bytes)", name, max_bytes);
        }
        group
    }

    /// Looks up a group by name.
    pub fn get_group(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.get(name).map(|entry| entry.value().clone())
    }

    pub fn group_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl Default for GroupRegistry {
    fn default() -> Self {
        Self {
            groups: DashMap::new(),
        }
    }
}

/// The process-wide registry.
pub fn global() -> Arc<GroupRegistry> {
    GLOBAL.clone()
}

/// Creates a group in the process-wide registry.
pub fn new_group<G>(name: &str, max_bytes: usize, getter: G) -> Arc<Group>
where
    G: Getter + 'static,
{
    GLOBAL.new_group(name, max_bytes, getter)
}

/// Looks up a group in the process-wide registry.
pub fn get_group(name: &str) -> Option<Arc<Group>> {
    GLOBAL.get_group(name)
}
