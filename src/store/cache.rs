//! Read-through cache for Class lookups.
//!
//! Class entities are read far more often than they change (every
//! `object_classes` filter and taxonomy check resolves them), so the store
//! routes lookups through this cache. Writers invalidate on mutation; the
//! cache is injected into the store rather than living as a module-global.

use dashmap::DashMap;

use crate::thing::{Class, ThingId};

/// Concurrent read-through cache: class ID → class entity.
pub struct ClassCache {
    entries: DashMap<ThingId, Class>,
}

impl ClassCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Return the cached class, or load and cache it through `loader`.
    ///
    /// A `None` from the loader is not cached; absent classes stay cheap to
    /// re-probe and cannot go stale.
    pub fn get_or_load(
        &self,
        id: &ThingId,
        loader: impl FnOnce() -> Option<Class>,
    ) -> Option<Class> {
        if let Some(hit) = self.entries.get(id) {
            return Some(hit.value().clone());
        }
        let loaded = loader()?;
        self.entries.insert(id.clone(), loaded.clone());
        Some(loaded)
    }

    /// Drop the cached entry for a mutated class.
    pub fn invalidate(&self, id: &ThingId) {
        self.entries.remove(id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ClassCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ClassCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassCache")
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thing::ContributorId;

    fn class(id: &str, label: &str) -> Class {
        Class {
            id: ThingId::from(id),
            label: label.to_owned(),
            uri: None,
            created_by: ContributorId::unknown(),
            created_at: 0,
        }
    }

    #[test]
    fn loads_once_then_serves_from_cache() {
        let cache = ClassCache::new();
        let mut loads = 0;
        let first = cache.get_or_load(&ThingId::from("C1"), || {
            loads += 1;
            Some(class("C1", "one"))
        });
        assert_eq!(first.unwrap().label, "one");

        // Loader returning a different value must not be consulted.
        let second = cache.get_or_load(&ThingId::from("C1"), || {
            loads += 1;
            Some(class("C1", "stale"))
        });
        assert_eq!(second.unwrap().label, "one");
        assert_eq!(loads, 1);
    }

    #[test]
    fn invalidation_forces_reload() {
        let cache = ClassCache::new();
        cache.get_or_load(&ThingId::from("C1"), || Some(class("C1", "old")));
        cache.invalidate(&ThingId::from("C1"));
        let reloaded = cache.get_or_load(&ThingId::from("C1"), || Some(class("C1", "new")));
        assert_eq!(reloaded.unwrap().label, "new");
    }

    #[test]
    fn absent_classes_are_not_cached() {
        let cache = ClassCache::new();
        assert!(cache.get_or_load(&ThingId::from("C9"), || None).is_none());
        assert!(cache.is_empty());
        let loaded = cache.get_or_load(&ThingId::from("C9"), || Some(class("C9", "late")));
        assert!(loaded.is_some());
    }
}
