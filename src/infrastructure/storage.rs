//! Storage for the recency cache.

use crate::application::ports::RecencyStore;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Instant;

/// Thread-safe sharded hostname -> timestamp map backed by DashMap.
///
/// The entry API holds the shard lock for the whole accessor, which makes
/// each cooldown decision atomic per hostname.
#[derive(Debug)]
pub struct ShardedRecencyStore {
    map: DashMap<String, Instant, ahash::RandomState>,
}

impl ShardedRecencyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            map: DashMap::with_hasher(ahash::RandomState::new()),
        }
    }

    /// Record `at` for `hostname`, replacing any previous timestamp.
    pub fn insert(&self, hostname: impl Into<String>, at: Instant) {
        self.map.insert(hostname.into(), at);
    }

    /// Forget `hostname`.
    pub fn remove(&self, hostname: &str) -> Option<Instant> {
        self.map.remove(hostname).map(|(_, at)| at)
    }

    /// Check if `hostname` has an entry.
    pub fn contains(&self, hostname: &str) -> bool {
        self.map.contains_key(hostname)
    }
}

impl Default for ShardedRecencyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecencyStore for ShardedRecencyStore {
    fn with_entry<F, R>(&self, hostname: &str, accessor: F) -> R
    where
        F: FnOnce(&mut Option<Instant>) -> R,
    {
        match self.map.entry(hostname.to_string()) {
            Entry::Occupied(mut occupied) => {
                let mut slot = Some(*occupied.get());
                let result = accessor(&mut slot);
                match slot {
                    Some(at) => {
                        occupied.insert(at);
                    }
                    None => {
                        occupied.remove();
                    }
                }
                result
            }
            Entry::Vacant(vacant) => {
                let mut slot = None;
                let result = accessor(&mut slot);
                if let Some(at) = slot {
                    vacant.insert(at);
                }
                result
            }
        }
    }

    fn get(&self, hostname: &str) -> Option<Instant> {
        self.map.get(hostname).map(|entry| *entry.value())
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn clear(&self) {
        self.map.clear();
    }

    fn retain<F>(&self, mut f: F)
    where
        F: FnMut(&str, Instant) -> bool,
    {
        self.map.retain(|hostname, at| f(hostname, *at));
    }
}

// Implement RecencyStore for Arc<ShardedRecencyStore> so caches can share it
impl RecencyStore for Arc<ShardedRecencyStore> {
    fn with_entry<F, R>(&self, hostname: &str, accessor: F) -> R
    where
        F: FnOnce(&mut Option<Instant>) -> R,
    {
        (**self).with_entry(hostname, accessor)
    }

    fn get(&self, hostname: &str) -> Option<Instant> {
        (**self).get(hostname)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn clear(&self) {
        (**self).clear()
    }

    fn retain<F>(&self, f: F)
    where
        F: FnMut(&str, Instant) -> bool,
    {
        (**self).retain(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_with_entry_inserts_when_slot_filled() {
        let store = ShardedRecencyStore::new();
        let now = Instant::now();

        let seen = store.with_entry("acme.domo.com", |slot| {
            let before = *slot;
            *slot = Some(now);
            before
        });

        assert_eq!(seen, None);
        assert_eq!(store.get("acme.domo.com"), Some(now));
    }

    #[test]
    fn test_with_entry_leaves_vacant_slot_empty() {
        let store = ShardedRecencyStore::new();
        store.with_entry("acme.domo.com", |_slot| ());
        assert!(store.is_empty());
    }

    #[test]
    fn test_with_entry_updates_and_removes() {
        let store = ShardedRecencyStore::new();
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_secs(1);
        store.insert("acme.domo.com", t0);

        store.with_entry("acme.domo.com", |slot| *slot = Some(t1));
        assert_eq!(store.get("acme.domo.com"), Some(t1));

        store.with_entry("acme.domo.com", |slot| *slot = None);
        assert!(!store.contains("acme.domo.com"));
    }

    #[test]
    fn test_retain() {
        let store = ShardedRecencyStore::new();
        let t0 = Instant::now();
        store.insert("old.domo.com", t0);
        store.insert("new.domo.com", t0 + Duration::from_secs(30));

        store.retain(|_hostname, at| at > t0);

        assert_eq!(store.len(), 1);
        assert!(store.contains("new.domo.com"));
    }

    #[test]
    fn test_remove_and_clear() {
        let store = ShardedRecencyStore::new();
        let now = Instant::now();
        store.insert("a.domo.com", now);
        store.insert("b.domo.com", now);

        assert_eq!(store.remove("a.domo.com"), Some(now));
        assert_eq!(store.remove("a.domo.com"), None);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_access() {
        use std::thread;

        let store = Arc::new(ShardedRecencyStore::new());
        let now = Instant::now();
        let mut handles = vec![];

        for i in 0..10 {
            let store_clone = Arc::clone(&store);
            let handle = thread::spawn(move || {
                for j in 0..100 {
                    store_clone.with_entry(&format!("t{i}-{j}.domo.com"), |slot| {
                        *slot = Some(now)
                    });
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 1000);
    }
}
