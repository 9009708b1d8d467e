//! Recency cache for handled hostnames.
//!
//! The cache remembers when each hostname last produced an alert so a burst
//! of 431 responses yields one notification. Entries are best-effort hints:
//! losing them only means one extra alert.

use crate::application::ports::RecencyStore;
use crate::domain::policy::{CooldownPolicy, PolicyDecision};
use std::time::{Duration, Instant};

/// Cooldown state per hostname.
///
/// Callers inject the current time, so the cache needs no clock of its own.
///
/// This type is generic over the storage implementation. In production, use
/// `Arc<ShardedRecencyStore>`.
#[derive(Debug, Clone)]
pub struct RecencyCache<S>
where
    S: RecencyStore + Clone,
{
    store: S,
    policy: CooldownPolicy,
}

impl<S> RecencyCache<S>
where
    S: RecencyStore + Clone,
{
    /// Create a cache over `store` using `policy`.
    pub fn new(store: S, policy: CooldownPolicy) -> Self {
        Self { store, policy }
    }

    /// Decide whether an event for `hostname` at `now` should be handled.
    ///
    /// On accept the timestamp is recorded; on suppress nothing changes.
    pub fn accept(&self, hostname: &str, now: Instant) -> bool {
        let policy = self.policy;
        self.store.with_entry(hostname, |slot| {
            match policy.decide(*slot, now) {
                PolicyDecision::Accept => {
                    *slot = Some(now);
                    true
                }
                PolicyDecision::Suppress => false,
            }
        })
    }

    /// Remove entries older than twice the cooldown window.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&self, now: Instant) -> usize {
        let policy = self.policy;
        let mut removed = 0;
        self.store.retain(|_hostname, recorded| {
            let keep = !policy.is_expired(recorded, now);
            if !keep {
                removed += 1;
            }
            keep
        });
        if removed > 0 {
            tracing::debug!(removed, remaining = self.store.len(), "swept recency cache");
        }
        removed
    }

    /// When `hostname` was last accepted, if remembered.
    pub fn last_accepted(&self, hostname: &str) -> Option<Instant> {
        self.store.get(hostname)
    }

    /// The cooldown policy.
    pub fn policy(&self) -> &CooldownPolicy {
        &self.policy
    }

    /// How often the cache should be swept.
    pub fn sweep_interval(&self) -> Duration {
        self.policy.retention()
    }

    /// Get the number of remembered hostnames.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Forget every hostname.
    pub fn clear(&self) {
        self.store.clear();
    }
}
