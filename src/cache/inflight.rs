//! In-flight fetch de-duplication.
//!
//! Each cache key owns an async gate. A read that misses the cache
//! acquires the gate before fetching; concurrent reads of the same key
//! queue on it, re-probe the cache once admitted, and find the first
//! caller's result instead of issuing a second network call.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use super::keys::CacheKey;

pub(crate) struct InflightRegistry {
    gates: DashMap<CacheKey, Arc<Mutex<()>>>,
}

impl InflightRegistry {
    pub fn new() -> Self {
        Self {
            gates: DashMap::new(),
        }
    }

    /// The gate for `key`, created on first use.
    pub fn gate(&self, key: &CacheKey) -> Arc<Mutex<()>> {
        self.gates
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the gate once no other caller holds it, to keep the
    /// registry bounded by active keys rather than all keys ever seen.
    pub fn release(&self, key: &CacheKey) {
        self.gates
            .remove_if(key, |_, gate| Arc::strong_count(gate) <= 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_key_shares_one_gate() {
        let registry = InflightRegistry::new();
        let a = registry.gate(&CacheKey::BlogList);
        let b = registry.gate(&CacheKey::BlogList);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn different_keys_do_not_contend() {
        let registry = InflightRegistry::new();
        let blogs = registry.gate(&CacheKey::BlogList);
        let projects = registry.gate(&CacheKey::ProjectList);

        let _held = blogs.lock().await;
        // Must not deadlock: the project gate is independent.
        let _other = projects.lock().await;
    }

    #[tokio::test]
    async fn release_drops_idle_gates() {
        let registry = InflightRegistry::new();
        {
            let _gate = registry.gate(&CacheKey::ProjectList);
        }
        registry.release(&CacheKey::ProjectList);
        assert!(registry.gates.is_empty());
    }
}
