//! Cache storage.
//!
//! One [`ResourceCache`] per resource type holds detail entries (LRU),
//! per-filter list entries, and existence probes. Entries are
//! timestamped; freshness is judged against the staleness window of
//! the key's class at read time. A failed fetch never overwrites an
//! entry, so stale values survive errors.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use fabrica_api_types::{Language, LocaleEntry};
use lru::LruCache;
use tracing::warn;

use super::config::CacheConfig;
use super::patch::{Identified, MutationEffect, apply_to_list};

// A poisoned lock means a reader or writer panicked mid-operation. The
// cache holds revalidatable data only, so the entry is kept and treated
// like any other stale value instead of propagating the panic.
fn read_recover<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| {
        warn!(access = "read", "cache lock was poisoned, keeping the stored entries");
        poisoned.into_inner()
    })
}

fn write_recover<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| {
        warn!(access = "write", "cache lock was poisoned, keeping the stored entries");
        poisoned.into_inner()
    })
}

/// Result of probing the cache for a key.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheHit<T> {
    /// Entry exists and is inside its staleness window.
    Fresh(T),
    /// Entry exists but must be revalidated before use.
    Stale(T),
    Miss,
}

impl<T> CacheHit<T> {
    pub fn fresh(self) -> Option<T> {
        match self {
            CacheHit::Fresh(value) => Some(value),
            _ => None,
        }
    }

    /// The stored value regardless of freshness.
    pub fn any(self) -> Option<T> {
        match self {
            CacheHit::Fresh(value) | CacheHit::Stale(value) => Some(value),
            CacheHit::Miss => None,
        }
    }
}

/// Tri-state result of an existence check.
///
/// A 404 confirms absence; a transport or server failure confirms
/// nothing, and must not be presented as "absent".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    Absent,
    Unknown,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    fetched_at: Instant,
    invalidated: bool,
}

impl<T: Clone> Entry<T> {
    fn fresh(value: T) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
            invalidated: false,
        }
    }

    fn hit(&self, window: Duration) -> CacheHit<T> {
        if !self.invalidated && self.fetched_at.elapsed() < window {
            CacheHit::Fresh(self.value.clone())
        } else {
            CacheHit::Stale(self.value.clone())
        }
    }
}

/// Cache for one resource type: detail entries, filtered list entries,
/// and existence probes.
pub struct ResourceCache<F, T>
where
    F: Eq + Hash,
    T: Identified + Clone,
{
    resource: &'static str,
    details: RwLock<LruCache<T::Id, Entry<T>>>,
    lists: RwLock<HashMap<F, Entry<Vec<T>>>>,
    existence: RwLock<LruCache<T::Id, Entry<Presence>>>,
}

impl<F, T> ResourceCache<F, T>
where
    F: Eq + Hash,
    T: Identified + Clone,
{
    pub fn new(resource: &'static str, config: &CacheConfig) -> Self {
        Self {
            resource,
            details: RwLock::new(LruCache::new(config.detail_limit_non_zero())),
            lists: RwLock::new(HashMap::new()),
            existence: RwLock::new(LruCache::new(config.existence_limit_non_zero())),
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn detail(&self, id: &T::Id, window: Duration) -> CacheHit<T> {
        write_recover(&self.details)
            .get(id)
            .map_or(CacheHit::Miss, |entry| entry.hit(window))
    }

    pub fn put_detail(&self, value: T) {
        write_recover(&self.details).put(value.identity(), Entry::fresh(value));
    }

    pub fn cached_detail(&self, id: &T::Id) -> Option<T> {
        write_recover(&self.details)
            .get(id)
            .map(|entry| entry.value.clone())
    }

    pub fn list(&self, filter: &F, window: Duration) -> CacheHit<Vec<T>> {
        read_recover(&self.lists)
            .get(filter)
            .map_or(CacheHit::Miss, |entry| entry.hit(window))
    }

    pub fn put_list(&self, filter: F, values: Vec<T>) {
        write_recover(&self.lists).insert(filter, Entry::fresh(values));
    }

    /// The stored list value regardless of freshness, for
    /// stale-on-error consumers.
    pub fn cached_list(&self, filter: &F) -> Option<Vec<T>> {
        read_recover(&self.lists)
            .get(filter)
            .map(|entry| entry.value.clone())
    }

    /// A fresh existence verdict, if one is cached. `Unknown` is never
    /// stored, so a cached verdict is always definite.
    pub fn existence(&self, id: &T::Id, window: Duration) -> Option<Presence> {
        write_recover(&self.existence)
            .get(id)
            .and_then(|entry| entry.hit(window).fresh())
    }

    pub fn put_existence(&self, id: T::Id, presence: Presence) {
        if presence == Presence::Unknown {
            return;
        }
        write_recover(&self.existence).put(id, Entry::fresh(presence));
    }

    /// Apply a mutation effect to every cached view of this resource.
    ///
    /// `membership` decides, per list filter, whether the entity
    /// belongs in that list entry. Runs synchronously; callers invoke
    /// it before reporting the mutation as complete.
    pub fn apply<M>(&self, effect: &MutationEffect<T>, membership: M)
    where
        M: Fn(&F, &T) -> bool,
    {
        match effect {
            MutationEffect::Created(entity) | MutationEffect::Updated(entity) => {
                self.put_detail(entity.clone());
                self.put_existence(entity.identity(), Presence::Present);
            }
            MutationEffect::Deleted(id) => {
                write_recover(&self.details).pop(id);
                self.put_existence(id.clone(), Presence::Absent);
            }
        }

        let mut lists = write_recover(&self.lists);
        for (filter, entry) in lists.iter_mut() {
            let belongs = match effect {
                MutationEffect::Created(entity) | MutationEffect::Updated(entity) => {
                    membership(filter, entity)
                }
                MutationEffect::Deleted(_) => false,
            };
            apply_to_list(&mut entry.value, effect, belongs);
        }
    }

    /// Force the next read of every entry to bypass the staleness
    /// check. Values stay available for stale-on-error fallbacks.
    pub fn invalidate(&self) {
        for (_, entry) in write_recover(&self.details).iter_mut() {
            entry.invalidated = true;
        }
        for entry in write_recover(&self.lists).values_mut() {
            entry.invalidated = true;
        }
        for (_, entry) in write_recover(&self.existence).iter_mut() {
            entry.invalidated = true;
        }
    }

    pub fn clear(&self) {
        write_recover(&self.details).clear();
        write_recover(&self.lists).clear();
        write_recover(&self.existence).clear();
    }
}

/// Per-language flat key→text maps, patched key-wise on locale
/// mutations.
pub struct TranslationCache {
    maps: RwLock<HashMap<Language, Entry<HashMap<String, String>>>>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self {
            maps: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, language: Language, window: Duration) -> CacheHit<HashMap<String, String>> {
        read_recover(&self.maps)
            .get(&language)
            .map_or(CacheHit::Miss, |entry| entry.hit(window))
    }

    pub fn put(&self, language: Language, map: HashMap<String, String>) {
        write_recover(&self.maps).insert(language, Entry::fresh(map));
    }

    pub fn cached(&self, language: Language) -> Option<HashMap<String, String>> {
        read_recover(&self.maps)
            .get(&language)
            .map(|entry| entry.value.clone())
    }

    /// Fold one locale entry into every cached map: languages the
    /// entry has text for gain/overwrite the key, languages it lost
    /// text for drop it.
    pub fn merge(&self, entry: &LocaleEntry) {
        let mut maps = write_recover(&self.maps);
        for language in Language::ALL {
            let Some(cached) = maps.get_mut(&language) else {
                continue;
            };
            match entry.text(language).filter(|text| !text.is_empty()) {
                Some(text) => {
                    cached.value.insert(entry.key.clone(), text.to_string());
                }
                None => {
                    cached.value.remove(&entry.key);
                }
            }
        }
    }

    pub fn remove_key(&self, key: &str) {
        let mut maps = write_recover(&self.maps);
        for cached in maps.values_mut() {
            cached.value.remove(key);
        }
    }

    pub fn invalidate(&self) {
        for entry in write_recover(&self.maps).values_mut() {
            entry.invalidated = true;
        }
    }

    pub fn clear(&self) {
        write_recover(&self.maps).clear();
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}
