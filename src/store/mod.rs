//! Read-through resource stores.
//!
//! [`SyncStore`] is the constructed front door to cached data access:
//! it owns the HTTP client, one cache per resource, and the in-flight
//! registry. It is deliberately not a module-level singleton; tests
//! and embedders build as many isolated instances as they need and
//! drop them when done.
//!
//! Every mutation patches the caches before its future resolves, so a
//! read issued after a mutation completes observes the mutation's
//! effect on this instance without a network round-trip. Nothing is
//! shared across instances.

mod blogs;
mod locales;
mod production_lines;
mod projects;

pub use blogs::BlogStore;
pub use locales::LocaleStore;
pub use production_lines::ProductionLineStore;
pub use projects::ProjectStore;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use fabrica_api_types::{Blog, Language, LocaleEntry, ProductionLine, Project};

use crate::cache::{
    CacheConfig, CacheKey, InflightRegistry, LineScope, ResourceCache, TranslationCache,
};
use crate::client::ApiClient;
use crate::error::ApiError;

pub struct SyncStore {
    client: Arc<ApiClient>,
    config: CacheConfig,
    inflight: InflightRegistry,
    blogs: ResourceCache<(), Blog>,
    projects: ResourceCache<(), Project>,
    production_lines: ResourceCache<LineScope, ProductionLine>,
    locales: ResourceCache<Option<Language>, LocaleEntry>,
    translations: TranslationCache,
}

impl SyncStore {
    pub fn new(client: Arc<ApiClient>, config: CacheConfig) -> Self {
        Self {
            client,
            inflight: InflightRegistry::new(),
            blogs: ResourceCache::new("blogs", &config),
            projects: ResourceCache::new("projects", &config),
            production_lines: ResourceCache::new("production-lines", &config),
            locales: ResourceCache::new("locales", &config),
            translations: TranslationCache::new(),
            config,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn blogs(&self) -> BlogStore<'_> {
        BlogStore::new(self)
    }

    pub fn projects(&self) -> ProjectStore<'_> {
        ProjectStore::new(self)
    }

    pub fn production_lines(&self) -> ProductionLineStore<'_> {
        ProductionLineStore::new(self)
    }

    pub fn locales(&self) -> LocaleStore<'_> {
        LocaleStore::new(self)
    }

    /// Force every next read to revalidate, keeping stale values
    /// available for fallbacks.
    pub fn invalidate_all(&self) {
        self.blogs.invalidate();
        self.projects.invalidate();
        self.production_lines.invalidate();
        self.locales.invalidate();
        self.translations.invalidate();
    }

    /// Drop all cached data.
    pub fn clear(&self) {
        self.blogs.clear();
        self.projects.clear();
        self.production_lines.clear();
        self.locales.clear();
        self.translations.clear();
    }

    pub(crate) fn window(&self, key: &CacheKey) -> Duration {
        self.config.window(key.staleness_class())
    }
}

/// The read-through protocol shared by every store.
///
/// Fresh entry: served without I/O. Otherwise the key's gate is
/// acquired; a caller admitted after a concurrent fetch finds the
/// fresh entry on its second probe and issues no call of its own. A
/// failed fetch leaves any existing entry untouched.
pub(crate) async fn read_through<T, L, P, Fut>(
    inflight: &InflightRegistry,
    key: CacheKey,
    lookup: L,
    put: P,
    fetch: Fut,
) -> Result<T, ApiError>
where
    T: Clone,
    L: Fn() -> crate::cache::CacheHit<T>,
    P: FnOnce(&T),
    Fut: Future<Output = Result<T, ApiError>>,
{
    let resource = key.resource();
    if let Some(value) = lookup().fresh() {
        metrics::counter!("fabrica_cache_hit_total", "resource" => resource).increment(1);
        return Ok(value);
    }

    let gate = inflight.gate(&key);
    let guard = gate.lock().await;

    // A concurrent caller may have finished the fetch while we queued.
    if let Some(value) = lookup().fresh() {
        drop(guard);
        inflight.release(&key);
        metrics::counter!("fabrica_cache_coalesced_total", "resource" => resource).increment(1);
        return Ok(value);
    }

    metrics::counter!("fabrica_cache_miss_total", "resource" => resource).increment(1);
    let outcome = fetch.await;
    if let Ok(value) = &outcome {
        put(value);
    }
    drop(guard);
    inflight.release(&key);
    outcome
}
