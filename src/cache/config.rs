//! Cache configuration.
//!
//! Staleness windows per class plus LRU limits for detail and
//! existence entries.

use std::num::NonZeroUsize;
use std::time::Duration;

use serde::Deserialize;

use super::keys::StalenessClass;

const DEFAULT_LIST_DETAIL_TTL_SECS: u64 = 300;
const DEFAULT_TRANSLATION_TTL_SECS: u64 = 600;
const DEFAULT_EXISTENCE_TTL_SECS: u64 = 30;
const DEFAULT_DETAIL_LIMIT: usize = 256;
const DEFAULT_EXISTENCE_LIMIT: usize = 512;

/// Cache configuration, read from `fabrica.toml` / `FABRICA_CACHE__*`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Disabling the cache makes every read fetch.
    pub enabled: bool,
    /// Staleness window for list and detail reads, in seconds.
    pub list_detail_ttl_secs: u64,
    /// Staleness window for bulk translation-map reads, in seconds.
    pub translation_ttl_secs: u64,
    /// Staleness window for existence probes, in seconds.
    pub existence_ttl_secs: u64,
    /// Maximum detail entries kept per resource.
    pub detail_limit: usize,
    /// Maximum existence entries kept per resource.
    pub existence_limit: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            list_detail_ttl_secs: DEFAULT_LIST_DETAIL_TTL_SECS,
            translation_ttl_secs: DEFAULT_TRANSLATION_TTL_SECS,
            existence_ttl_secs: DEFAULT_EXISTENCE_TTL_SECS,
            detail_limit: DEFAULT_DETAIL_LIMIT,
            existence_limit: DEFAULT_EXISTENCE_LIMIT,
        }
    }
}

impl CacheConfig {
    /// The staleness window for a given class. A disabled cache
    /// reports a zero window, so every entry is immediately stale.
    pub fn window(&self, class: StalenessClass) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        let secs = match class {
            StalenessClass::ListDetail => self.list_detail_ttl_secs,
            StalenessClass::Translation => self.translation_ttl_secs,
            StalenessClass::Existence => self.existence_ttl_secs,
        };
        Duration::from_secs(secs)
    }

    pub(crate) fn detail_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.detail_limit).unwrap_or(NonZeroUsize::MIN)
    }

    pub(crate) fn existence_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.existence_limit).unwrap_or(NonZeroUsize::MIN)
    }
}
