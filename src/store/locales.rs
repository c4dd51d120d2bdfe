use std::collections::HashMap;

use fabrica_api_types::{Language, LocaleDraft, LocaleEntry, LocalePatch};
use tracing::warn;

use super::{SyncStore, read_through};
use crate::cache::{CacheKey, MutationEffect, Presence, StalenessClass};
use crate::error::ApiError;

/// Membership of an entry in a cached list: the unfiltered list holds
/// everything, a per-language list only entries with text in that
/// language.
fn member(filter: &Option<Language>, entry: &LocaleEntry) -> bool {
    filter.is_none_or(|language| entry.has_text(language))
}

/// Cached access to the translation store.
///
/// Locale mutations additionally maintain the per-language flat
/// translation maps: a key is merged into every cached map the entry
/// has text for and dropped from maps it no longer has text for,
/// before the mutation resolves.
pub struct LocaleStore<'a> {
    store: &'a SyncStore,
}

impl<'a> LocaleStore<'a> {
    pub(super) fn new(store: &'a SyncStore) -> Self {
        Self { store }
    }

    pub async fn list(&self, language: Option<Language>) -> Result<Vec<LocaleEntry>, ApiError> {
        let store = self.store;
        let key = CacheKey::LocaleList(language);
        let window = store.window(&key);
        read_through(
            &store.inflight,
            key,
            || store.locales.list(&language, window),
            |value| store.locales.put_list(language, value.clone()),
            async { store.client.locales().list(language).await },
        )
        .await
    }

    pub async fn get(&self, key: &str) -> Result<LocaleEntry, ApiError> {
        let store = self.store;
        let cache_key = CacheKey::LocaleDetail(key.to_string());
        let window = store.window(&cache_key);
        let id = key.to_string();
        read_through(
            &store.inflight,
            cache_key,
            || store.locales.detail(&id, window),
            |value| store.locales.put_detail(value.clone()),
            async { store.client.locales().get(key).await },
        )
        .await
    }

    /// Flat key→text map for one language, cached with the longer
    /// translation window.
    pub async fn translations(
        &self,
        language: Language,
    ) -> Result<HashMap<String, String>, ApiError> {
        let store = self.store;
        let key = CacheKey::TranslationMap(language);
        let window = store.window(&key);
        read_through(
            &store.inflight,
            key,
            || store.translations.get(language, window),
            |value| store.translations.put(language, value.clone()),
            async { store.client.locales().translations(language).await },
        )
        .await
    }

    /// Uncached subset fetch; it exists to avoid over-fetching and has
    /// no list identity worth patching.
    pub async fn by_keys(
        &self,
        keys: &[&str],
        language: Option<Language>,
    ) -> Result<HashMap<String, LocaleEntry>, ApiError> {
        self.store.client.locales().by_keys(keys, language).await
    }

    pub fn cached_list(&self, language: Option<Language>) -> Option<Vec<LocaleEntry>> {
        self.store.locales.cached_list(&language)
    }

    pub fn cached_translations(&self, language: Language) -> Option<HashMap<String, String>> {
        self.store.translations.cached(language)
    }

    pub async fn create(&self, draft: &LocaleDraft) -> Result<LocaleEntry, ApiError> {
        let entry = self.store.client.locales().create(draft).await?;
        self.absorb(MutationEffect::Created(entry.clone()));
        Ok(entry)
    }

    pub async fn create_many(&self, drafts: &[LocaleDraft]) -> Result<Vec<LocaleEntry>, ApiError> {
        let entries = self.store.client.locales().create_many(drafts).await?;
        for entry in &entries {
            self.absorb(MutationEffect::Created(entry.clone()));
        }
        Ok(entries)
    }

    pub async fn update(&self, key: &str, patch: &LocalePatch) -> Result<LocaleEntry, ApiError> {
        let entry = self.store.client.locales().update(key, patch).await?;
        self.absorb(MutationEffect::Updated(entry.clone()));
        Ok(entry)
    }

    pub async fn delete(&self, key: &str) -> Result<(), ApiError> {
        self.store.client.locales().delete(key).await?;
        self.store
            .locales
            .apply(&MutationEffect::Deleted(key.to_string()), member);
        self.store.translations.remove_key(key);
        Ok(())
    }

    pub async fn exists(&self, key: &str) -> Presence {
        let store = self.store;
        let window = store.config.window(StalenessClass::Existence);
        let id = key.to_string();
        if let Some(presence) = store.locales.existence(&id, window) {
            return presence;
        }
        match store.client.locales().get(key).await {
            Ok(entry) => {
                store.locales.put_detail(entry);
                store.locales.put_existence(id, Presence::Present);
                Presence::Present
            }
            Err(err) if err.is_not_found() => {
                store.locales.put_existence(id, Presence::Absent);
                Presence::Absent
            }
            Err(err) => {
                warn!(key, error = %err, "locale existence check could not complete");
                Presence::Unknown
            }
        }
    }

    pub fn invalidate(&self) {
        self.store.locales.invalidate();
        self.store.translations.invalidate();
    }

    /// Patch the list caches and the translation maps for one entry's
    /// mutation. `merge` handles both directions: languages with text
    /// gain the key, languages without lose it.
    fn absorb(&self, effect: MutationEffect<LocaleEntry>) {
        if let MutationEffect::Created(entry) | MutationEffect::Updated(entry) = &effect {
            self.store.translations.merge(entry);
        }
        self.store.locales.apply(&effect, member);
    }
}
