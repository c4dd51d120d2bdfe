use fabrica_api_types::{Blog, BlogDraft, BlogPatch};
use tracing::warn;
use uuid::Uuid;

use super::{SyncStore, read_through};
use crate::cache::{CacheKey, MutationEffect, Presence, StalenessClass};
use crate::error::ApiError;

/// Cached access to `/blogs`.
pub struct BlogStore<'a> {
    store: &'a SyncStore,
}

impl<'a> BlogStore<'a> {
    pub(super) fn new(store: &'a SyncStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Blog>, ApiError> {
        let store = self.store;
        let key = CacheKey::BlogList;
        let window = store.window(&key);
        read_through(
            &store.inflight,
            key,
            || store.blogs.list(&(), window),
            |value| store.blogs.put_list((), value.clone()),
            async { store.client.blogs().list().await },
        )
        .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Blog, ApiError> {
        let store = self.store;
        let key = CacheKey::BlogDetail(id);
        let window = store.window(&key);
        read_through(
            &store.inflight,
            key,
            || store.blogs.detail(&id, window),
            |value| store.blogs.put_detail(value.clone()),
            async { store.client.blogs().get(id).await },
        )
        .await
    }

    /// The cached list regardless of freshness, for stale-on-error
    /// fallbacks after a failed [`Self::list`].
    pub fn cached_list(&self) -> Option<Vec<Blog>> {
        self.store.blogs.cached_list(&())
    }

    pub fn cached(&self, id: Uuid) -> Option<Blog> {
        self.store.blogs.cached_detail(&id)
    }

    /// Create a post. A missing or empty slug is derived from the
    /// title before the request goes out; it stays editable
    /// independently afterwards.
    pub async fn create(&self, mut draft: BlogDraft) -> Result<Blog, ApiError> {
        if draft.slug.as_deref().is_none_or(str::is_empty) {
            draft.slug = Some(slug::slugify(&draft.title));
        }
        let blog = self.store.client.blogs().create(&draft).await?;
        self.store
            .blogs
            .apply(&MutationEffect::Created(blog.clone()), |_, _| true);
        Ok(blog)
    }

    pub async fn update(&self, id: Uuid, patch: &BlogPatch) -> Result<Blog, ApiError> {
        let blog = self.store.client.blogs().update(id, patch).await?;
        self.store
            .blogs
            .apply(&MutationEffect::Updated(blog.clone()), |_, _| true);
        Ok(blog)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.store.client.blogs().delete(id).await?;
        self.store
            .blogs
            .apply(&MutationEffect::Deleted(id), |_, _| true);
        Ok(())
    }

    /// Tri-state existence probe, cached for the existence window.
    /// Only definite verdicts are cached; `Unknown` means the check
    /// could not be completed, not that the post is absent.
    pub async fn exists(&self, id: Uuid) -> Presence {
        let store = self.store;
        let window = store.config.window(StalenessClass::Existence);
        if let Some(presence) = store.blogs.existence(&id, window) {
            return presence;
        }
        match store.client.blogs().get(id).await {
            Ok(blog) => {
                store.blogs.put_detail(blog);
                store.blogs.put_existence(id, Presence::Present);
                Presence::Present
            }
            Err(err) if err.is_not_found() => {
                store.blogs.put_existence(id, Presence::Absent);
                Presence::Absent
            }
            Err(err) => {
                warn!(%id, error = %err, "blog existence check could not complete");
                Presence::Unknown
            }
        }
    }

    pub fn invalidate(&self) {
        self.store.blogs.invalidate();
    }
}
