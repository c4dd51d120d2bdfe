use fabrica_api_types::{ProductionLine, ProductionLineDraft, ProductionLinePatch};
use tracing::warn;
use uuid::Uuid;

use super::{SyncStore, read_through};
use crate::cache::{CacheKey, LineScope, MutationEffect, Presence, StalenessClass};
use crate::error::ApiError;

/// Membership of a line in a cached list entry: the published-only
/// scope drops unpublished lines, everything belongs to the full list.
fn member(scope: &LineScope, line: &ProductionLine) -> bool {
    match scope {
        LineScope::All => true,
        LineScope::Published => line.published,
    }
}

/// Cached access to `/production-lines`.
pub struct ProductionLineStore<'a> {
    store: &'a SyncStore,
}

impl<'a> ProductionLineStore<'a> {
    pub(super) fn new(store: &'a SyncStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<ProductionLine>, ApiError> {
        self.list_scoped(LineScope::All).await
    }

    /// The public catalog view (`GET /production-lines/published`).
    pub async fn published(&self) -> Result<Vec<ProductionLine>, ApiError> {
        self.list_scoped(LineScope::Published).await
    }

    async fn list_scoped(&self, scope: LineScope) -> Result<Vec<ProductionLine>, ApiError> {
        let store = self.store;
        let key = CacheKey::ProductionLineList(scope);
        let window = store.window(&key);
        read_through(
            &store.inflight,
            key,
            || store.production_lines.list(&scope, window),
            |value| store.production_lines.put_list(scope, value.clone()),
            async {
                match scope {
                    LineScope::All => store.client.production_lines().list().await,
                    LineScope::Published => store.client.production_lines().published().await,
                }
            },
        )
        .await
    }

    pub async fn get(&self, id: Uuid) -> Result<ProductionLine, ApiError> {
        let store = self.store;
        let key = CacheKey::ProductionLineDetail(id);
        let window = store.window(&key);
        read_through(
            &store.inflight,
            key,
            || store.production_lines.detail(&id, window),
            |value| store.production_lines.put_detail(value.clone()),
            async { store.client.production_lines().get(id).await },
        )
        .await
    }

    pub fn cached_list(&self, scope: LineScope) -> Option<Vec<ProductionLine>> {
        self.store.production_lines.cached_list(&scope)
    }

    pub async fn create(&self, draft: &ProductionLineDraft) -> Result<ProductionLine, ApiError> {
        let line = self.store.client.production_lines().create(draft).await?;
        self.store
            .production_lines
            .apply(&MutationEffect::Created(line.clone()), member);
        Ok(line)
    }

    /// Update a line. Publishing or unpublishing moves it in or out of
    /// the cached published-only list through the membership rule.
    pub async fn update(
        &self,
        id: Uuid,
        patch: &ProductionLinePatch,
    ) -> Result<ProductionLine, ApiError> {
        let line = self
            .store
            .client
            .production_lines()
            .update(id, patch)
            .await?;
        self.store
            .production_lines
            .apply(&MutationEffect::Updated(line.clone()), member);
        Ok(line)
    }

    pub async fn set_published(&self, id: Uuid, published: bool) -> Result<ProductionLine, ApiError> {
        let patch = ProductionLinePatch {
            published: Some(published),
            ..Default::default()
        };
        self.update(id, &patch).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.store.client.production_lines().delete(id).await?;
        self.store
            .production_lines
            .apply(&MutationEffect::Deleted(id), member);
        Ok(())
    }

    pub async fn exists(&self, id: Uuid) -> Presence {
        let store = self.store;
        let window = store.config.window(StalenessClass::Existence);
        if let Some(presence) = store.production_lines.existence(&id, window) {
            return presence;
        }
        match store.client.production_lines().get(id).await {
            Ok(line) => {
                store.production_lines.put_detail(line);
                store.production_lines.put_existence(id, Presence::Present);
                Presence::Present
            }
            Err(err) if err.is_not_found() => {
                store.production_lines.put_existence(id, Presence::Absent);
                Presence::Absent
            }
            Err(err) => {
                warn!(%id, error = %err, "production-line existence check could not complete");
                Presence::Unknown
            }
        }
    }

    pub fn invalidate(&self) {
        self.store.production_lines.invalidate();
    }
}
