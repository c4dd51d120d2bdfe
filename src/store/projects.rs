use fabrica_api_types::{Project, ProjectDraft, ProjectPatch};
use tracing::warn;
use uuid::Uuid;

use super::{SyncStore, read_through};
use crate::cache::{CacheKey, MutationEffect, Presence, StalenessClass};
use crate::error::ApiError;

/// Cached access to `/projects`.
pub struct ProjectStore<'a> {
    store: &'a SyncStore,
}

impl<'a> ProjectStore<'a> {
    pub(super) fn new(store: &'a SyncStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Project>, ApiError> {
        let store = self.store;
        let key = CacheKey::ProjectList;
        let window = store.window(&key);
        read_through(
            &store.inflight,
            key,
            || store.projects.list(&(), window),
            |value| store.projects.put_list((), value.clone()),
            async { store.client.projects().list().await },
        )
        .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Project, ApiError> {
        let store = self.store;
        let key = CacheKey::ProjectDetail(id);
        let window = store.window(&key);
        read_through(
            &store.inflight,
            key,
            || store.projects.detail(&id, window),
            |value| store.projects.put_detail(value.clone()),
            async { store.client.projects().get(id).await },
        )
        .await
    }

    pub fn cached_list(&self) -> Option<Vec<Project>> {
        self.store.projects.cached_list(&())
    }

    pub async fn create(&self, draft: &ProjectDraft) -> Result<Project, ApiError> {
        let project = self.store.client.projects().create(draft).await?;
        self.store
            .projects
            .apply(&MutationEffect::Created(project.clone()), |_, _| true);
        Ok(project)
    }

    pub async fn update(&self, id: Uuid, patch: &ProjectPatch) -> Result<Project, ApiError> {
        let project = self.store.client.projects().update(id, patch).await?;
        self.store
            .projects
            .apply(&MutationEffect::Updated(project.clone()), |_, _| true);
        Ok(project)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.store.client.projects().delete(id).await?;
        self.store
            .projects
            .apply(&MutationEffect::Deleted(id), |_, _| true);
        Ok(())
    }

    pub async fn exists(&self, id: Uuid) -> Presence {
        let store = self.store;
        let window = store.config.window(StalenessClass::Existence);
        if let Some(presence) = store.projects.existence(&id, window) {
            return presence;
        }
        match store.client.projects().get(id).await {
            Ok(project) => {
                store.projects.put_detail(project);
                store.projects.put_existence(id, Presence::Present);
                Presence::Present
            }
            Err(err) if err.is_not_found() => {
                store.projects.put_existence(id, Presence::Absent);
                Presence::Absent
            }
            Err(err) => {
                warn!(%id, error = %err, "project existence check could not complete");
                Presence::Unknown
            }
        }
    }

    pub fn invalidate(&self) {
        self.store.projects.invalidate();
    }
}
