use std::collections::HashMap;

use fabrica_api_types::{Language, LocaleDraft, LocaleEntry, LocalePatch};
use reqwest::Method;

use super::{ApiClient, Payload};
use crate::error::{ApiError, Operation};

const RESOURCE: &str = "locales";

/// Client for the translation key→text store.
///
/// Beyond plain CRUD this exposes the bulk variants the dashboard and
/// the i18n loader rely on: a flat per-language translation map and a
/// keyed subset fetch that avoids pulling the whole catalog.
pub struct LocalesClient<'a> {
    api: &'a ApiClient,
}

impl<'a> LocalesClient<'a> {
    pub(super) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `GET /locales`, optionally narrowed to entries that carry text
    /// in `language`.
    pub async fn list(&self, language: Option<Language>) -> Result<Vec<LocaleEntry>, ApiError> {
        let mut query = Vec::new();
        if let Some(language) = language {
            query.push(("lang", language.as_str().to_string()));
        }
        self.api
            .get_json(RESOURCE, Operation::ReadAll, "locales", &query)
            .await
    }

    pub async fn get(&self, key: &str) -> Result<LocaleEntry, ApiError> {
        self.api
            .get_json(RESOURCE, Operation::Read, &format!("locales/{key}"), &[])
            .await
    }

    pub async fn create(&self, draft: &LocaleDraft) -> Result<LocaleEntry, ApiError> {
        let payload = Payload::json(RESOURCE, draft)?;
        self.api
            .send_json(RESOURCE, Operation::Create, Method::POST, "locales", payload)
            .await
    }

    /// `POST /locales/bulk`, used by catalog imports.
    pub async fn create_many(&self, drafts: &[LocaleDraft]) -> Result<Vec<LocaleEntry>, ApiError> {
        let payload = Payload::json(RESOURCE, &drafts)?;
        self.api
            .send_json(
                RESOURCE,
                Operation::Create,
                Method::POST,
                "locales/bulk",
                payload,
            )
            .await
    }

    pub async fn update(&self, key: &str, patch: &LocalePatch) -> Result<LocaleEntry, ApiError> {
        let payload = Payload::json(RESOURCE, patch)?;
        self.api
            .send_json(
                RESOURCE,
                Operation::Update,
                Method::PATCH,
                &format!("locales/{key}"),
                payload,
            )
            .await
    }

    pub async fn delete(&self, key: &str) -> Result<(), ApiError> {
        self.api
            .send_unit(
                RESOURCE,
                Operation::Delete,
                Method::DELETE,
                &format!("locales/{key}"),
                None,
            )
            .await
    }

    /// Flat key→text map for one language
    /// (`GET /locales/translations/:lang`).
    pub async fn translations(
        &self,
        language: Language,
    ) -> Result<HashMap<String, String>, ApiError> {
        self.api
            .get_json(
                RESOURCE,
                Operation::ReadAll,
                &format!("locales/translations/{language}"),
                &[],
            )
            .await
    }

    /// Subset fetch: `GET /locales/keys?keys=a,b,c&lang=`.
    pub async fn by_keys(
        &self,
        keys: &[&str],
        language: Option<Language>,
    ) -> Result<HashMap<String, LocaleEntry>, ApiError> {
        let mut query = vec![("keys", keys.join(","))];
        if let Some(language) = language {
            query.push(("lang", language.as_str().to_string()));
        }
        self.api
            .get_json(RESOURCE, Operation::ReadAll, "locales/keys", &query)
            .await
    }
}
