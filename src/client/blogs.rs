use fabrica_api_types::{Blog, BlogDraft, BlogPatch};
use reqwest::Method;
use uuid::Uuid;

use super::{ApiClient, Payload};
use crate::error::{ApiError, Operation};

const RESOURCE: &str = "blogs";

/// CRUD wrapper for `/blogs`.
///
/// Blog media is uploaded through the upload channel before the post
/// is saved, so blog bodies are always JSON.
pub struct BlogsClient<'a> {
    api: &'a ApiClient,
}

impl<'a> BlogsClient<'a> {
    pub(super) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Blog>, ApiError> {
        self.api
            .get_json(RESOURCE, Operation::ReadAll, "blogs", &[])
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Blog, ApiError> {
        self.api
            .get_json(RESOURCE, Operation::Read, &format!("blogs/{id}"), &[])
            .await
    }

    pub async fn create(&self, draft: &BlogDraft) -> Result<Blog, ApiError> {
        let payload = Payload::json(RESOURCE, draft)?;
        self.api
            .send_json(RESOURCE, Operation::Create, Method::POST, "blogs", payload)
            .await
    }

    pub async fn update(&self, id: Uuid, patch: &BlogPatch) -> Result<Blog, ApiError> {
        let payload = Payload::json(RESOURCE, patch)?;
        self.api
            .send_json(
                RESOURCE,
                Operation::Update,
                Method::PATCH,
                &format!("blogs/{id}"),
                payload,
            )
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.api
            .send_unit(
                RESOURCE,
                Operation::Delete,
                Method::DELETE,
                &format!("blogs/{id}"),
                None,
            )
            .await
    }
}
