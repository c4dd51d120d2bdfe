use fabrica_api_types::{ProductionLine, ProductionLineDraft, ProductionLinePatch};
use reqwest::Method;
use uuid::Uuid;

use super::{ApiClient, Payload};
use crate::error::{ApiError, Operation};

const RESOURCE: &str = "production-lines";

/// CRUD wrapper for `/production-lines`, plus the published-only
/// collection read used by the public catalog.
pub struct ProductionLinesClient<'a> {
    api: &'a ApiClient,
}

impl<'a> ProductionLinesClient<'a> {
    pub(super) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<ProductionLine>, ApiError> {
        self.api
            .get_json(RESOURCE, Operation::ReadAll, "production-lines", &[])
            .await
    }

    pub async fn published(&self) -> Result<Vec<ProductionLine>, ApiError> {
        self.api
            .get_json(
                RESOURCE,
                Operation::ReadAll,
                "production-lines/published",
                &[],
            )
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<ProductionLine, ApiError> {
        self.api
            .get_json(
                RESOURCE,
                Operation::Read,
                &format!("production-lines/{id}"),
                &[],
            )
            .await
    }

    pub async fn create(&self, draft: &ProductionLineDraft) -> Result<ProductionLine, ApiError> {
        let payload = Payload::media_bearing(RESOURCE, draft, &draft.photos)?;
        self.api
            .send_json(
                RESOURCE,
                Operation::Create,
                Method::POST,
                "production-lines",
                payload,
            )
            .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        patch: &ProductionLinePatch,
    ) -> Result<ProductionLine, ApiError> {
        let payload = Payload::media_bearing(RESOURCE, patch, &patch.photos)?;
        self.api
            .send_json(
                RESOURCE,
                Operation::Update,
                Method::PATCH,
                &format!("production-lines/{id}"),
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
                &format!("production-lines/{id}"),
                None,
            )
            .await
    }
}
