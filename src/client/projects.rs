use fabrica_api_types::{Project, ProjectDraft, ProjectPatch};
use reqwest::Method;
use uuid::Uuid;

use super::{ApiClient, Payload};
use crate::error::{ApiError, Operation};

const RESOURCE: &str = "projects";

/// CRUD wrapper for `/projects`. Create/update switch to multipart
/// when the draft carries not-yet-uploaded photos.
pub struct ProjectsClient<'a> {
    api: &'a ApiClient,
}

impl<'a> ProjectsClient<'a> {
    pub(super) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Project>, ApiError> {
        self.api
            .get_json(RESOURCE, Operation::ReadAll, "projects", &[])
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Project, ApiError> {
        self.api
            .get_json(RESOURCE, Operation::Read, &format!("projects/{id}"), &[])
            .await
    }

    pub async fn create(&self, draft: &ProjectDraft) -> Result<Project, ApiError> {
        let payload = Payload::media_bearing(RESOURCE, draft, &draft.photos)?;
        self.api
            .send_json(
                RESOURCE,
                Operation::Create,
                Method::POST,
                "projects",
                payload,
            )
            .await
    }

    pub async fn update(&self, id: Uuid, patch: &ProjectPatch) -> Result<Project, ApiError> {
        let payload = Payload::media_bearing(RESOURCE, patch, &patch.photos)?;
        self.api
            .send_json(
                RESOURCE,
                Operation::Update,
                Method::PATCH,
                &format!("projects/{id}"),
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
                &format!("projects/{id}"),
                None,
            )
            .await
    }
}
