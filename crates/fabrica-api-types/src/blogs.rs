use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::media::MediaAttachment;

/// Publish state of a blog post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishState {
    Draft,
    Published,
}

/// A blog post as returned by the backend.
///
/// The slug is derived from the title when the post is first created
/// but editable independently afterwards; uniqueness is enforced
/// server-side, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    /// Rich-text body as sanitized HTML.
    #[serde(rename = "content")]
    pub content_html: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_image: Option<MediaAttachment>,
    #[serde(default)]
    pub media: Vec<MediaAttachment>,
    pub state: PublishState,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Blog {
    pub fn is_published(&self) -> bool {
        self.state == PublishState::Published
    }
}

/// Request body for `POST /blogs`.
///
/// When `slug` is `None` the store derives one from the title before
/// the request is issued.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(rename = "content")]
    pub content_html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_image_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media_ids: Vec<Uuid>,
    pub state: PublishState,
}

/// Partial-update body for `PATCH /blogs/:id`. Absent fields are left
/// untouched by the server.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(rename = "content", skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_image_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_ids: Option<Vec<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<PublishState>,
}
