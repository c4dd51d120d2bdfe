use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::media::{MediaAttachment, RawFile};

/// A delivered project shown in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub company_name: String,
    /// Free text, e.g. "12000 bottles/hour".
    pub capacity: String,
    /// Free text constrained by the form layer to `<number> <unit>`.
    pub time_estimate: String,
    #[serde(default)]
    pub media: Vec<MediaAttachment>,
}

/// Request body for `POST /projects`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub name: String,
    pub company_name: String,
    pub capacity: String,
    pub time_estimate: String,
    #[serde(skip)]
    pub photos: Vec<RawFile>,
}

/// Partial-update body for `PATCH /projects/:id`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_estimate: Option<String>,
    #[serde(skip)]
    pub photos: Vec<RawFile>,
}
