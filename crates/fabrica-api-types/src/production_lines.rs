use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::media::{MediaAttachment, RawFile};

/// A production line listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionLine {
    pub id: Uuid,

    // Owner / contact
    pub company: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,

    // Specification
    pub product_type: String,
    pub container_type: String,
    pub capacity: String,
    pub manufacturing_year: i32,
    pub filling_process: String,
    pub filling_type: String,
    pub controller: String,
    #[serde(default)]
    pub machines: Vec<String>,
    pub working_time: String,

    // Commercial
    pub currency: String,
    pub price: f64,
    pub negotiable: bool,

    // Availability: `expected_available` is required by the backend
    // when `available_now` is false.
    pub available_now: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_available: Option<Date>,

    pub published: bool,
    #[serde(default)]
    pub media: Vec<MediaAttachment>,
}

/// Request body for `POST /production-lines`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionLineDraft {
    pub company: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub product_type: String,
    pub container_type: String,
    pub capacity: String,
    pub manufacturing_year: i32,
    pub filling_process: String,
    pub filling_type: String,
    pub controller: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub machines: Vec<String>,
    pub working_time: String,
    pub currency: String,
    pub price: f64,
    pub negotiable: bool,
    pub available_now: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_available: Option<Date>,
    pub published: bool,
    /// Not-yet-uploaded photos; selects multipart encoding when
    /// non-empty.
    #[serde(skip)]
    pub photos: Vec<RawFile>,
}

/// Partial-update body for `PATCH /production-lines/:id`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionLinePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturing_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filling_process: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filling_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machines: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negotiable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_now: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_available: Option<Option<Date>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(skip)]
    pub photos: Vec<RawFile>,
}
