//! Request body encoding.
//!
//! Encoding is decided exactly once per call and carried as a tagged
//! union: plain JSON, or multipart form data when not-yet-uploaded
//! files ride along. Multipart bodies get one text field per scalar
//! value and one repeated `photos` field per file.

use fabrica_api_types::RawFile;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

const PHOTOS_FIELD: &str = "photos";

#[derive(Debug)]
pub struct FilePart {
    pub field: &'static str,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub enum Payload {
    Json(Value),
    Multipart {
        fields: Vec<(String, String)>,
        files: Vec<FilePart>,
    },
}

impl Payload {
    pub fn json<S: Serialize>(resource: &'static str, body: &S) -> Result<Self, ApiError> {
        serde_json::to_value(body)
            .map(Payload::Json)
            .map_err(|source| ApiError::Encode { resource, source })
    }

    /// JSON when `photos` is empty, multipart otherwise.
    pub fn media_bearing<S: Serialize>(
        resource: &'static str,
        body: &S,
        photos: &[RawFile],
    ) -> Result<Self, ApiError> {
        if photos.is_empty() {
            return Self::json(resource, body);
        }
        let value =
            serde_json::to_value(body).map_err(|source| ApiError::Encode { resource, source })?;
        let files = photos
            .iter()
            .map(|photo| FilePart {
                field: PHOTOS_FIELD,
                file_name: photo.name.clone(),
                bytes: photo.bytes.clone(),
            })
            .collect();
        Ok(Payload::Multipart {
            fields: flatten_fields(value),
            files,
        })
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Payload::Multipart { .. })
    }
}

/// One form field per top-level value; non-scalar values are carried
/// as their JSON text (the backend's form-data convention for e.g.
/// machine lists).
fn flatten_fields(value: Value) -> Vec<(String, String)> {
    match value {
        Value::Object(map) => map
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key, field_text(value)))
            .collect(),
        _ => Vec::new(),
    }
}

fn field_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

pub(crate) fn build_form(
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for (name, value) in fields {
        form = form.text(name, value);
    }
    for file in files {
        let mime = mime_guess::from_path(&file.file_name).first_or_octet_stream();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(mime.essence_str())
            .map_err(ApiError::ClientBuild)?;
        form = form.part(file.field, part);
    }
    Ok(form)
}
