use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Kind of a media attachment.
///
/// The backend reports this enum in upper case (`IMAGE`/`VIDEO`); the
/// client shape is lower case. The upload channel performs the case
/// mapping when it decodes the server response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// A media attachment owned by exactly one parent entity (blog,
/// project, or production line). Attachments are created through the
/// upload endpoints before the parent is saved, then referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAttachment {
    pub id: Uuid,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub name: String,
    #[serde(rename = "size", default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(
        with = "time::serde::rfc3339::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
}

/// A file that has not been uploaded yet.
///
/// Drafts carry these out of band (`#[serde(skip)]`); their presence is
/// what switches a create/update request from JSON to multipart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl RawFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MediaKind::Image).unwrap(),
            "\"image\""
        );
        assert_eq!(
            serde_json::to_string(&MediaKind::Video).unwrap(),
            "\"video\""
        );
    }

    #[test]
    fn attachment_omits_absent_optionals() {
        let attachment = MediaAttachment {
            id: Uuid::nil(),
            url: "https://cdn.example/a.png".into(),
            kind: MediaKind::Image,
            name: "a.png".into(),
            size_bytes: None,
            created_at: None,
        };
        let value = serde_json::to_value(&attachment).unwrap();
        assert!(value.get("size").is_none());
        assert!(value.get("createdAt").is_none());
        assert_eq!(value["type"], "image");
    }
}
