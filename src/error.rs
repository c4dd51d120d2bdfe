//! Error taxonomy for the SDK.
//!
//! Resource clients and the upload channel fail with [`ApiError`];
//! nothing in this crate retries automatically. Form validation
//! failures never become `ApiError`s (see [`crate::forms`]).

use reqwest::StatusCode;
use thiserror::Error;

/// The operation a resource client was performing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    ReadAll,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::ReadAll => "read-all",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. `server_message` is a
    /// best-effort extraction from the JSON error body; a body that does
    /// not parse leaves it `None`.
    #[error("{resource} {operation} request failed with status {status}")]
    RequestFailed {
        resource: &'static str,
        operation: Operation,
        status: StatusCode,
        server_message: Option<String>,
    },

    /// Non-2xx status from an upload endpoint.
    #[error("upload failed with status {status}")]
    UploadFailed { status: StatusCode },

    /// A 2xx upload response whose body did not match the expected
    /// media shape.
    #[error("upload response could not be decoded")]
    InvalidUploadResponse {
        #[source]
        source: serde_json::Error,
    },

    /// Transport-level failure: no usable response was received.
    #[error("network error during {operation} on {resource}")]
    Network {
        resource: &'static str,
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// A 2xx resource response whose body did not decode into the
    /// expected entity.
    #[error("failed to decode {resource} response body")]
    Decode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode request body for {resource}")]
    Encode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL")]
    BaseUrl(#[from] url::ParseError),

    #[error("failed to construct HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}

impl ApiError {
    /// HTTP status of the failure, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::RequestFailed { status, .. } | ApiError::UploadFailed { status } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// True when the server answered 404 for the request.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_display_names_resource_and_operation() {
        let err = ApiError::RequestFailed {
            resource: "blogs",
            operation: Operation::Update,
            status: StatusCode::UNPROCESSABLE_ENTITY,
            server_message: Some("slug taken".into()),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("blogs"));
        assert!(rendered.contains("update"));
        assert!(rendered.contains("422"));
    }

    #[test]
    fn not_found_detection() {
        let err = ApiError::RequestFailed {
            resource: "projects",
            operation: Operation::Read,
            status: StatusCode::NOT_FOUND,
            server_message: None,
        };
        assert!(err.is_not_found());
        assert!(
            !ApiError::UploadFailed {
                status: StatusCode::INTERNAL_SERVER_ERROR
            }
            .is_not_found()
        );
    }
}
