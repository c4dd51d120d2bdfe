//! HTTP resource clients.
//!
//! Each per-resource client translates one typed operation into
//! exactly one HTTP request against the configured base URL and back
//! into a typed result. No retries, no client-side timeouts beyond the
//! stack's defaults; callers that want staleness handling go through
//! [`crate::SyncStore`] instead of using these directly.

mod blogs;
mod contact;
mod locales;
mod payload;
mod production_lines;
mod projects;
mod uploads;

pub use blogs::BlogsClient;
pub use contact::MessagesClient;
pub use locales::LocalesClient;
pub use payload::Payload;
pub use production_lines::ProductionLinesClient;
pub use projects::ProjectsClient;
pub use uploads::{ProgressFn, UploadChannel};

use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::ApiSettings;
use crate::error::{ApiError, Operation};

/// Shared HTTP core for all resource clients.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        Self::from_base_url(settings.base_url())
    }

    pub fn from_base_url(base: &str) -> Result<Self, ApiError> {
        let base = Url::parse(base)?.join("/")?;
        let http = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(ApiError::ClientBuild)?;
        Ok(Self { http, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("fabrica/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn blogs(&self) -> BlogsClient<'_> {
        BlogsClient::new(self)
    }

    pub fn projects(&self) -> ProjectsClient<'_> {
        ProjectsClient::new(self)
    }

    pub fn production_lines(&self) -> ProductionLinesClient<'_> {
        ProductionLinesClient::new(self)
    }

    pub fn locales(&self) -> LocalesClient<'_> {
        LocalesClient::new(self)
    }

    pub fn messages(&self) -> MessagesClient<'_> {
        MessagesClient::new(self)
    }

    pub fn uploads(&self) -> UploadChannel<'_> {
        UploadChannel::new(self)
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self.base.join(path).map_err(ApiError::BaseUrl)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        operation: Operation,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path, query)?;
        debug!(resource, op = %operation, %url, "issuing request");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ApiError::Network {
                resource,
                operation,
                source,
            })?;
        Self::handle(resource, operation, response).await
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        operation: Operation,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> Result<T, ApiError> {
        let url = self.url(path, &[])?;
        debug!(resource, op = %operation, %url, multipart = payload.is_multipart(), "issuing request");
        let request = self.http.request(method, url);
        let request = match payload {
            Payload::Json(body) => request.json(&body),
            Payload::Multipart { fields, files } => {
                request.multipart(payload::build_form(fields, files)?)
            }
        };
        let response = request.send().await.map_err(|source| ApiError::Network {
            resource,
            operation,
            source,
        })?;
        Self::handle(resource, operation, response).await
    }

    /// Issue a request whose success carries no value.
    pub(crate) async fn send_unit(
        &self,
        resource: &'static str,
        operation: Operation,
        method: Method,
        path: &str,
        payload: Option<Payload>,
    ) -> Result<(), ApiError> {
        let url = self.url(path, &[])?;
        debug!(resource, op = %operation, %url, "issuing request");
        let mut request = self.http.request(method, url);
        if let Some(payload) = payload {
            request = match payload {
                Payload::Json(body) => request.json(&body),
                Payload::Multipart { fields, files } => {
                    request.multipart(payload::build_form(fields, files)?)
                }
            };
        }
        let response = request.send().await.map_err(|source| ApiError::Network {
            resource,
            operation,
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let bytes = response.bytes().await.unwrap_or_default();
            metrics::counter!("fabrica_request_failure_total", "resource" => resource)
                .increment(1);
            return Err(ApiError::RequestFailed {
                resource,
                operation,
                status,
                server_message: extract_server_message(&bytes),
            });
        }
        Ok(())
    }

    async fn handle<T: DeserializeOwned>(
        resource: &'static str,
        operation: Operation,
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ApiError::Network {
                resource,
                operation,
                source,
            })?;
        if !status.is_success() {
            metrics::counter!("fabrica_request_failure_total", "resource" => resource)
                .increment(1);
            return Err(ApiError::RequestFailed {
                resource,
                operation,
                status,
                server_message: extract_server_message(&bytes),
            });
        }
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode { resource, source })
    }
}

/// Best-effort extraction of the server's error message. Backends
/// answer either `{"message": "..."}` or `{"message": ["...", ...]}`;
/// anything that does not parse yields `None`.
fn extract_server_message(bytes: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(bytes).ok()?;
    match value.get("message")? {
        Value::String(message) => Some(message.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        _ => None,
    }
}
