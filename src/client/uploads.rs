//! Progress-reporting media upload channel.
//!
//! Files are streamed to the upload endpoints chunk-wise; every chunk
//! handed to the transport advances a shared byte counter and invokes
//! the caller's progress callback with an integer 0–100 percentage
//! over the combined size of the batch. `upload_many` is preferred for
//! multi-file submissions so the percentage stays coherent.

use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_stream::stream;
use bytes::Bytes;
use fabrica_api_types::{MediaAttachment, MediaKind, RawFile};
use futures::Stream;
use reqwest::Body;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use time::OffsetDateTime;
use uuid::Uuid;

use super::ApiClient;
use crate::error::{ApiError, Operation};

const RESOURCE: &str = "upload";
const SINGLE_PATH: &str = "upload/media/single";
const MULTIPLE_PATH: &str = "upload/media/multiple";
const FILES_FIELD: &str = "files";
const CHUNK_SIZE: usize = 64 * 1024;

/// Invoked with 0–100 as upload bytes move.
pub type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;

pub struct UploadChannel<'a> {
    api: &'a ApiClient,
}

impl<'a> UploadChannel<'a> {
    pub(super) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn upload_one(
        &self,
        file: RawFile,
        progress: Option<ProgressFn>,
    ) -> Result<MediaAttachment, ApiError> {
        let total = file.bytes.len() as u64;
        let sent = Arc::new(AtomicU64::new(0));
        let form = Form::new().part(FILES_FIELD, progress_part(file, sent, total, progress)?);
        let wire: WireMedia = self.send(SINGLE_PATH, form).await?;
        Ok(wire.into())
    }

    /// Upload a batch in one request; the response order matches the
    /// input order.
    pub async fn upload_many(
        &self,
        files: Vec<RawFile>,
        progress: Option<ProgressFn>,
    ) -> Result<Vec<MediaAttachment>, ApiError> {
        let total: u64 = files.iter().map(|file| file.bytes.len() as u64).sum();
        let sent = Arc::new(AtomicU64::new(0));
        let mut form = Form::new();
        for file in files {
            form = form.part(
                FILES_FIELD,
                progress_part(file, sent.clone(), total, progress.clone())?,
            );
        }
        let wire: Vec<WireMedia> = self.send(MULTIPLE_PATH, form).await?;
        Ok(wire.into_iter().map(MediaAttachment::from).collect())
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, ApiError> {
        let url = self.api.url(path, &[])?;
        let response = self
            .api
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|source| ApiError::Network {
                resource: RESOURCE,
                operation: Operation::Create,
                source,
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ApiError::Network {
                resource: RESOURCE,
                operation: Operation::Create,
                source,
            })?;
        if !status.is_success() {
            return Err(ApiError::UploadFailed { status });
        }
        serde_json::from_slice(&bytes).map_err(|source| ApiError::InvalidUploadResponse { source })
    }
}

fn progress_part(
    file: RawFile,
    sent: Arc<AtomicU64>,
    total: u64,
    progress: Option<ProgressFn>,
) -> Result<Part, ApiError> {
    let length = file.bytes.len() as u64;
    let mime = mime_guess::from_path(&file.name).first_or_octet_stream();
    let file_name = file.name;
    let body = Body::wrap_stream(progress_stream(file.bytes, sent, total, progress));
    Part::stream_with_length(body, length)
        .file_name(file_name.clone())
        .mime_str(mime.essence_str())
        .map_err(ApiError::ClientBuild)
}

fn progress_stream(
    bytes: Vec<u8>,
    sent: Arc<AtomicU64>,
    total: u64,
    progress: Option<ProgressFn>,
) -> impl Stream<Item = Result<Bytes, Infallible>> {
    stream! {
        let data = Bytes::from(bytes);
        let mut offset = 0;
        while offset < data.len() {
            let end = usize::min(offset + CHUNK_SIZE, data.len());
            let chunk = data.slice(offset..end);
            offset = end;

            let done =
                sent.fetch_add(chunk.len() as u64, Ordering::Relaxed) + chunk.len() as u64;
            metrics::counter!("fabrica_upload_bytes_total").increment(chunk.len() as u64);
            if let Some(callback) = &progress {
                callback(percentage(done, total));
            }
            yield Ok(chunk);
        }
    }
}

fn percentage(done: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    (done.saturating_mul(100) / total).min(100) as u8
}

/// The upload endpoints' media shape, which reports the kind enum in
/// upper case.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMedia {
    id: Uuid,
    url: String,
    #[serde(rename = "type")]
    kind: WireMediaKind,
    name: String,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    created_at: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
enum WireMediaKind {
    Image,
    Video,
}

impl From<WireMedia> for MediaAttachment {
    fn from(wire: WireMedia) -> Self {
        MediaAttachment {
            id: wire.id,
            url: wire.url,
            kind: match wire.kind {
                WireMediaKind::Image => MediaKind::Image,
                WireMediaKind::Video => MediaKind::Video,
            },
            name: wire.name,
            size_bytes: wire.size,
            created_at: wire.created_at,
        }
    }
}
