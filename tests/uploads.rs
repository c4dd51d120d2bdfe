//! End-to-end upload channel behavior against an in-process backend:
//! batch order, wire kind mapping, progress reporting and failure
//! modes.

mod support;

use std::sync::{Arc, Mutex};

use axum::Json;
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use serde_json::{Value, json};
use uuid::Uuid;

use fabrica::ProgressFn;
use fabrica::types::{MediaKind, RawFile};

use support::spawn;

fn wire_media(name: &str, kind: &str, size: usize) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "url": format!("https://cdn.example/{name}"),
        "type": kind,
        "name": name,
        "size": size,
        "createdAt": "2026-01-01T00:00:00Z",
    })
}

fn multiple_endpoint() -> Router {
    Router::new().route(
        "/upload/media/multiple",
        post(|mut multipart: Multipart| async move {
            let mut media = Vec::new();
            while let Some(field) = multipart.next_field().await.unwrap() {
                assert_eq!(field.name(), Some("files"));
                let name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.unwrap();
                let kind = if name.ends_with(".mp4") { "VIDEO" } else { "IMAGE" };
                media.push(wire_media(&name, kind, bytes.len()));
            }
            Json(Value::Array(media))
        }),
    )
}

#[tokio::test]
async fn batch_upload_preserves_order_and_maps_kinds() {
    let base = spawn(multiple_endpoint()).await;
    let client = fabrica::ApiClient::from_base_url(&base).unwrap();

    let files = vec![
        RawFile::new("front.jpg", vec![1u8; 300]),
        RawFile::new("walkthrough.mp4", vec![2u8; 500]),
        RawFile::new("back.png", vec![3u8; 200]),
    ];
    let media = client.uploads().upload_many(files, None).await.unwrap();

    let names: Vec<&str> = media.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["front.jpg", "walkthrough.mp4", "back.png"]);
    assert_eq!(media[0].kind, MediaKind::Image);
    assert_eq!(media[1].kind, MediaKind::Video);
    assert_eq!(media[1].size_bytes, Some(500));
}

#[tokio::test]
async fn progress_covers_the_combined_batch_and_ends_at_100() {
    let base = spawn(multiple_endpoint()).await;
    let client = fabrica::ApiClient::from_base_url(&base).unwrap();

    let reported = Arc::new(Mutex::new(Vec::new()));
    let sink = reported.clone();
    let progress: ProgressFn = Arc::new(move |pct| sink.lock().unwrap().push(pct));

    // Two files big enough to take several chunks each.
    let files = vec![
        RawFile::new("a.jpg", vec![0u8; 200 * 1024]),
        RawFile::new("b.jpg", vec![0u8; 120 * 1024]),
    ];
    client
        .uploads()
        .upload_many(files, Some(progress))
        .await
        .unwrap();

    let reported = reported.lock().unwrap();
    assert!(!reported.is_empty());
    assert!(reported.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(*reported.last().unwrap(), 100);
}

#[tokio::test]
async fn single_upload_returns_one_attachment() {
    let router = Router::new().route(
        "/upload/media/single",
        post(|mut multipart: Multipart| async move {
            let field = multipart.next_field().await.unwrap().unwrap();
            let name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.unwrap();
            Json(wire_media(&name, "IMAGE", bytes.len()))
        }),
    );
    let base = spawn(router).await;
    let client = fabrica::ApiClient::from_base_url(&base).unwrap();

    let media = client
        .uploads()
        .upload_one(RawFile::new("hero.jpg", vec![9u8; 64]), None)
        .await
        .unwrap();
    assert_eq!(media.name, "hero.jpg");
    assert_eq!(media.kind, MediaKind::Image);
    assert_eq!(media.size_bytes, Some(64));
}

#[tokio::test]
async fn rejected_upload_surfaces_the_status() {
    let router = Router::new().route(
        "/upload/media/single",
        post(|| async { (StatusCode::PAYLOAD_TOO_LARGE, "too big") }),
    );
    let base = spawn(router).await;
    let client = fabrica::ApiClient::from_base_url(&base).unwrap();

    let err = client
        .uploads()
        .upload_one(RawFile::new("huge.jpg", vec![0u8; 10]), None)
        .await
        .unwrap_err();
    match err {
        fabrica::ApiError::UploadFailed { status } => {
            assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE)
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_failure_not_a_panic() {
    let router = Router::new().route(
        "/upload/media/single",
        post(|| async { Json(json!({"ok": true})) }),
    );
    let base = spawn(router).await;
    let client = fabrica::ApiClient::from_base_url(&base).unwrap();

    let err = client
        .uploads()
        .upload_one(RawFile::new("x.jpg", vec![0u8; 10]), None)
        .await
        .unwrap_err();
    assert!(matches!(err, fabrica::ApiError::InvalidUploadResponse { .. }));
}
