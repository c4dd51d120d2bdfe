//! Shared harness for the integration suites: an in-process axum
//! backend bound to an ephemeral port, plus fixture builders for the
//! wire shapes the real backend serves.

use std::sync::Arc;

use axum::Router;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use uuid::Uuid;

use fabrica::{ApiClient, CacheConfig, SyncStore};

/// Serve `router` on an ephemeral local port and return its base URL.
/// The server task lives until the test's runtime shuts down.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("listener addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}

#[allow(dead_code)]
pub fn store_at(base: &str) -> SyncStore {
    let client = ApiClient::from_base_url(base).expect("client");
    SyncStore::new(Arc::new(client), CacheConfig::default())
}

#[allow(dead_code)]
pub fn store_with(base: &str, config: CacheConfig) -> SyncStore {
    let client = ApiClient::from_base_url(base).expect("client");
    SyncStore::new(Arc::new(client), config)
}

#[allow(dead_code)]
pub fn blog_json(id: Uuid, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "slug": slug::slugify(title),
        "content": format!("<p>{title}</p>"),
        "media": [],
        "state": "published",
        "createdAt": "2026-01-01T00:00:00Z",
        "updatedAt": "2026-01-01T00:00:00Z",
    })
}

#[allow(dead_code)]
pub fn project_json(id: Uuid, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "companyName": "Acme Beverages",
        "capacity": "12000 bottles/hour",
        "timeEstimate": "6 weeks",
        "media": [],
    })
}

#[allow(dead_code)]
pub fn line_json(id: Uuid, company: &str, published: bool) -> Value {
    json!({
        "id": id,
        "company": company,
        "fullName": "Jordan Example",
        "email": "sales@example.com",
        "phone": "+20 100 000 0000",
        "productType": "carbonated drinks",
        "containerType": "PET bottle",
        "capacity": "12000 bottles/hour",
        "manufacturingYear": 2019,
        "fillingProcess": "isobaric",
        "fillingType": "volumetric",
        "controller": "PLC",
        "machines": ["rinser", "filler", "capper"],
        "workingTime": "16 h/day",
        "currency": "USD",
        "price": 250_000.0,
        "negotiable": true,
        "availableNow": true,
        "published": published,
        "media": [],
    })
}

#[allow(dead_code)]
pub fn locale_json(key: &str, en: Option<&str>, ar: Option<&str>) -> Value {
    let mut value = json!({
        "key": key,
        "updatedAt": "2026-01-01T00:00:00Z",
    });
    if let Some(en) = en {
        value["en"] = json!(en);
    }
    if let Some(ar) = ar {
        value["ar"] = json!(ar);
    }
    value
}
