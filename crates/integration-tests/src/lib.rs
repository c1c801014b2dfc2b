//! Integration test fixtures for Vitrina.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrina-integration-tests
//! ```
//!
//! The tests drive the storefront router in-process with
//! `tower::ServiceExt::oneshot`, backed by a [`MemoryStore`] slot, and serve
//! catalogs from a loopback axum server to exercise the remote loader.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use axum::response::Response;

use vitrina_storefront::catalog::Catalog;
use vitrina_storefront::services::CartStore;
use vitrina_storefront::state::AppState;
use vitrina_storefront::storage::{KeyValueStore, MemoryStore, StorageError};

/// Catalog used across the tests.
pub const CATALOG_JSON: &str = r#"[
    {"id": 1, "nombre": "Taza", "precio": 1500, "desc": "Cerámica esmaltada", "imagen": "img/taza.jpg"},
    {"id": 2, "nombre": "Mate", "precio": 2499.5, "desc": "Calabaza curada", "imagen": "img/mate.jpg"},
    {"id": 3, "nombre": "Bombilla", "precio": 800, "desc": "Acero inoxidable", "imagen": "img/bombilla.jpg"}
]"#;

#[must_use]
pub fn sample_catalog() -> Catalog {
    Catalog::from_json(CATALOG_JSON.as_bytes()).unwrap()
}

/// Build the storefront router over `store`, restoring any cart already in it.
pub fn app_with_store(store: Arc<MemoryStore>) -> Router {
    app_with(store)
}

/// A slot store that reads from memory and refuses every write.
#[derive(Debug, Default)]
pub struct ReadOnlyStore {
    pub inner: MemoryStore,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::InvalidKey(key.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Build the storefront router over any slot store.
pub fn app_with(store: Arc<dyn KeyValueStore>) -> Router {
    let state = AppState::new(sample_catalog(), CartStore::restore(store));
    vitrina_storefront::router(state)
}

/// A `GET` request.
#[must_use]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// A form-encoded `POST` request.
#[must_use]
pub fn post_form(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

/// Read a response body as UTF-8.
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Parse the `HX-Trigger` header as JSON, if present and JSON-shaped.
#[must_use]
pub fn hx_trigger(response: &Response) -> Option<serde_json::Value> {
    let raw = response.headers().get("HX-Trigger")?.to_str().ok()?;
    serde_json::from_str(raw).ok()
}

/// Serve `router` on an ephemeral loopback port and return its address.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}
