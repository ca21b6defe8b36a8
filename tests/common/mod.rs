//! Shared utilities for integration testing.

use std::net::SocketAddr;

use axum::http::{HeaderMap, Uri};
use axum::routing::any;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Start a mock upstream that echoes the gateway's annotations back as
/// JSON, so tests can assert on what page resolution would receive.
pub async fn start_mock_upstream(addr: SocketAddr) {
    let app = Router::new()
        .route("/{*path}", any(echo))
        .route("/", any(echo));
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
}

async fn echo(uri: Uri, headers: HeaderMap) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    Json(json!({
        "path": uri.path(),
        "query": uri.query().unwrap_or_default(),
        "locale": header("x-resolved-locale"),
        "route": header("x-route-params"),
        "request_id": header("x-request-id"),
    }))
}
