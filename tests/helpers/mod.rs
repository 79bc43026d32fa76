//! Shared setup for router tests: app state with injected doubles and
//! throwaway HTTP servers standing in for external services.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header::CONTENT_TYPE},
};
use carelead::{
    AppState,
    config::{EmailConfig, UpstreamConfig},
    email::EmailService,
    upstream::UpstreamClient,
};
use carelead_contact::{ContactStore, MemoryStore};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const CONTACT_ADDRESS: &str = "office@carelead.localhost";

pub fn memory_store() -> Arc<dyn ContactStore> {
    Arc::new(MemoryStore::new())
}

pub fn state(store: Arc<dyn ContactStore>) -> AppState {
    AppState {
        store,
        email: EmailService::disabled(),
        upstream: UpstreamClient::disabled(),
    }
}

pub fn mock_email() -> EmailService {
    EmailService::new_mock(&EmailConfig {
        contact_address: Some(CONTACT_ADDRESS.to_string()),
        ..EmailConfig::default()
    })
}

pub fn upstream(base_url: impl Into<String>) -> UpstreamClient {
    UpstreamClient::new(&UpstreamConfig {
        api_url: Some(base_url.into()),
        timeout_secs: 5,
    })
    .unwrap()
}

pub fn payload(first_name: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": "B",
        "email": "a@b.com",
        "subject": "S",
        "message": "M",
    })
}

pub async fn post_contact(app: &Router, body: &Value) -> Response<Body> {
    post_raw(app, &body.to_string()).await
}

pub async fn post_raw(app: &Router, body: &str) -> Response<Body> {
    post_with_content_type(app, body, Some("application/json")).await
}

pub async fn post_with_content_type(
    app: &Router,
    body: &str,
    content_type: Option<&str>,
) -> Response<Body> {
    let mut request = Request::builder().method("POST").uri("/api/contact");
    if let Some(content_type) = content_type {
        request = request.header(CONTENT_TYPE, content_type);
    }

    app.clone()
        .oneshot(request.body(Body::from(body.to_owned())).unwrap())
        .await
        .unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn header(response: &Response<Body>, name: &str) -> String {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

/// Base URL of a port nothing listens on
pub async fn closed_port() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{addr}")
}
