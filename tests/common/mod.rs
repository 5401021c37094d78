use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use researchdesk::router::init_router;
use researchdesk::state::AppState;
use researchdesk_config::{CorsConfig, NavigationConfig};
use researchdesk_permissions::MemoryPermissionStore;
use serde_json::Value;
use tower::ServiceExt;

pub const BASE: &str = "/api/navigation-permissions";

/// Router over a memory store; the session has already run its startup load.
pub async fn setup_test_app(store: Arc<MemoryPermissionStore>) -> (Router, AppState) {
    let state = AppState::new(
        store,
        &NavigationConfig::default(),
        CorsConfig::from_list("http://localhost:5173"),
        None,
    )
    .await;

    (init_router(state.clone()), state)
}

/// Path segment / query value encoding for job titles with spaces.
#[allow(dead_code)]
pub fn encode(value: &str) -> String {
    value.replace(' ', "%20")
}

#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

#[allow(dead_code)]
pub fn access_uri(job_title: &str, navigation_item: &str) -> String {
    format!(
        "{}/access?job_title={}&navigation_item={}",
        BASE,
        encode(job_title),
        encode(navigation_item)
    )
}
