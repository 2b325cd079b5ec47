use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::Value;
use tower::ServiceExt;

use todo_lists_api::{db, route::create_router, token::TokenService, AppState};

pub const TEST_SIGNING_KEY: &[u8] = b"test-signing-key";

/// Router backed by a fresh in-memory database.
pub async fn setup_test_app() -> Router {
    let pool = db::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");

    let state = Arc::new(AppState {
        db: pool,
        tokens: TokenService::new(TEST_SIGNING_KEY, Duration::hours(12)),
    });

    create_router(state)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Signs a user up, signs them in and returns `(user_id, token)`.
pub async fn register(app: &Router, username: &str, password: &str) -> (i64, String) {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/sign-up",
        None,
        Some(serde_json::json!({"name": username, "username": username, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let id = body["id"].as_i64().unwrap();

    let (status, body) = send(
        app,
        Method::POST,
        "/auth/sign-in",
        None,
        Some(serde_json::json!({"username": username, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    (id, body["token"].as_str().unwrap().to_string())
}
