#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::NaiveDateTime;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use forum_api::{AppStateInner, router};
use forum_db::Database;

/// Fresh router over a private in-memory database.
pub fn app() -> Router {
    let db = Database::open_in_memory().unwrap();
    router(AppStateInner::new(db))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

pub async fn create_forum(app: &Router) -> Value {
    let (status, body) = post(
        app,
        "/forums",
        json!({ "title": "title_value", "content": "content_value" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

pub async fn create_comment(app: &Router, forum_id: i64, text: &str) -> Value {
    let (status, body) = post(
        app,
        &format!("/forums/{forum_id}/comments"),
        json!({ "comment": text }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

/// Parses a wire timestamp, panicking if it is malformed.
pub fn timestamp(value: &Value) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value.as_str().unwrap(), "%Y-%m-%dT%H:%M:%S%.6f").unwrap()
}

/// Asserts a 422 body has the field-error shape.
pub fn assert_validation_detail(body: &Value) {
    let detail = body["detail"].as_array().expect("detail should be a list");
    assert!(!detail.is_empty());
    for entry in detail {
        assert!(entry.get("type").is_some(), "{entry}");
        assert!(entry.get("loc").is_some(), "{entry}");
        assert!(entry.get("msg").is_some(), "{entry}");
    }
}
