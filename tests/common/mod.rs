// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
};
use fixnexus_server::config::Config;
use fixnexus_server::db::{MemoryStore, MongoStore};
use fixnexus_server::routes::create_router;
use fixnexus_server::AppState;
use serde_json::Value;
use std::sync::Arc;

/// MongoDB deployment for integration tests, if one is configured.
#[allow(dead_code)]
pub fn mongo_test_uri() -> Option<String> {
    std::env::var("MONGODB_TEST_URI").ok()
}

/// Skip test with message if no MongoDB deployment is configured.
#[macro_export]
macro_rules! require_mongo {
    () => {
        if crate::common::mongo_test_uri().is_none() {
            eprintln!("⚠️  Skipping: MONGODB_TEST_URI not set");
            return;
        }
    };
}

/// Connect to the test MongoDB deployment using a throwaway database.
#[allow(dead_code)]
pub async fn test_mongo(db_name: &str) -> MongoStore {
    let uri = mongo_test_uri().expect("MONGODB_TEST_URI not set");
    MongoStore::connect(&uri, db_name)
        .await
        .expect("Failed to connect to MongoDB")
}

/// Create a test app backed by an empty in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::default())
}

#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config, Arc::new(MemoryStore::new())));
    (create_router(state.clone()), state)
}

/// Cookie header value carrying a freshly issued token for `email`.
#[allow(dead_code)]
pub fn token_cookie(state: &AppState, email: &str) -> String {
    let token = state.tokens.issue(email).expect("token should issue");
    format!("token={}", token)
}

/// Build a request with an optional JSON body and cookie header.
#[allow(dead_code)]
pub fn request(method: &str, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Insert a service through the API and return its id.
#[allow(dead_code)]
pub async fn seed_service(app: &axum::Router, service: Value) -> String {
    use tower::ServiceExt;

    let response = app
        .clone()
        .oneshot(request("POST", "/services", Some(service), None))
        .await
        .unwrap();
    body_json(response).await["insertedId"]
        .as_str()
        .expect("insertedId should be a string")
        .to_string()
}
