// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Booked service tests: customer and provider views, status updates.

use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;
use common::{body_json, create_test_app, request, token_cookie};

async fn book(app: &axum::Router, booking: Value) -> String {
    let response = app
        .clone()
        .oneshot(request("POST", "/booked-services", Some(booking), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["insertedId"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn get_as(app: &axum::Router, uri: &str, cookie: &str) -> Value {
    let response = app
        .clone()
        .oneshot(request("GET", uri, None, Some(cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "{}", uri);
    body_json(response).await
}

#[tokio::test]
async fn test_customer_and_provider_views() {
    let (app, state) = create_test_app();
    book(
        &app,
        json!({"serviceName": "Roof", "userEmail": "cust@example.com", "providerEmail": "prov@example.com"}),
    )
    .await;
    book(
        &app,
        json!({"serviceName": "Sink", "userEmail": "other@example.com", "providerEmail": "prov@example.com"}),
    )
    .await;
    book(
        &app,
        json!({"serviceName": "Door", "userEmail": "cust@example.com", "providerEmail": "else@example.com"}),
    )
    .await;

    let customer = get_as(
        &app,
        "/booked-services/cust@example.com",
        &token_cookie(&state, "cust@example.com"),
    )
    .await;
    let names: Vec<_> = customer
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["serviceName"].clone())
        .collect();
    assert_eq!(names, vec![json!("Roof"), json!("Door")]);

    let provider = get_as(
        &app,
        "/services-to-do/prov@example.com",
        &token_cookie(&state, "prov@example.com"),
    )
    .await;
    let names: Vec<_> = provider
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["serviceName"].clone())
        .collect();
    assert_eq!(names, vec![json!("Roof"), json!("Sink")]);
}

#[tokio::test]
async fn test_patch_changes_only_supplied_fields() {
    let (app, state) = create_test_app();
    let id = book(
        &app,
        json!({
            "serviceName": "Roof",
            "userEmail": "cust@example.com",
            "providerEmail": "prov@example.com",
            "status": "pending",
            "price": 50
        }),
    )
    .await;

    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/booked-services/{}", id),
            Some(json!({"status": "done"})),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let ack = body_json(response).await;
    assert_eq!(ack["matchedCount"], 1);
    assert_eq!(ack["modifiedCount"], 1);

    let bookings = get_as(
        &app,
        "/booked-services/cust@example.com",
        &token_cookie(&state, "cust@example.com"),
    )
    .await;
    assert_eq!(
        bookings[0],
        json!({
            "_id": id,
            "serviceName": "Roof",
            "userEmail": "cust@example.com",
            "providerEmail": "prov@example.com",
            "status": "done",
            "price": 50
        })
    );
}

#[tokio::test]
async fn test_patch_missing_booking_has_no_effect() {
    let (app, state) = create_test_app();

    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            "/booked-services/65f1c0ffee0000000000beef",
            Some(json!({"status": "done", "userEmail": "cust@example.com"})),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let ack = body_json(response).await;
    assert_eq!(ack["matchedCount"], 0);
    assert_eq!(ack["upsertedCount"], 0);

    let bookings = get_as(
        &app,
        "/booked-services/cust@example.com",
        &token_cookie(&state, "cust@example.com"),
    )
    .await;
    assert_eq!(bookings, json!([]));
}

#[tokio::test]
async fn test_delete_booking() {
    let (app, _) = create_test_app();
    let id = book(&app, json!({"userEmail": "cust@example.com"})).await;

    for expected in [1, 0] {
        let response = app
            .clone()
            .oneshot(request(
                "DELETE",
                &format!("/booked-services/{}", id),
                None,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["deletedCount"], expected);
    }
}
