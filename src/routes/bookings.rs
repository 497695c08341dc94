// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Booked service routes.

use crate::db::{collections::BOOKED_SERVICES, Filter};
use crate::error::Result;
use crate::middleware::ensure_owner;
use crate::models::{fields, DeleteAck, Document, InsertAck, UpdateAck};
use crate::services::Claims;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, patch, post},
    Extension, Json, Router,
};
use std::sync::Arc;

/// Public booking routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/booked-services", post(create_booking))
        .route(
            "/booked-services/{id}",
            patch(update_booking).delete(delete_booking),
        )
}

/// Routes that need a session token (auth layer applied in routes/mod.rs).
///
/// `GET /booked-services/{id}` shares its path with the public by-id routes,
/// so the segment keeps the `id` name even though it carries an email here.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/booked-services/{id}", get(list_user_bookings))
        .route("/services-to-do/{email}", get(list_provider_bookings))
}

async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(booking): Json<Document>,
) -> Result<Json<InsertAck>> {
    let ack = state.store.insert_one(BOOKED_SERVICES, booking).await?;
    tracing::info!(id = %ack.inserted_id, "Created booking");
    Ok(Json(ack))
}

/// Bookings made by the authenticated customer.
async fn list_user_bookings(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Document>>> {
    ensure_owner(&claims, &email)?;

    let bookings = state
        .store
        .find_many(BOOKED_SERVICES, &Filter::equals(fields::USER_EMAIL, email), None)
        .await?;
    Ok(Json(bookings))
}

/// Bookings the authenticated provider has to fulfil.
async fn list_provider_bookings(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Document>>> {
    ensure_owner(&claims, &email)?;

    let bookings = state
        .store
        .find_many(
            BOOKED_SERVICES,
            &Filter::equals(fields::PROVIDER_EMAIL, email),
            None,
        )
        .await?;
    Ok(Json(bookings))
}

/// Merge the supplied fields (typically `status`) into a booking.
async fn update_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(changes): Json<Document>,
) -> Result<Json<UpdateAck>> {
    let ack = state.store.merge_fields(BOOKED_SERVICES, &id, changes).await?;
    tracing::info!(
        id = %id,
        matched = ack.matched_count,
        modified = ack.modified_count,
        "Updated booking"
    );
    Ok(Json(ack))
}

async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>> {
    Ok(Json(state.store.delete_one(BOOKED_SERVICES, &id).await?))
}
