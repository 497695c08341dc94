// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Service listing routes.

use crate::db::{collections::SERVICES, Filter, Page};
use crate::error::Result;
use crate::middleware::ensure_owner;
use crate::models::{fields, DeleteAck, Document, InsertAck, UpdateAck};
use crate::pagination::ListQuery;
use crate::services::Claims;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Number of services featured on the home page.
const HOME_SERVICES_LIMIT: u64 = 6;

/// Public service routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/home-services", get(home_services))
        .route("/services", get(list_services).post(create_service))
        .route("/services-count", get(count_services))
        .route(
            "/services/{id}",
            get(get_service).put(upsert_service).delete(delete_service),
        )
}

/// Routes that need a session token (auth layer applied in routes/mod.rs).
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/manage-services/{email}", get(list_provider_services))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CountResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub count: u64,
}

async fn home_services(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Document>>> {
    let services = state
        .store
        .find_many(SERVICES, &Filter::All, Some(Page::first(HOME_SERVICES_LIMIT)))
        .await?;
    Ok(Json(services))
}

/// Search and page through all services.
async fn list_services(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<Document>>> {
    let filter = params.search_filter();
    let page = params.page();

    tracing::debug!(filter = ?filter, page = ?page, "Listing services");

    let services = state.store.find_many(SERVICES, &filter, page).await?;
    Ok(Json(services))
}

/// Total number of services matching the search, ignoring paging.
async fn count_services(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Json<CountResponse>> {
    let count = state.store.count(SERVICES, &params.search_filter()).await?;
    Ok(Json(CountResponse { count }))
}

/// Single service by id; `null` when it does not exist.
async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Document>>> {
    Ok(Json(state.store.find_one(SERVICES, &id).await?))
}

/// Services offered by the authenticated provider.
async fn list_provider_services(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Document>>> {
    ensure_owner(&claims, &email)?;

    let services = state
        .store
        .find_many(SERVICES, &Filter::equals(fields::PROVIDER_EMAIL, email), None)
        .await?;
    Ok(Json(services))
}

async fn create_service(
    State(state): State<Arc<AppState>>,
    Json(service): Json<Document>,
) -> Result<Json<InsertAck>> {
    let ack = state.store.insert_one(SERVICES, service).await?;
    tracing::info!(id = %ack.inserted_id, "Created service");
    Ok(Json(ack))
}

async fn upsert_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(service): Json<Document>,
) -> Result<Json<UpdateAck>> {
    Ok(Json(state.store.replace_or_insert(SERVICES, &id, service).await?))
}

async fn delete_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>> {
    let ack = state.store.delete_one(SERVICES, &id).await?;
    tracing::info!(id = %id, deleted = ack.deleted_count, "Deleted service");
    Ok(Json(ack))
}
