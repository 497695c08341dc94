// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! Handlers talk to a [`DocumentStore`], which is backed by MongoDB in
//! production and by an in-process [`MemoryStore`] for local runs and tests.

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use crate::config::StoreConfig;
use crate::error::AppError;
use crate::models::{DeleteAck, Document, InsertAck, UpdateAck};
use async_trait::async_trait;
use std::sync::Arc;

/// Collection names as constants.
pub mod collections {
    pub const SERVICES: &str = "services";
    pub const BOOKED_SERVICES: &str = "bookedServices";
}

/// Document selection used by list and count queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Every document in the collection.
    All,
    /// String field equal to `value`.
    Equals { field: &'static str, value: String },
    /// String field containing `needle` anywhere, ignoring case.
    ContainsIgnoreCase { field: &'static str, needle: String },
}

impl Filter {
    pub fn equals(field: &'static str, value: impl Into<String>) -> Self {
        Filter::Equals {
            field,
            value: value.into(),
        }
    }

    /// Evaluate the filter against a document held in memory.
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Equals { field, value } => doc
                .get(*field)
                .and_then(|v| v.as_str())
                .is_some_and(|s| s == value),
            Filter::ContainsIgnoreCase { field, needle } => doc
                .get(*field)
                .and_then(|v| v.as_str())
                .is_some_and(|s| s.to_lowercase().contains(&needle.to_lowercase())),
        }
    }
}

/// Offset window applied to a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    /// Maximum number of documents; 0 means unbounded.
    pub limit: u64,
}

impl Page {
    /// First `limit` documents.
    pub fn first(limit: u64) -> Self {
        Self { skip: 0, limit }
    }
}

/// Operations the route handlers need from a document collection.
///
/// Documents come back in insertion order. Lookups by an id that does not
/// exist are not errors: they yield `None` or zero counts.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        page: Option<Page>,
    ) -> Result<Vec<Document>, AppError>;

    async fn find_one(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError>;

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, AppError>;

    /// Persist `doc` verbatim, assigning an `_id` if it has none.
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertAck, AppError>;

    /// Merge `doc` into the document `id`, creating it when absent.
    /// Fields missing from `doc` are left untouched.
    async fn replace_or_insert(
        &self,
        collection: &str,
        id: &str,
        doc: Document,
    ) -> Result<UpdateAck, AppError>;

    /// Merge `partial` into the document `id`; no effect when absent.
    async fn merge_fields(
        &self,
        collection: &str,
        id: &str,
        partial: Document,
    ) -> Result<UpdateAck, AppError>;

    async fn delete_one(&self, collection: &str, id: &str) -> Result<DeleteAck, AppError>;
}

/// Open the backend selected by configuration.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, AppError> {
    match config {
        StoreConfig::Mongo { uri, db_name } => Ok(Arc::new(MongoStore::connect(uri, db_name).await?)),
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory document store, data will not persist");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
