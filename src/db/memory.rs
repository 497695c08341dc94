// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store.
//!
//! Each collection is a vector kept in insertion order. Used for local
//! development (`STORE_BACKEND=memory`) and by the test suite.

use crate::db::{DocumentStore, Filter, Page};
use crate::error::AppError;
use crate::models::{DeleteAck, Document, InsertAck, UpdateAck, ID_FIELD};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn id_of(doc: &Document) -> Option<String> {
    match doc.get(ID_FIELD)? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Apply `fields` on top of `target`, returning whether anything changed.
fn merge_into(target: &mut Document, fields: Document) -> bool {
    let mut changed = false;
    for (key, value) in fields {
        if key == ID_FIELD {
            continue;
        }
        if target.get(&key) != Some(&value) {
            target.insert(key, value);
            changed = true;
        }
    }
    changed
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        page: Option<Page>,
    ) -> Result<Vec<Document>, AppError> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let matching = docs.iter().filter(|d| filter.matches(d));
        let result: Vec<Document> = match page {
            Some(Page { skip, limit }) => {
                let limit = if limit == 0 {
                    usize::MAX
                } else {
                    usize::try_from(limit).unwrap_or(usize::MAX)
                };
                matching
                    .skip(usize::try_from(skip).unwrap_or(usize::MAX))
                    .take(limit)
                    .cloned()
                    .collect()
            }
            None => matching.cloned().collect(),
        };
        Ok(result)
    }

    async fn find_one(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| id_of(d).as_deref() == Some(id)))
            .cloned())
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, AppError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).count() as u64)
            .unwrap_or(0))
    }

    async fn insert_one(&self, collection: &str, mut doc: Document) -> Result<InsertAck, AppError> {
        let id = id_of(&doc).unwrap_or_else(|| ObjectId::new().to_hex());
        doc.insert(ID_FIELD.to_string(), Value::String(id.clone()));

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|d| id_of(d).as_deref() == Some(id.as_str())) {
            return Err(AppError::Database(format!(
                "duplicate key {} in collection {}",
                id, collection
            )));
        }
        docs.push(doc);

        Ok(InsertAck {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn replace_or_insert(
        &self,
        collection: &str,
        id: &str,
        doc: Document,
    ) -> Result<UpdateAck, AppError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(existing) = docs.iter_mut().find(|d| id_of(d).as_deref() == Some(id)) {
            let changed = merge_into(existing, doc);
            return Ok(UpdateAck::matched(1, changed as u64));
        }

        let mut created = Document::new();
        created.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        merge_into(&mut created, doc);
        docs.push(created);

        Ok(UpdateAck::upserted(id.to_string()))
    }

    async fn merge_fields(
        &self,
        collection: &str,
        id: &str,
        partial: Document,
    ) -> Result<UpdateAck, AppError> {
        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| id_of(d).as_deref() == Some(id)));

        Ok(match existing {
            Some(existing) => {
                let changed = merge_into(existing, partial);
                UpdateAck::matched(1, changed as u64)
            }
            None => UpdateAck::matched(0, 0),
        })
    }

    async fn delete_one(&self, collection: &str, id: &str) -> Result<DeleteAck, AppError> {
        let mut collections = self.collections.write().await;
        let position = collections
            .get(collection)
            .and_then(|docs| docs.iter().position(|d| id_of(d).as_deref() == Some(id)));

        let deleted_count = match (position, collections.get_mut(collection)) {
            (Some(index), Some(docs)) => {
                docs.remove(index);
                1
            }
            _ => 0,
        };

        Ok(DeleteAck {
            acknowledged: true,
            deleted_count,
        })
    }
}
