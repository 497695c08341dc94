// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! MongoDB-backed document store.
//!
//! Documents cross the boundary as JSON objects. On the way out, the
//! ObjectId `_id` is flattened to its hex string so clients can round-trip
//! it through the `/{id}` routes.

use crate::db::{DocumentStore, Filter, Page};
use crate::error::AppError;
use crate::models::{DeleteAck, Document, InsertAck, UpdateAck, ID_FIELD};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Bson};
use mongodb::{Client, Collection, Database};

/// MongoDB database handle. Cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect and verify the deployment answers a ping.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, AppError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to MongoDB: {}", e)))?;

        let db = client.database(db_name);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::Database(format!("MongoDB ping failed: {}", e)))?;

        tracing::info!(database = db_name, "Connected to MongoDB");

        Ok(Self { db })
    }

    fn collection(&self, name: &str) -> Collection<bson::Document> {
        self.db.collection(name)
    }
}

/// Match a document by id. Ids that are not 24-hex ObjectIds are compared
/// as plain strings.
fn id_filter(id: &str) -> bson::Document {
    match ObjectId::parse_str(id) {
        Ok(oid) => doc! { ID_FIELD: oid },
        Err(_) => doc! { ID_FIELD: id },
    }
}

fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.into_relaxed_extjson().to_string(),
    }
}

/// Escape regex metacharacters so the search term matches literally.
fn escape_regex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if "\\.+*?()|[]{}^$#&-~/".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn filter_to_bson(filter: &Filter) -> bson::Document {
    match filter {
        Filter::All => doc! {},
        Filter::Equals { field, value } => doc! { *field: value.as_str() },
        Filter::ContainsIgnoreCase { field, needle } => doc! {
            *field: { "$regex": escape_regex(needle), "$options": "i" }
        },
    }
}

fn to_bson_document(doc: &Document) -> Result<bson::Document, AppError> {
    bson::to_document(doc).map_err(|e| AppError::Database(format!("Invalid document: {}", e)))
}

/// Document to insert. A caller-supplied `_id` that is a 24-hex string is
/// stored as an ObjectId so [`id_filter`] finds it again.
fn insert_document(doc: &Document) -> Result<bson::Document, AppError> {
    let mut out = to_bson_document(doc)?;
    if let Some(Bson::String(id)) = out.get(ID_FIELD) {
        if let Ok(oid) = ObjectId::parse_str(id) {
            out.insert(ID_FIELD, oid);
        }
    }
    Ok(out)
}

/// Body of a `$set` update. `_id` is immutable and dropped.
fn set_fields(doc: &Document) -> Result<bson::Document, AppError> {
    let mut fields = to_bson_document(doc)?;
    fields.remove(ID_FIELD);
    Ok(doc! { "$set": fields })
}

fn from_bson_document(mut doc: bson::Document) -> Document {
    let id = doc.remove(ID_FIELD);
    let mut out = match Bson::Document(doc).into_relaxed_extjson() {
        serde_json::Value::Object(map) => map,
        _ => Document::new(),
    };
    if let Some(id) = id {
        out.insert(ID_FIELD.to_string(), serde_json::Value::String(id_to_string(id)));
    }
    out
}

fn db_err(e: mongodb::error::Error) -> AppError {
    AppError::Database(e.to_string())
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        page: Option<Page>,
    ) -> Result<Vec<Document>, AppError> {
        // Unsorted: natural order follows insertion, whatever type `_id` has.
        let coll = self.collection(collection);
        let mut find = coll.find(filter_to_bson(filter));

        if let Some(Page { skip, limit }) = page {
            find = find
                .skip(skip)
                .limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let docs: Vec<bson::Document> = find
            .await
            .map_err(db_err)?
            .try_collect()
            .await
            .map_err(db_err)?;

        Ok(docs.into_iter().map(from_bson_document).collect())
    }

    async fn find_one(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        let doc = self
            .collection(collection)
            .find_one(id_filter(id))
            .await
            .map_err(db_err)?;
        Ok(doc.map(from_bson_document))
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, AppError> {
        self.collection(collection)
            .count_documents(filter_to_bson(filter))
            .await
            .map_err(db_err)
    }

    async fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertAck, AppError> {
        let result = self
            .collection(collection)
            .insert_one(insert_document(&doc)?)
            .await
            .map_err(db_err)?;

        Ok(InsertAck {
            acknowledged: true,
            inserted_id: id_to_string(result.inserted_id),
        })
    }

    async fn replace_or_insert(
        &self,
        collection: &str,
        id: &str,
        doc: Document,
    ) -> Result<UpdateAck, AppError> {
        let result = self
            .collection(collection)
            .update_one(id_filter(id), set_fields(&doc)?)
            .upsert(true)
            .await
            .map_err(db_err)?;

        Ok(match result.upserted_id {
            Some(upserted) => UpdateAck::upserted(id_to_string(upserted)),
            None => UpdateAck::matched(result.matched_count, result.modified_count),
        })
    }

    async fn merge_fields(
        &self,
        collection: &str,
        id: &str,
        partial: Document,
    ) -> Result<UpdateAck, AppError> {
        let result = self
            .collection(collection)
            .update_one(id_filter(id), set_fields(&partial)?)
            .await
            .map_err(db_err)?;

        Ok(UpdateAck::matched(result.matched_count, result.modified_count))
    }

    async fn delete_one(&self, collection: &str, id: &str) -> Result<DeleteAck, AppError> {
        let result = self
            .collection(collection)
            .delete_one(id_filter(id))
            .await
            .map_err(db_err)?;

        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields;

    #[test]
    fn test_id_filter_prefers_object_id() {
        let hex = "65f1c0ffee0000000000beef";
        let filter = id_filter(hex);
        assert_eq!(
            filter.get(ID_FIELD),
            Some(&Bson::ObjectId(ObjectId::parse_str(hex).unwrap()))
        );

        let filter = id_filter("not-an-object-id");
        assert_eq!(
            filter.get(ID_FIELD),
            Some(&Bson::String("not-an-object-id".to_string()))
        );
    }

    #[test]
    fn test_search_regex_is_escaped_and_case_insensitive() {
        let filter = filter_to_bson(&Filter::ContainsIgnoreCase {
            field: fields::SERVICE_NAME,
            needle: "a.c (1)".to_string(),
        });
        let clause = filter.get_document(fields::SERVICE_NAME).unwrap();
        assert_eq!(clause.get_str("$regex").unwrap(), r"a\.c \(1\)");
        assert_eq!(clause.get_str("$options").unwrap(), "i");

        assert!(filter_to_bson(&Filter::All).is_empty());
    }

    #[test]
    fn test_set_fields_drops_id() {
        let doc: Document = serde_json::json!({"_id": "x", "status": "done"})
            .as_object()
            .cloned()
            .unwrap();
        let update = set_fields(&doc).unwrap();
        let set = update.get_document("$set").unwrap();
        assert!(!set.contains_key(ID_FIELD));
        assert_eq!(set.get_str("status").unwrap(), "done");
    }

    #[test]
    fn test_insert_document_normalizes_hex_id() {
        let hex = "65f1c0ffee0000000000beef";
        let doc: Document = serde_json::json!({"_id": hex, "serviceName": "Roof"})
            .as_object()
            .cloned()
            .unwrap();
        let stored = insert_document(&doc).unwrap();
        assert_eq!(
            stored.get(ID_FIELD),
            Some(&Bson::ObjectId(ObjectId::parse_str(hex).unwrap()))
        );
        assert_eq!(stored.get(ID_FIELD), id_filter(hex).get(ID_FIELD));

        let doc: Document = serde_json::json!({"_id": "custom-id"})
            .as_object()
            .cloned()
            .unwrap();
        let stored = insert_document(&doc).unwrap();
        assert_eq!(stored.get_str(ID_FIELD).unwrap(), "custom-id");
    }

    #[test]
    fn test_from_bson_flattens_object_id() {
        let oid = ObjectId::new();
        let json = from_bson_document(doc! { "_id": oid, "serviceName": "Roof" });
        assert_eq!(json[ID_FIELD], oid.to_hex());
        assert_eq!(json["serviceName"], "Roof");
    }
}
