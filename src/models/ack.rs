// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Write acknowledgements returned by mutation endpoints.
//!
//! Field names follow the MongoDB driver result objects the web client
//! already reads (`insertedId`, `deletedCount`, ...).

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Result of inserting a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: String,
}

/// Result of an update or upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UpdateAck {
    pub acknowledged: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub matched_count: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub modified_count: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub upserted_count: u64,
    /// Set only when the update created a new document.
    pub upserted_id: Option<String>,
}

impl UpdateAck {
    pub fn matched(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: 0,
            upserted_id: None,
        }
    }

    pub fn upserted(id: String) -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(id),
        }
    }
}

/// Result of deleting by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteAck {
    pub acknowledged: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub deleted_count: u64,
}
