// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.
//!
//! Services and booked services are schemaless: callers send arbitrary JSON
//! objects and the store persists them verbatim. Only the fields the server
//! filters on are named here.

pub mod ack;

pub use ack::{DeleteAck, InsertAck, UpdateAck};

/// A stored document as seen by handlers and clients.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Document key holding the store-assigned identifier.
pub const ID_FIELD: &str = "_id";

/// Field names referenced by queries.
pub mod fields {
    /// Service title, matched by the search filter.
    pub const SERVICE_NAME: &str = "serviceName";
    /// Owning provider of a service, and the provider fulfilling a booking.
    pub const PROVIDER_EMAIL: &str = "providerEmail";
    /// Customer who booked a service.
    pub const USER_EMAIL: &str = "userEmail";
}
