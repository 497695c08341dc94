// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FixNexus: repair service marketplace backend
//!
//! This crate provides the HTTP API for listing repair services, booking
//! them, and tracking bookings, with cookie-based session authentication.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod services;

use config::Config;
use db::DocumentStore;
use services::TokenService;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        let tokens = TokenService::new(&config.access_token_secret);
        Self {
            config,
            store,
            tokens,
        }
    }
}
