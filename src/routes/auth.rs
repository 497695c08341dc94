// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session cookie routes.

use axum::{extract::State, routing::get, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::config::Environment;
use crate::error::Result;
use crate::middleware::auth::TOKEN_COOKIE;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/jwt", post(issue_token))
        .route("/logout", get(logout))
}

/// Identity to embed in the session token.
#[derive(Deserialize)]
pub struct TokenRequest {
    email: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Build the session cookie with the attributes for `environment`.
///
/// Production serves the frontend from another site, so the cookie must be
/// `SameSite=None` (which browsers only accept together with `Secure`).
fn session_cookie(value: String, environment: Environment) -> Cookie<'static> {
    let builder = Cookie::build((TOKEN_COOKIE, value))
        .path("/")
        .http_only(true);

    let builder = if environment.is_production() {
        builder.secure(true).same_site(SameSite::None)
    } else {
        builder.secure(false).same_site(SameSite::Strict)
    };

    builder.build()
}

/// Issue a session token and hand it to the browser as an HTTP-only cookie.
async fn issue_token(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<TokenRequest>,
) -> Result<(CookieJar, Json<SuccessResponse>)> {
    let token = state.tokens.issue(&request.email)?;

    tracing::info!(email = %request.email, "Issued session token");

    let jar = jar.add(session_cookie(token, state.config.environment));
    Ok((jar, Json(SuccessResponse { success: true })))
}

/// Clear the session cookie. The token itself stays valid until it expires.
async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    let mut cookie = session_cookie(String::new(), state.config.environment);
    cookie.make_removal();

    (jar.add(cookie), Json(SuccessResponse { success: true }))
}
