// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication middleware.
//!
//! The gate only establishes *who* is calling. Whether that caller may see
//! a given resource is decided by each handler through [`ensure_owner`].

use crate::error::AppError;
use crate::services::Claims;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Middleware that requires a valid session token cookie.
///
/// On success the decoded [`Claims`] are available to handlers as an
/// `Extension<Claims>`.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(cookie) = jar.get(TOKEN_COOKIE) else {
        tracing::debug!(path = %request.uri().path(), "Rejected request without token cookie");
        return Err(AppError::Unauthorized);
    };

    let claims = state.tokens.validate(cookie.value()).map_err(|_| {
        tracing::warn!(path = %request.uri().path(), "Rejected request with invalid token");
        AppError::Unauthorized
    })?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Check that the authenticated identity owns the resource named by `email`.
pub fn ensure_owner(claims: &Claims, email: &str) -> Result<(), AppError> {
    if claims.email != email {
        tracing::warn!(
            token_email = %claims.email,
            requested_email = %email,
            "Forbidden cross-user access"
        );
        return Err(AppError::Forbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(email: &str) -> Claims {
        Claims {
            email: email.to_string(),
            iat: 0,
            exp: 0,
        }
    }

    #[test]
    fn test_owner_matches() {
        assert!(ensure_owner(&claims("a@example.com"), "a@example.com").is_ok());
    }

    #[test]
    fn test_owner_mismatch_is_forbidden() {
        assert!(matches!(
            ensure_owner(&claims("a@example.com"), "b@example.com"),
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            ensure_owner(&claims("a@example.com"), "A@example.com"),
            Err(AppError::Forbidden)
        ));
    }
}
