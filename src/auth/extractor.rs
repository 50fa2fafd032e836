// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for the request auth context.
//!
//! Handlers receive the context as an explicit parameter:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(ctx): Auth) -> impl IntoResponse {
//!     // ctx is AuthContext
//! }
//! ```

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{AuthContext, AuthError};
use crate::state::AppState;

/// Extractor for authenticated requests.
///
/// Uses the context stored by [`require_auth`](super::middleware::require_auth)
/// when present, otherwise verifies the `Authorization` header itself.
///
/// # Example
///
/// ```rust,ignore
/// async fn get_session(Auth(ctx): Auth) -> Json<AuthContext> {
///     Json(ctx)
/// }
/// ```
pub struct Auth(pub AuthContext);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<AuthContext>().cloned() {
            return Ok(Auth(ctx));
        }

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let ctx = state.guard.verify_header(auth_header).await?;
        Ok(Auth(ctx))
    }
}

/// Extractor that requires the admin flag.
///
/// Only the flag carried by the context is checked; it reflects the moment
/// the token was issued.
pub struct AdminOnly(pub AuthContext);

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Auth(ctx) = Auth::from_request_parts(parts, state).await?;

        if !ctx.is_admin() {
            tracing::warn!(
                user_id = ctx.id(),
                session_id = ctx.session_id(),
                "Non-admin request to admin endpoint"
            );
            return Err(AuthError::InsufficientPermissions);
        }

        Ok(AdminOnly(ctx))
    }
}

/// Optional authentication extractor.
///
/// `None` means the request is not authenticated.
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match Auth::from_request_parts(parts, state).await {
            Ok(Auth(ctx)) => Ok(OptionalAuth(Some(ctx))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::guard::test_support::{claims, guard, sign};
    use crate::profile::ProfileDirectory;
    use axum::http::Request;

    fn create_test_state() -> AppState {
        AppState::new(guard(), ProfileDirectory::new())
    }

    fn parts_with(header: Option<String>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = header {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn auth_extractor_requires_auth_header() {
        let state = create_test_state();
        let mut parts = parts_with(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn auth_extractor_succeeds_with_jwt() {
        let state = create_test_state();
        let token = sign(&claims("user_123", "sess_1", false));
        let mut parts = parts_with(Some(format!("Bearer {token}")));

        let Auth(ctx) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(ctx.id(), "user_123");
        assert_eq!(ctx.session_id(), "sess_1");
    }

    #[tokio::test]
    async fn auth_extractor_prefers_extensions() {
        let state = create_test_state();
        let mut parts = parts_with(None);

        let ctx = AuthContext::new("from_middleware", "m@x.com", true, "s1", "d1").unwrap();
        parts.extensions.insert(ctx.clone());

        let Auth(extracted) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(extracted, ctx);
    }

    #[tokio::test]
    async fn admin_only_rejects_non_admin() {
        let state = create_test_state();
        let mut parts = parts_with(None);
        parts
            .extensions
            .insert(AuthContext::new("user_123", "u@x.com", false, "s1", "d1").unwrap());

        let result = AdminOnly::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InsufficientPermissions)));
    }

    #[tokio::test]
    async fn admin_only_accepts_admin_token() {
        let state = create_test_state();
        let token = sign(&claims("root", "s1", true));
        let mut parts = parts_with(Some(format!("Bearer {token}")));

        let AdminOnly(ctx) = AdminOnly::from_request_parts(&mut parts, &state).await.unwrap();
        assert!(ctx.is_admin());
    }

    #[tokio::test]
    async fn optional_auth_returns_none_without_user() {
        let state = create_test_state();
        let mut parts = parts_with(None);

        let OptionalAuth(ctx) = OptionalAuth::from_request_parts(&mut parts, &state).await.unwrap();
        assert!(ctx.is_none());
    }

    #[tokio::test]
    async fn optional_auth_returns_none_for_invalid_token() {
        let state = create_test_state();
        let mut parts = parts_with(Some("Bearer garbage".to_string()));

        let OptionalAuth(ctx) = OptionalAuth::from_request_parts(&mut parts, &state).await.unwrap();
        assert!(ctx.is_none());
    }
}
