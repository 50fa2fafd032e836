// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Applies the guard to a whole router subtree. On success the verified
//! [`AuthContext`](super::AuthContext) is stored in the request's extensions,
//! where the [`Auth`](super::Auth) extractor picks it up without verifying
//! the token a second time.
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/session", get(get_session))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use super::AuthError;
use crate::state::AppState;

/// Reject unauthenticated requests and attach the context to the rest.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let ctx = state.guard.verify_header(auth_header).await?;

    tracing::debug!(
        user_id = ctx.id(),
        session_id = ctx.session_id(),
        path = request.uri().path(),
        "Request authenticated"
    );

    request.extensions_mut().insert(ctx);
    Ok(next.run(request).await)
}
