// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session endpoints.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{Auth, AuthContext, OptionalAuth};

/// Response for GET /session/status
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionStatusResponse {
    /// Whether the request carried a valid session token
    pub authenticated: bool,
    /// The session context, when authenticated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<AuthContext>,
}

/// Get the authentication context of the current request.
///
/// Returns exactly the facts established when the token was verified.
#[utoipa::path(
    get,
    path = "/v1/session",
    tag = "Session",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current session context", body = AuthContext),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn get_session(Auth(ctx): Auth) -> Json<AuthContext> {
    Json(ctx)
}

/// Report whether the request is authenticated, without rejecting it.
#[utoipa::path(
    get,
    path = "/session/status",
    tag = "Session",
    responses(
        (status = 200, description = "Authentication status", body = SessionStatusResponse),
    )
)]
pub async fn session_status(OptionalAuth(ctx): OptionalAuth) -> Json<SessionStatusResponse> {
    Json(SessionStatusResponse {
        authenticated: ctx.is_some(),
        session: ctx,
    })
}
