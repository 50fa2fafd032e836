// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Admin-only API endpoints.
//!
//! Access is decided by the `is_admin` flag of the request's auth context.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{auth::AdminOnly, error::ApiError, profile::UserProfile, state::AppState};

/// Look up any user's profile.
#[utoipa::path(
    get,
    path = "/v1/admin/users/{user_id}",
    tag = "Admin",
    security(("bearer" = [])),
    params(
        ("user_id" = String, Path, description = "User ID to look up")
    ),
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 403, description = "Forbidden - admin flag not set"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn get_user(
    AdminOnly(admin): AdminOnly,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    tracing::info!(
        admin_id = admin.id(),
        session_id = admin.session_id(),
        target_user_id = %user_id,
        "Admin profile lookup"
    );

    let profiles = state.profiles.read().await;
    let profile = profiles.get(&user_id)?;
    Ok(Json(profile))
}
