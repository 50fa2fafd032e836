// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.
//!
//! The auth context only identifies the caller; profile data is fetched from
//! the directory by the context's `id`.

use axum::{extract::State, Json};

use crate::{auth::Auth, error::ApiError, profile::UserProfile, state::AppState};

/// Get the current user's full profile.
#[utoipa::path(
    get,
    path = "/v1/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "No profile for this user"),
    )
)]
pub async fn get_current_user(
    Auth(ctx): Auth,
    State(state): State<AppState>,
) -> Result<Json<UserProfile>, ApiError> {
    let profiles = state.profiles.read().await;
    let profile = profiles.get(ctx.id())?;
    Ok(Json(profile))
}
