// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{middleware::require_auth, AuthContext},
    profile::UserProfile,
    state::AppState,
};

pub mod admin;
pub mod health;
pub mod session;
pub mod users;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/session", get(session::get_session))
        .route("/users/me", get(users::get_current_user))
        .route("/admin/users/{user_id}", get(admin::get_user))
        .route_layer(from_fn_with_state(state.clone(), require_auth))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/session/status", get(session::session_status))
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(public_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        health::readiness,
        session::get_session,
        session::session_status,
        users::get_current_user,
        admin::get_user
    ),
    components(
        schemas(
            AuthContext,
            UserProfile,
            session::SessionStatusResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness checks"),
        (name = "Session", description = "Authentication context of the current request"),
        (name = "Users", description = "User profiles"),
        (name = "Admin", description = "Admin-only lookups")
    )
)]
struct ApiDoc;
