// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational Auth Context - Request Authentication Guard
//!
//! Verifies bearer session tokens and hands each request handler an
//! immutable [`auth::AuthContext`] carrying the caller's user id, email,
//! admin flag, session id and device id.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token guard, auth context and extractors
//! - `profile` - Full user records, looked up by context id

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod profile;
pub mod state;
pub mod telemetry;
