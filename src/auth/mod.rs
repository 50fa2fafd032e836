// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer token verification and the per-request [`AuthContext`].
//!
//! ## Auth Flow
//!
//! 1. Client sends `Authorization: Bearer <session JWT>`
//! 2. [`TokenGuard`] verifies signature, expiry, issuer and audience
//!    (HS256 shared secret or JWKS-published keys)
//! 3. Claims are projected into an [`AuthContext`]:
//!    - `sub` → `id`
//!    - `email` → `email`
//!    - `admin` → `is_admin` (absent means false)
//!    - `sid` → `session_id`
//!    - `did` → `device_id`
//! 4. Handlers receive the context through the [`Auth`] / [`AdminOnly`]
//!    extractors, or via [`middleware::require_auth`] for a whole subtree
//!
//! Clock skew tolerance is 60 seconds.

pub mod claims;
pub mod context;
pub mod error;
pub mod extractor;
pub mod guard;
pub mod jwks;
pub mod middleware;

pub use claims::SessionClaims;
pub use context::{AuthContext, ContextError};
pub use error::AuthError;
pub use extractor::{AdminOnly, Auth, OptionalAuth};
pub use guard::{KeySource, TokenGuard};
pub use jwks::JwksManager;
