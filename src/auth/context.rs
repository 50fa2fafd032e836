// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The per-request authentication context.
//!
//! An [`AuthContext`] is the minimal identity and session record the guard
//! hands to downstream handlers. It is deliberately small: anything beyond
//! these five facts (display name, profile data, current privileges) lives in
//! the user directory and must be fetched by `id` when a handler needs it.
//!
//! Values reflect the moment of authentication. A context is never refreshed
//! or mutated after construction.

use serde::Serialize;
use utoipa::ToSchema;

/// Errors raised when constructing an [`AuthContext`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    /// A required identifier was empty or whitespace.
    #[error("auth context field `{0}` must not be empty")]
    EmptyField(&'static str),
}

/// Authenticated identity and session facts for one in-flight request.
///
/// All fields are required at construction and read-only afterwards. Two
/// contexts for the same user (same `id`) but different sessions or devices
/// are distinct values; equality compares every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    /// Unique user identifier, stable across sessions.
    id: String,
    /// User's email address (secondary identifier, not a key).
    email: String,
    /// Elevated-privilege flag as granted by the token authority.
    is_admin: bool,
    /// Identifier of the current login session.
    session_id: String,
    /// Identifier of the originating device.
    device_id: String,
}

impl AuthContext {
    /// Build a context from the five authenticated facts.
    ///
    /// Every string field must be non-empty.
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        is_admin: bool,
        session_id: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Result<Self, ContextError> {
        Ok(Self {
            id: non_empty("id", id.into())?,
            email: non_empty("email", email.into())?,
            is_admin,
            session_id: non_empty("sessionId", session_id.into())?,
            device_id: non_empty("deviceId", device_id.into())?,
        })
    }

    /// Unique user identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// User's email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Admin flag as granted when the token was issued.
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Current login session identifier.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Originating device identifier.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// True if both contexts belong to the same user, regardless of session.
    pub fn same_user(&self, other: &AuthContext) -> bool {
        self.id == other.id
    }
}

fn non_empty(field: &'static str, value: String) -> Result<String, ContextError> {
    if value.trim().is_empty() {
        Err(ContextError::EmptyField(field))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AuthContext {
        AuthContext::new("u1", "a@x.com", false, "s1", "d1").unwrap()
    }

    #[test]
    fn accessors_return_constructed_values() {
        let ctx = sample();
        assert_eq!(ctx.id(), "u1");
        assert_eq!(ctx.email(), "a@x.com");
        assert!(!ctx.is_admin());
        assert_eq!(ctx.session_id(), "s1");
        assert_eq!(ctx.device_id(), "d1");
    }

    #[test]
    fn admin_flag_is_preserved_in_both_states() {
        let admin = AuthContext::new("u1", "a@x.com", true, "s1", "d1").unwrap();
        assert!(admin.is_admin());
        assert!(!sample().is_admin());
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert_eq!(
            AuthContext::new("", "a@x.com", false, "s1", "d1"),
            Err(ContextError::EmptyField("id"))
        );
        assert_eq!(
            AuthContext::new("u1", " ", false, "s1", "d1"),
            Err(ContextError::EmptyField("email"))
        );
        assert_eq!(
            AuthContext::new("u1", "a@x.com", false, "", "d1"),
            Err(ContextError::EmptyField("sessionId"))
        );
        assert_eq!(
            AuthContext::new("u1", "a@x.com", false, "s1", "\t"),
            Err(ContextError::EmptyField("deviceId"))
        );
    }

    #[test]
    fn same_user_across_sessions_is_not_equal() {
        let first = sample();
        let second = AuthContext::new("u1", "a@x.com", false, "s2", "d2").unwrap();

        assert!(first.same_user(&second));
        assert_ne!(first, second);
        assert_ne!(first.session_id(), second.session_id());
        assert_ne!(first.device_id(), second.device_id());
    }

    #[test]
    fn serializes_exactly_five_camel_case_fields() {
        let value = serde_json::to_value(sample()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 5);
        assert_eq!(value["id"], "u1");
        assert_eq!(value["email"], "a@x.com");
        assert_eq!(value["isAdmin"], false);
        assert_eq!(value["sessionId"], "s1");
        assert_eq!(value["deviceId"], "d1");
    }

    #[test]
    fn clones_observe_the_original_values() {
        let ctx = sample();
        let copy = ctx.clone();
        assert_eq!(ctx, copy);
        assert_eq!(copy.is_admin(), ctx.is_admin());
    }
}
