// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Full user records, keyed by the same id as [`AuthContext`].
//!
//! The auth context only carries the facts known at authentication time.
//! Handlers that need profile data, or the *current* admin flag, look the
//! user up here.
//!
//! [`AuthContext`]: crate::auth::AuthContext

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;

/// A user's full profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    /// User ID (same as the auth context `id`)
    pub id: String,
    /// Email address
    pub email: String,
    /// Name shown in the UI
    pub display_name: String,
    /// Current admin flag (may differ from a token issued earlier)
    pub is_admin: bool,
    /// When the profile was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        display_name: impl Into<String>,
        is_admin: bool,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: display_name.into(),
            is_admin,
            created_at: Utc::now(),
        }
    }
}

/// In-memory user directory.
#[derive(Default)]
pub struct ProfileDirectory {
    profiles: HashMap<String, UserProfile>,
}

impl ProfileDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from a JSON array of profiles.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let profiles: Vec<UserProfile> = serde_json::from_str(json)?;
        let mut directory = Self::new();
        for profile in profiles {
            directory.upsert(profile);
        }
        Ok(directory)
    }

    /// Insert or replace a profile, returning the previous one.
    pub fn upsert(&mut self, profile: UserProfile) -> Option<UserProfile> {
        self.profiles.insert(profile.id.clone(), profile)
    }

    pub fn get(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        self.profiles
            .get(user_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("User not found"))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn get_returns_inserted_profile() {
        let mut directory = ProfileDirectory::new();
        directory.upsert(UserProfile::new("u1", "a@x.com", "Ada", false));

        let profile = directory.get("u1").unwrap();
        assert_eq!(profile.display_name, "Ada");
        assert_eq!(profile.email, "a@x.com");
    }

    #[test]
    fn get_unknown_user_is_not_found() {
        let directory = ProfileDirectory::new();
        let err = directory.get("ghost").unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn upsert_replaces_existing_profile() {
        let mut directory = ProfileDirectory::new();
        directory.upsert(UserProfile::new("u1", "a@x.com", "Ada", false));
        let previous = directory.upsert(UserProfile::new("u1", "a@x.com", "Ada", true));

        assert!(previous.is_some_and(|p| !p.is_admin));
        assert!(directory.get("u1").unwrap().is_admin);
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn from_json_loads_profiles() {
        let json = r#"[
            {"id":"u1","email":"a@x.com","display_name":"Ada","is_admin":false},
            {"id":"u2","email":"b@x.com","display_name":"Bob","is_admin":true,
             "created_at":"2026-01-01T00:00:00Z"}
        ]"#;
        let directory = ProfileDirectory::from_json(json).unwrap();

        assert_eq!(directory.len(), 2);
        assert!(directory.get("u2").unwrap().is_admin);
    }

    #[test]
    fn from_json_rejects_invalid_input() {
        assert!(ProfileDirectory::from_json("{}").is_err());
    }
}
