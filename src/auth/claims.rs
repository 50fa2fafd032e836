// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token claims and their projection into [`AuthContext`].

use serde::{Deserialize, Serialize};

use super::{AuthContext, AuthError};

/// Claims carried by a session token.
///
/// Identity claims are optional at the serde level so that a token missing
/// one of them is reported as [`AuthError::IncompleteClaims`] rather than a
/// generic decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// User's email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Admin flag, absent means false
    #[serde(default)]
    pub admin: bool,

    /// Session ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,

    /// Device ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub did: Option<String>,

    /// Expiration timestamp
    #[serde(default)]
    pub exp: i64,

    /// Issued at timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Not before timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Audience (validated by jsonwebtoken, not read directly)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<serde_json::Value>,
}

impl TryFrom<SessionClaims> for AuthContext {
    type Error = AuthError;

    fn try_from(claims: SessionClaims) -> Result<Self, Self::Error> {
        let sub = claims.sub.ok_or(AuthError::IncompleteClaims("sub"))?;
        let email = claims.email.ok_or(AuthError::IncompleteClaims("email"))?;
        let sid = claims.sid.ok_or(AuthError::IncompleteClaims("sid"))?;
        let did = claims.did.ok_or(AuthError::IncompleteClaims("did"))?;

        AuthContext::new(sub, email, claims.admin, sid, did).map_err(AuthError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> SessionClaims {
        SessionClaims {
            sub: Some("user_123".to_string()),
            email: Some("user@example.com".to_string()),
            admin: false,
            sid: Some("sess_abc".to_string()),
            did: Some("dev_xyz".to_string()),
            exp: 1700003600,
            iat: Some(1700000000),
            nbf: None,
            iss: Some("https://auth.example.com".to_string()),
            aud: None,
        }
    }

    #[test]
    fn projects_all_identity_claims() {
        let ctx = AuthContext::try_from(sample_claims()).unwrap();
        assert_eq!(ctx.id(), "user_123");
        assert_eq!(ctx.email(), "user@example.com");
        assert!(!ctx.is_admin());
        assert_eq!(ctx.session_id(), "sess_abc");
        assert_eq!(ctx.device_id(), "dev_xyz");
    }

    #[test]
    fn admin_claim_defaults_to_false() {
        let json = r#"{"sub":"u1","email":"a@x.com","sid":"s1","did":"d1","exp":1}"#;
        let claims: SessionClaims = serde_json::from_str(json).unwrap();
        assert!(!claims.admin);

        let ctx = AuthContext::try_from(claims).unwrap();
        assert!(!ctx.is_admin());
    }

    #[test]
    fn admin_claim_is_carried_through() {
        let mut claims = sample_claims();
        claims.admin = true;
        let ctx = AuthContext::try_from(claims).unwrap();
        assert!(ctx.is_admin());
    }

    #[test]
    fn missing_device_claim_is_incomplete() {
        let mut claims = sample_claims();
        claims.did = None;
        let err = AuthContext::try_from(claims).unwrap_err();
        assert!(matches!(err, AuthError::IncompleteClaims("did")));
    }

    #[test]
    fn empty_session_claim_is_incomplete() {
        let mut claims = sample_claims();
        claims.sid = Some(String::new());
        let err = AuthContext::try_from(claims).unwrap_err();
        assert!(matches!(err, AuthError::IncompleteClaims("sid")));
    }

    #[test]
    fn empty_and_missing_claims_report_the_same_name() {
        let mut missing = sample_claims();
        missing.did = None;
        let mut empty = sample_claims();
        empty.did = Some("  ".to_string());

        let missing = AuthContext::try_from(missing).unwrap_err();
        let empty = AuthContext::try_from(empty).unwrap_err();
        assert_eq!(missing.to_string(), empty.to_string());
        assert_eq!(empty.to_string(), "Token is missing required claim `did`");
    }
}
