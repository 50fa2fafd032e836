// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token guard.
//!
//! The guard is the only producer of [`AuthContext`] values. It verifies a
//! session token (signature, expiry, issuer, audience) and projects its
//! claims into a context. It never issues tokens.

use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};

use super::{AuthContext, AuthError, JwksManager, SessionClaims};

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Where verification keys come from.
#[derive(Clone)]
pub enum KeySource {
    /// HS256 shared secret.
    Secret(DecodingKey),
    /// Asymmetric keys published at a JWKS endpoint.
    Jwks(JwksManager),
}

impl KeySource {
    /// Shared-secret key source.
    pub fn secret(secret: &[u8]) -> Self {
        KeySource::Secret(DecodingKey::from_secret(secret))
    }
}

/// Verifies session tokens and produces [`AuthContext`] values.
#[derive(Clone)]
pub struct TokenGuard {
    keys: KeySource,
    issuer: Option<String>,
    audience: Option<String>,
}

impl TokenGuard {
    pub fn new(keys: KeySource, issuer: Option<String>, audience: Option<String>) -> Self {
        Self {
            keys,
            issuer,
            audience,
        }
    }

    /// The JWKS manager, when running with asymmetric keys.
    pub fn jwks(&self) -> Option<&JwksManager> {
        match &self.keys {
            KeySource::Jwks(jwks) => Some(jwks),
            KeySource::Secret(_) => None,
        }
    }

    /// Verify the value of an `Authorization` header.
    pub async fn verify_header(&self, header: &str) -> Result<AuthContext, AuthError> {
        let token = bearer_token(header)?;
        self.verify(token).await
    }

    /// Verify a raw token and build the request context.
    pub async fn verify(&self, token: &str) -> Result<AuthContext, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;

        let (decoding_key, algorithm) = match &self.keys {
            KeySource::Secret(key) => (key.clone(), Algorithm::HS256),
            KeySource::Jwks(jwks) => match &header.kid {
                Some(kid) => jwks.get_decoding_key(kid).await?,
                None => jwks.get_any_decoding_key().await?,
            },
        };

        let validation = self.validation(algorithm);
        let token_data = decode::<SessionClaims>(token, &decoding_key, &validation)?;

        let context = AuthContext::try_from(token_data.claims)?;
        tracing::debug!(
            user_id = context.id(),
            session_id = context.session_id(),
            device_id = context.device_id(),
            "Token verified"
        );
        Ok(context)
    }

    fn validation(&self, algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.validate_nbf = true;

        if let Some(ref issuer) = self.issuer {
            validation.set_issuer(&[issuer]);
        }

        if let Some(ref audience) = self.audience {
            validation.set_audience(&[audience]);
        } else {
            validation.validate_aud = false;
        }

        validation
    }
}

/// Extract the token from a `Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Result<&str, AuthError> {
    let token = header
        .trim()
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }
    Ok(token)
}
