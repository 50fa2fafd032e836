// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `AUTH_JWKS_URL` | JWKS endpoint for asymmetric token verification | - |
//! | `AUTH_JWT_SECRET` | HS256 shared secret for token verification | - |
//! | `AUTH_ISSUER` | Expected JWT issuer claim | Not checked |
//! | `AUTH_AUDIENCE` | Expected JWT audience claim | Not checked |
//! | `SEED_PROFILES` | Path to a JSON array of user profiles | - |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! One of `AUTH_JWKS_URL` or `AUTH_JWT_SECRET` is required. When both are
//! set the JWKS endpoint is used.

use std::net::SocketAddr;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const JWKS_URL_ENV: &str = "AUTH_JWKS_URL";
pub const JWT_SECRET_ENV: &str = "AUTH_JWT_SECRET";
pub const ISSUER_ENV: &str = "AUTH_ISSUER";
pub const AUDIENCE_ENV: &str = "AUTH_AUDIENCE";
pub const SEED_PROFILES_ENV: &str = "SEED_PROFILES";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("one of AUTH_JWKS_URL or AUTH_JWT_SECRET must be set")]
    MissingKeySource,
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// How token signatures are verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyConfig {
    Jwks(String),
    Secret(String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var(LOG_FORMAT_ENV) {
            Ok(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub keys: KeyConfig,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub seed_profiles: Option<String>,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: PORT_ENV,
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let addr_str = format!("{host}:{port}");
        let addr = addr_str
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                name: HOST_ENV,
                value: host,
            })?;

        let keys = match (get(JWKS_URL_ENV), get(JWT_SECRET_ENV)) {
            (Some(url), _) => KeyConfig::Jwks(url),
            (None, Some(secret)) => KeyConfig::Secret(secret),
            (None, None) => return Err(ConfigError::MissingKeySource),
        };

        Ok(Self {
            addr,
            keys,
            issuer: get(ISSUER_ENV),
            audience: get(AUDIENCE_ENV),
            seed_profiles: get(SEED_PROFILES_ENV),
        })
    }
}
