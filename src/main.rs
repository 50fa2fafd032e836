// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use relational_auth_context::{
    api::router,
    auth::{JwksManager, KeySource, TokenGuard},
    config::{AppConfig, KeyConfig, LogFormat},
    profile::ProfileDirectory,
    state::AppState,
    telemetry::init_tracing,
};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing(LogFormat::from_env());

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server exited with error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    let keys = match &config.keys {
        KeyConfig::Jwks(url) => {
            tracing::info!(jwks_url = %url, "Verifying tokens against JWKS");
            KeySource::Jwks(JwksManager::new(url.clone())?)
        }
        KeyConfig::Secret(secret) => {
            tracing::info!("Verifying tokens with shared HS256 secret");
            KeySource::secret(secret.as_bytes())
        }
    };
    let guard = TokenGuard::new(keys, config.issuer.clone(), config.audience.clone());

    let profiles = match &config.seed_profiles {
        Some(path) => {
            let json = tokio::fs::read_to_string(path).await?;
            let profiles = ProfileDirectory::from_json(&json)?;
            tracing::info!(path = %path, count = profiles.len(), "Seeded user profiles");
            profiles
        }
        None => ProfileDirectory::new(),
    };

    let app = router(AppState::new(guard, profiles));

    let shutdown = CancellationToken::new();
    tokio::spawn(watch_signals(shutdown.clone()));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "Auth context server listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

/// Cancel `shutdown` on Ctrl-C or SIGTERM.
async fn watch_signals(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
    shutdown.cancel();
}
