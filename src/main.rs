// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;
use std::time::Duration;

use axum_server::{tls_rustls::RustlsConfig, Handle};
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use hotel_reservation::{
    api::router,
    auth::{password::hash_password, TokenCodec},
    config::{ServerConfig, DEFAULT_LOG_FILTER, LOG_FORMAT_ENV},
    state::AppState,
    storage::{FileStorage, StorageError, StoragePaths, StoredUser, UserRepository},
};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

/// Create the configured admin account unless the email is already taken.
async fn seed_admin(state: &AppState, email: String, password: String) -> Result<(), String> {
    let cost = state.bcrypt_cost;
    let hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())?;

    let now = Utc::now();
    let created = state
        .with_storage(move |storage| {
            let users = UserRepository::new(storage);
            if users.find_by_email(&email)?.is_some() {
                return Ok::<_, StorageError>(None);
            }
            let admin = StoredUser {
                id: Uuid::new_v4().to_string(),
                first_name: "Admin".to_string(),
                last_name: "Account".to_string(),
                email,
                encrypted_password: hash,
                is_admin: true,
                created_at: now,
            };
            match users.create(&admin) {
                Ok(()) => Ok(Some(admin.id)),
                Err(StorageError::AlreadyExists(_)) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(|e| e.to_string())?;

    match created {
        Some(id) => tracing::info!(user_id = %id, "Seeded admin account"),
        None => tracing::debug!("Seed admin already present"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut storage = FileStorage::new(StoragePaths::new(&config.data_dir));
    if let Err(e) = storage.initialize() {
        tracing::error!(error = %e, data_dir = %config.data_dir.display(), "Failed to initialize storage");
        return ExitCode::FAILURE;
    }

    let tokens = TokenCodec::new(config.jwt_secret.as_bytes()).with_ttl(config.token_ttl);
    let state = AppState::new(storage, tokens)
        .with_store_timeout(config.store_timeout)
        .with_bcrypt_cost(config.bcrypt_cost);

    if let Some(seed) = config.seed_admin.clone() {
        if let Err(e) = seed_admin(&state, seed.email, seed.password).await {
            tracing::error!(error = %e, "Failed to seed admin account");
            return ExitCode::FAILURE;
        }
    }

    let app = router(state);

    let handle = Handle::new();
    let shutdown = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.graceful_shutdown(Some(SHUTDOWN_GRACE));
        }
    });

    let served = match &config.tls {
        Some(tls) => {
            if rustls::crypto::ring::default_provider()
                .install_default()
                .is_err()
            {
                tracing::warn!("rustls crypto provider was already installed");
            }
            let tls_config = match RustlsConfig::from_pem_file(&tls.cert, &tls.key).await {
                Ok(tls_config) => tls_config,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load TLS certificate");
                    return ExitCode::FAILURE;
                }
            };
            tracing::info!(addr = %config.addr, "Hotel reservation server listening on https (docs at /docs)");
            axum_server::bind_rustls(config.addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
        }
        None => {
            tracing::info!(addr = %config.addr, "Hotel reservation server listening on http (docs at /docs)");
            axum_server::bind(config.addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await
        }
    };

    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}
