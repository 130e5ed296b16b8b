// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Unauthenticated probes for orchestrators and load balancers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;
use crate::storage::StorageError;

/// Outcome of a single dependency probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Degraded,
    Unavailable,
    Timeout,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    pub service: CheckStatus,
    /// Write-then-read probe of the data directory.
    pub storage: CheckStatus,
}

/// Readiness report: `ok` only when every check passed.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    pub status: CheckStatus,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: CheckStatus,
    pub version: String,
}

async fn probe_storage(state: &AppState) -> CheckStatus {
    match state
        .with_storage(|storage| storage.health_check())
        .await
    {
        Ok(()) => CheckStatus::Ok,
        Err(StorageError::Timeout(_)) => {
            tracing::warn!("Storage probe exceeded the store deadline");
            CheckStatus::Timeout
        }
        Err(e) => {
            tracing::warn!(error = %e, "Storage probe failed");
            CheckStatus::Unavailable
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "All checks passed", body = ReadyResponse),
        (status = 503, description = "Store unreachable or slow", body = ReadyResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let storage = probe_storage(&state).await;
    let (code, status) = match storage {
        CheckStatus::Ok => (StatusCode::OK, CheckStatus::Ok),
        _ => (StatusCode::SERVICE_UNAVAILABLE, CheckStatus::Degraded),
    };

    (
        code,
        Json(ReadyResponse {
            status,
            checks: HealthChecks {
                service: CheckStatus::Ok,
                storage,
            },
        }),
    )
}

/// Process liveness. Never touches the store.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses((status = 200, description = "Process is up", body = HealthResponse))
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: CheckStatus::Ok,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Ready for traffic", body = ReadyResponse),
        (status = 503, description = "Not ready", body = ReadyResponse)
    )
)]
pub async fn readiness(state: State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    health(state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenCodec;
    use crate::storage::{FileStorage, StoragePaths};
    use tempfile::TempDir;

    fn state_at(dir: &TempDir, initialize: bool) -> AppState {
        let mut storage = FileStorage::new(StoragePaths::new(dir.path()));
        if initialize {
            storage.initialize().unwrap();
        }
        AppState::new(storage, TokenCodec::new(b"probe-secret"))
    }

    #[tokio::test]
    async fn ready_when_store_is_writable() {
        let dir = TempDir::new().unwrap();
        let (code, Json(report)) = health(State(state_at(&dir, true))).await;

        assert_eq!(code, StatusCode::OK);
        assert_eq!(report.status, CheckStatus::Ok);
        assert_eq!(report.checks.storage, CheckStatus::Ok);
    }

    #[tokio::test]
    async fn uninitialized_store_reports_degraded() {
        let dir = TempDir::new().unwrap();
        let (code, Json(report)) = readiness(State(state_at(&dir, false))).await;

        assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(report.status, CheckStatus::Degraded);
        assert_eq!(report.checks.storage, CheckStatus::Unavailable);
    }

    #[tokio::test]
    async fn liveness_reports_version() {
        let Json(body) = liveness().await;
        assert_eq!(body.status, CheckStatus::Ok);
        assert_eq!(
            serde_json::to_value(&body).unwrap()["version"],
            env!("CARGO_PKG_VERSION")
        );
    }
}
