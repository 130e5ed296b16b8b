// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{
    auth::{password::verify_password, AuthError, AuthenticatedUser},
    error::ApiError,
    models::{LoginRequest, LoginResponse},
    state::AppState,
    storage::{StorageError, UserRepository},
};

/// Exchange email and password for an API token.
///
/// Unknown email and wrong password are indistinguishable to the caller.
#[utoipa::path(
    post,
    path = "/api/auth",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = request.email.clone();
    let user = state
        .with_storage(move |storage| UserRepository::new(storage).find_by_email(&email))
        .await?;

    let Some(user) = user else {
        tracing::info!(email = %request.email, "Login for unknown email");
        return Err(AuthError::InvalidCredentials.into());
    };

    let password = request.password;
    let hash = user.encrypted_password.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| ApiError::from(StorageError::TaskFailed(e.to_string())))?;

    if !matches {
        tracing::info!(user_id = %user.id, "Login with wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state
        .tokens
        .issue(&AuthenticatedUser::from(&user), state.clock.now())?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(LoginResponse {
        user: user.into(),
        token,
    }))
}
