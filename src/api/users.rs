// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User account endpoints.
//!
//! Any authenticated caller may list and read accounts. Update and delete
//! are limited to the account owner or an admin.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    auth::{password::hash_password, Auth},
    error::ApiError,
    models::{CreateUserRequest, GenericResponse, UpdateUserRequest},
    state::AppState,
    storage::{
        OwnershipEnforcer, Pagination, StorageError, StoredUser, UserRepository, UserResponse,
    },
};

#[utoipa::path(
    get,
    path = "/api/v1/user",
    params(Pagination),
    tag = "Users",
    security(("api_token" = [])),
    responses((status = 200, body = [UserResponse]))
)]
pub async fn list_users(
    Auth(_user): Auth,
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state
        .with_storage(move |storage| UserRepository::new(storage).list(page))
        .await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/user",
    request_body = CreateUserRequest,
    tag = "Users",
    security(("api_token" = [])),
    responses(
        (status = 201, body = UserResponse),
        (status = 400, description = "Invalid fields"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    Auth(_user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    request.validate().map_err(ApiError::invalid_fields)?;

    let cost = state.bcrypt_cost;
    let password = request.password.clone();
    let encrypted_password = tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| ApiError::from(StorageError::TaskFailed(e.to_string())))??;

    let user = StoredUser {
        id: Uuid::new_v4().to_string(),
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        encrypted_password,
        is_admin: false,
        created_at: state.clock.now(),
    };

    let user = state
        .with_storage(move |storage| {
            UserRepository::new(storage).create(&user)?;
            Ok::<_, StorageError>(user)
        })
        .await?;

    tracing::info!(user_id = %user.id, "User created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/user/{id}",
    params(("id" = String, Path, description = "User identifier")),
    tag = "Users",
    security(("api_token" = [])),
    responses(
        (status = 200, body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Auth(_user): Auth,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .with_storage(move |storage| UserRepository::new(storage).get(&user_id))
        .await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/user/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    tag = "Users",
    security(("api_token" = [])),
    responses(
        (status = 200, body = UserResponse),
        (status = 401, description = "Not the account owner or an admin"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    Auth(caller): Auth,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .with_storage(move |storage| {
            let users = UserRepository::new(storage);
            users.get(&user_id)?.verify_owner_or_admin(&caller)?;
            users.update_names(&user_id, request.first_name(), request.last_name())
        })
        .await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/user/{id}",
    params(("id" = String, Path, description = "User identifier")),
    tag = "Users",
    security(("api_token" = [])),
    responses(
        (status = 200, body = GenericResponse),
        (status = 401, description = "Not the account owner or an admin"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Auth(caller): Auth,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<GenericResponse>, ApiError> {
    let deleted_by = caller.user_id.clone();
    let deleted_id = user_id.clone();
    state
        .with_storage(move |storage| {
            let users = UserRepository::new(storage);
            users.get(&user_id)?.verify_owner_or_admin(&caller)?;
            users.delete(&user_id)
        })
        .await?;

    tracing::info!(user_id = %deleted_id, %deleted_by, "User deleted");
    Ok(Json(GenericResponse::msg("deleted")))
}
