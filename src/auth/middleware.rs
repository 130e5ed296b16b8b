// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Applied to the whole `/api/v1` subtree:
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/booking", get(list_my_bookings))
//!     .layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));
//! ```
//!
//! On success the resolved [`AuthenticatedUser`] is inserted into the request
//! extensions, where the [`Auth`](super::Auth) and
//! [`AdminOnly`](super::AdminOnly) extractors pick it up.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthError, AuthenticatedUser};
use crate::state::AppState;
use crate::storage::{StorageError, UserRepository};

/// Header carrying the API token.
pub const TOKEN_HEADER: &str = "X-Api-Token";

/// Authentication middleware function.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state, request.headers()).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Resolve the caller from the request headers.
///
/// Steps run in order and stop at the first failure: header, signature and
/// algorithm, expiry against the state clock, then a fresh user lookup.
pub async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, AuthError> {
    let token = headers
        .get(TOKEN_HEADER)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidTokenHeader)?
        .trim();

    let claims = state.tokens.verify(token).inspect_err(|e| {
        tracing::warn!(error_code = e.error_code(), "Rejected API token");
    })?;

    if claims.is_expired(state.clock.now()) {
        tracing::debug!(user_id = %claims.id, "Rejected expired token");
        return Err(AuthError::TokenExpired);
    }

    let user_id = claims.id.clone();
    let lookup = state
        .with_storage(move |storage| UserRepository::new(storage).get(&user_id))
        .await;

    match lookup {
        Ok(user) => Ok(AuthenticatedUser::from(&user)),
        Err(StorageError::NotFound(_) | StorageError::InvalidId(_)) => {
            tracing::warn!(user_id = %claims.id, "Token refers to unknown user");
            Err(AuthError::UnknownUser)
        }
        Err(e) => {
            tracing::error!(user_id = %claims.id, error = %e, "User lookup failed during authentication");
            Err(AuthError::UnknownUser)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenCodec;
    use crate::clock::FixedClock;
    use crate::storage::{FileStorage, StoragePaths, StoredUser};
    use axum::http::HeaderValue;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
    }

    fn setup() -> (AppState, StoredUser, TempDir) {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(StoragePaths::new(temp.path()));
        storage.initialize().unwrap();

        let user = StoredUser {
            id: uuid::Uuid::new_v4().to_string(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            encrypted_password: "hash".into(),
            is_admin: false,
            created_at: now(),
        };
        UserRepository::new(&storage).create(&user).unwrap();

        let state = AppState::new(storage, TokenCodec::new(b"secret")).with_clock(FixedClock(now()));
        (state, user, temp)
    }

    fn headers_with(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_HEADER, HeaderValue::from_str(token).unwrap());
        headers
    }

    #[tokio::test]
    async fn valid_token_resolves_user() {
        let (state, user, _temp) = setup();
        let token = state.tokens.issue(&(&user).into(), now()).unwrap();

        let resolved = authenticate(&state, &headers_with(&token)).await.unwrap();
        assert_eq!(resolved.user_id, user.id);
        assert_eq!(resolved.email, user.email);
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let (state, _user, _temp) = setup();
        let result = authenticate(&state, &HeaderMap::new()).await;
        assert!(matches!(result, Err(AuthError::MissingToken)));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let (state, user, _temp) = setup();
        let issued = now() - Duration::days(8);
        let token = state.tokens.issue(&(&user).into(), issued).unwrap();

        let result = authenticate(&state, &headers_with(&token)).await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn token_for_deleted_user_is_rejected() {
        let (state, user, _temp) = setup();
        let token = state.tokens.issue(&(&user).into(), now()).unwrap();
        UserRepository::new(state.storage()).delete(&user.id).unwrap();

        let result = authenticate(&state, &headers_with(&token)).await;
        assert!(matches!(result, Err(AuthError::UnknownUser)));
    }

    #[tokio::test]
    async fn admin_flag_comes_from_store_not_token() {
        let (state, user, _temp) = setup();
        let token = state.tokens.issue(&(&user).into(), now()).unwrap();

        let mut promoted = user.clone();
        promoted.is_admin = true;
        state
            .storage()
            .write_json(
                state
                    .storage()
                    .paths()
                    .document(crate::storage::Collection::Users, &user.id),
                &promoted,
            )
            .unwrap();

        let resolved = authenticate(&state, &headers_with(&token)).await.unwrap();
        assert!(resolved.is_admin);
    }
}
