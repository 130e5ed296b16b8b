// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication error type.
///
/// Every variant except `Internal` rejects the request with 401.
#[derive(Debug)]
pub enum AuthError {
    /// No `X-Api-Token` header present
    MissingToken,
    /// Header present but not visible ASCII
    InvalidTokenHeader,
    /// Token does not parse or its claims are malformed
    MalformedToken,
    /// Token signature is invalid
    InvalidSignature,
    /// Token header names an algorithm other than HS256
    InvalidAlgorithm,
    /// Token has expired
    TokenExpired,
    /// Token refers to a user that cannot be resolved
    UnknownUser,
    /// Caller is not an admin
    AdminRequired,
    /// Login failed
    InvalidCredentials,
    /// Internal error
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing_token",
            AuthError::InvalidTokenHeader => "invalid_token_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::InvalidAlgorithm => "invalid_algorithm",
            AuthError::TokenExpired => "token_expired",
            AuthError::UnknownUser => "unknown_user",
            AuthError::AdminRequired => "admin_required",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::Internal(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "unauthorized"),
            AuthError::InvalidTokenHeader => write!(f, "invalid X-Api-Token header"),
            AuthError::MalformedToken => write!(f, "unauthorized"),
            AuthError::InvalidSignature => write!(f, "unauthorized"),
            AuthError::InvalidAlgorithm => write!(f, "unexpected signing method"),
            AuthError::TokenExpired => write!(f, "token expired"),
            AuthError::UnknownUser => write!(f, "unauthorized"),
            AuthError::AdminRequired => write!(f, "unauthorized"),
            AuthError::InvalidCredentials => write!(f, "invalid credentials"),
            AuthError::Internal(_) => write!(f, "internal server error"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let AuthError::Internal(detail) = &self {
            tracing::error!(error = %detail, "Authentication failed internally");
        }
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn missing_token_returns_401() {
        let response = AuthError::MissingToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error_code"], "missing_token");
    }

    #[tokio::test]
    async fn expired_token_message() {
        let response = AuthError::TokenExpired.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error"], "token expired");
    }

    #[test]
    fn only_internal_is_500() {
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AuthError::AdminRequired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidAlgorithm.status_code(), StatusCode::UNAUTHORIZED);
    }
}
