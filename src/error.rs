// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::AuthError;
use crate::booking::BookingError;
use crate::storage::StorageError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    /// Per-field validation messages
    pub fields: Option<BTreeMap<String, String>>,
    /// Machine-readable code, set for authentication failures
    pub error_code: Option<&'static str>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<String, String>>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            fields: None,
            error_code: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 400 carrying one message per invalid field.
    pub fn invalid_fields(fields: BTreeMap<String, String>) -> Self {
        Self {
            fields: Some(fields),
            ..Self::bad_request("invalid request")
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(StatusCode::GATEWAY_TIMEOUT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            error_code: self.error_code,
            fields: self.fields,
        });
        (self.status, body).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(what) => Self::not_found(format!("{what} not found")),
            StorageError::InvalidId(_) => Self::bad_request("invalid id"),
            StorageError::AlreadyExists(what) => Self::conflict(format!("{what} already exists")),
            StorageError::PermissionDenied { user_id, resource } => {
                tracing::warn!(%user_id, %resource, "Access denied");
                Self::unauthorized("unauthorized")
            }
            StorageError::Timeout(_) => Self::timeout("store operation timed out"),
            other => {
                tracing::error!(error = %other, "Storage failure");
                Self::internal("internal server error")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if let AuthError::Internal(detail) = &err {
            tracing::error!(error = %detail, "Authentication failed internally");
        }
        Self {
            error_code: Some(err.error_code()),
            ..Self::new(err.status_code(), err.to_string())
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation(message) => Self::bad_request(message),
            BookingError::InvalidId => Self::bad_request("invalid id"),
            BookingError::NotFound(what) => Self::not_found(format!("{what} not found")),
            BookingError::Unavailable => Self::conflict("room not available"),
            BookingError::Storage(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::time::Duration;

    #[test]
    fn constructors_set_status_and_message() {
        let nf = ApiError::not_found("missing");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.message, "missing");

        let conflict = ApiError::conflict("taken");
        assert_eq!(conflict.status, StatusCode::CONFLICT);

        let timeout = ApiError::timeout("slow");
        assert_eq!(timeout.status, StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"bad data"}"#);
    }

    #[tokio::test]
    async fn field_errors_are_listed() {
        let mut fields = BTreeMap::new();
        fields.insert("email".to_string(), "email is invalid".to_string());
        let response = ApiError::invalid_fields(fields).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["fields"]["email"], "email is invalid");
    }

    #[test]
    fn storage_errors_map_to_statuses() {
        let cases = [
            (StorageError::NotFound("room x".into()), StatusCode::NOT_FOUND),
            (StorageError::InvalidId("x".into()), StatusCode::BAD_REQUEST),
            (StorageError::AlreadyExists("x".into()), StatusCode::CONFLICT),
            (
                StorageError::PermissionDenied {
                    user_id: "u".into(),
                    resource: "booking".into(),
                },
                StatusCode::UNAUTHORIZED,
            ),
            (
                StorageError::Timeout(Duration::from_secs(5)),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (StorageError::NotInitialized, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[tokio::test]
    async fn auth_errors_keep_their_code() {
        let api = ApiError::from(AuthError::InvalidCredentials);
        assert_eq!(api.status, StatusCode::UNAUTHORIZED);
        assert_eq!(api.error_code, Some("invalid_credentials"));

        let body_bytes = to_bytes(api.into_response().into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"error": "invalid credentials", "error_code": "invalid_credentials"})
        );
    }

    #[test]
    fn internal_errors_hide_details() {
        let io = std::io::Error::other("disk on fire at /data/bookings");
        let api = ApiError::from(StorageError::Io(io));
        assert_eq!(api.message, "internal server error");
    }

    #[test]
    fn booking_errors_map_to_statuses() {
        assert_eq!(
            ApiError::from(BookingError::Unavailable).status,
            StatusCode::CONFLICT
        );
        let validation = ApiError::from(BookingError::Validation(
            "numPersons must be greater than 0".into(),
        ));
        assert_eq!(validation.status, StatusCode::BAD_REQUEST);
        assert_eq!(validation.message, "numPersons must be greater than 0");
    }
}
