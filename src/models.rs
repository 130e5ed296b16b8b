// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the REST API that are not stored
//! documents themselves. Stored documents (`StoredHotel`, `StoredRoom`,
//! `StoredBooking`) and `UserResponse` live with their repositories.
//!
//! ## Model Categories
//!
//! - **Auth**: login request and response
//! - **Users**: account creation and update, with field validation
//! - **Hotels & Rooms**: admin creation bodies and list queries
//! - **Messages**: the generic `{type, message}` acknowledgement

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::storage::{filter::DEFAULT_PAGE_LIMIT, Pagination, RoomSize, UserResponse};

// =============================================================================
// Auth
// =============================================================================

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: the user and a fresh API token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserResponse,
    /// Send back in the `X-Api-Token` header
    pub token: String,
}

// =============================================================================
// Users
// =============================================================================

pub const MIN_FIRST_NAME_LEN: usize = 2;
pub const MIN_LAST_NAME_LEN: usize = 7;
pub const MIN_PASSWORD_LEN: usize = 7;

/// Request body for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl CreateUserRequest {
    /// Validate every field, collecting one message per failing field.
    pub fn validate(&self) -> Result<(), BTreeMap<String, String>> {
        let mut errors = BTreeMap::new();

        if self.first_name.chars().count() < MIN_FIRST_NAME_LEN {
            errors.insert(
                "firstName".to_string(),
                format!("firstName length should be at least {MIN_FIRST_NAME_LEN} characters"),
            );
        }
        if self.last_name.chars().count() < MIN_LAST_NAME_LEN {
            errors.insert(
                "lastName".to_string(),
                format!("lastName length should be at least {MIN_LAST_NAME_LEN} characters"),
            );
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(
                "password".to_string(),
                format!("password length should be at least {MIN_PASSWORD_LEN} characters"),
            );
        }
        if !is_valid_email(&self.email) {
            errors.insert(
                "email".to_string(),
                format!("email {} is invalid", self.email),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// `local@label.rest`, where the local part allows `[A-Za-z0-9_.+-]`, the
/// first domain label `[A-Za-z0-9-]` and the remainder `[A-Za-z0-9.-]`.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((label, rest)) = domain.split_once('.') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '+' | '-'));
    let label_ok = !label.is_empty()
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    let rest_ok = !rest.is_empty()
        && rest
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.'));

    local_ok && label_ok && rest_ok
}

/// Request body for updating a user. Empty fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl UpdateUserRequest {
    pub fn first_name(&self) -> Option<&str> {
        Some(self.first_name.trim()).filter(|s| !s.is_empty())
    }

    pub fn last_name(&self) -> Option<&str> {
        Some(self.last_name.trim()).filter(|s| !s.is_empty())
    }
}

// =============================================================================
// Hotels & Rooms
// =============================================================================

/// Request body for creating a hotel (admin).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateHotelRequest {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub rating: i32,
}

/// Request body for creating a room in a hotel (admin).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRoomRequest {
    pub size: RoomSize,
    #[serde(default)]
    pub seaside: bool,
    pub price: f64,
}

/// Query parameters for listing hotels.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HotelQuery {
    /// Page number, starting at 1.
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (max 100).
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Only hotels with exactly this rating.
    pub rating: Option<i32>,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_LIMIT
}

impl HotelQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit)
    }
}

// =============================================================================
// Messages
// =============================================================================

/// Generic acknowledgement body, e.g. `{"type":"msg","message":"updated"}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct GenericResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl GenericResponse {
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            kind: "msg".to_string(),
            message: message.into(),
        }
    }
}
