// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and authenticated user representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::StoredUser;

/// Claims carried by an API token.
///
/// `expires` is an absolute Unix timestamp in seconds. Expiry is judged by
/// the caller against an injected clock, not during signature verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User ID
    pub id: String,
    pub email: String,
    pub expires: i64,
}

impl TokenClaims {
    /// True once `now` is past the expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires < now.timestamp()
    }
}

/// Authenticated user information.
///
/// Built from the stored user record on every request and attached to the
/// request extensions by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    /// Canonical user ID
    pub user_id: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<&StoredUser> for AuthenticatedUser {
    fn from(user: &StoredUser) -> Self {
        Self {
            user_id: user.id.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn expiry_is_strictly_after_expires() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let claims = TokenClaims {
            id: "u".into(),
            email: "u@example.com".into(),
            expires: now.timestamp(),
        };
        assert!(!claims.is_expired(now));
        assert!(claims.is_expired(now + chrono::Duration::seconds(1)));
    }

    #[test]
    fn from_stored_user_copies_identity() {
        let stored = StoredUser {
            id: "user-1".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            encrypted_password: "hash".into(),
            is_admin: true,
            created_at: Utc::now(),
        };
        let user = AuthenticatedUser::from(&stored);
        assert_eq!(user.user_id, "user-1");
        assert_eq!(user.email, "ada@example.com");
        assert!(user.is_admin);
    }
}
