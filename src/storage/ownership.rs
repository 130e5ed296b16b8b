// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership and role enforcement for stored documents.
//!
//! Every guarded access passes through one of these predicates. They are
//! pure comparisons on the caller identity and never touch storage.

use crate::auth::AuthenticatedUser;

use super::{StorageError, StorageResult};

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// Get the owner's user ID.
    fn owner_user_id(&self) -> &str;

    /// Short resource label used in denial messages.
    fn resource_kind(&self) -> &'static str {
        "resource"
    }
}

/// Trait for enforcing ownership on storage operations.
pub trait OwnershipEnforcer {
    /// Verify that the user owns this resource.
    ///
    /// # Errors
    /// Returns `StorageError::PermissionDenied` if the user doesn't own the resource.
    fn verify_ownership(&self, user: &AuthenticatedUser) -> StorageResult<()>;

    /// Like [`verify_ownership`](Self::verify_ownership), but admins always pass.
    fn verify_owner_or_admin(&self, user: &AuthenticatedUser) -> StorageResult<()> {
        if user.is_admin {
            return Ok(());
        }
        self.verify_ownership(user)
    }
}

impl<T: OwnedResource> OwnershipEnforcer for T {
    fn verify_ownership(&self, user: &AuthenticatedUser) -> StorageResult<()> {
        if self.owner_user_id() == user.user_id {
            Ok(())
        } else {
            Err(StorageError::PermissionDenied {
                user_id: user.user_id.clone(),
                resource: self.resource_kind().to_string(),
            })
        }
    }
}

/// Require the admin flag on the caller.
pub fn require_admin(user: &AuthenticatedUser) -> StorageResult<()> {
    if user.is_admin {
        Ok(())
    } else {
        Err(StorageError::PermissionDenied {
            user_id: user.user_id.clone(),
            resource: "admin".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestResource {
        owner: String,
    }

    impl OwnedResource for TestResource {
        fn owner_user_id(&self) -> &str {
            &self.owner
        }
    }

    fn user(id: &str, is_admin: bool) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: id.to_string(),
            email: format!("{id}@example.com"),
            is_admin,
        }
    }

    #[test]
    fn owner_can_access() {
        let resource = TestResource {
            owner: "user-1".to_string(),
        };
        assert!(resource.verify_ownership(&user("user-1", false)).is_ok());
    }

    #[test]
    fn non_owner_cannot_access() {
        let resource = TestResource {
            owner: "user-1".to_string(),
        };
        let result = resource.verify_ownership(&user("user-2", false));
        assert!(matches!(result, Err(StorageError::PermissionDenied { .. })));
    }

    #[test]
    fn admin_is_not_an_owner() {
        let resource = TestResource {
            owner: "user-1".to_string(),
        };
        assert!(resource.verify_ownership(&user("admin", true)).is_err());
        assert!(resource.verify_owner_or_admin(&user("admin", true)).is_ok());
        assert!(resource.verify_owner_or_admin(&user("user-2", false)).is_err());
    }

    #[test]
    fn require_admin_checks_flag() {
        assert!(require_admin(&user("a", true)).is_ok());
        assert!(matches!(
            require_admin(&user("b", false)),
            Err(StorageError::PermissionDenied { .. })
        ));
    }
}
