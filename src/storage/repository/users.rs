// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User repository.
//!
//! Users are stored under `/data/users/`. The bcrypt hash is part of the
//! stored document only; API responses go through [`UserResponse`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

use super::super::{
    Collection, Document, Documents, FileStorage, Filter, OwnedResource, Pagination, StorageError,
    StorageResult, Update,
};

/// Lock key guarding the email uniqueness check.
const EMAIL_LOCK: &str = "users:email";

/// User account as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// bcrypt hash, never serialized into API responses
    pub encrypted_password: String,
    #[serde(default)]
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl Document for StoredUser {
    const COLLECTION: Collection = Collection::Users;

    fn id(&self) -> &str {
        &self.id
    }
}

/// A user is the owner of their own account.
impl OwnedResource for StoredUser {
    fn owner_user_id(&self) -> &str {
        &self.id
    }

    fn resource_kind(&self) -> &'static str {
        "user"
    }
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<StoredUser> for UserResponse {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

/// Repository for user accounts.
pub struct UserRepository<'a> {
    users: Documents<'a, StoredUser>,
    storage: &'a FileStorage,
}

impl<'a> UserRepository<'a> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self {
            users: Documents::new(storage),
            storage,
        }
    }

    /// Get a user by ID.
    pub fn get(&self, user_id: &str) -> StorageResult<StoredUser> {
        self.users.get(user_id)
    }

    /// Find a user by exact email address.
    pub fn find_by_email(&self, email: &str) -> StorageResult<Option<StoredUser>> {
        self.users
            .find_one(&Filter::new().eq("email", json!(email)))
    }

    /// Create a new user. Fails with `AlreadyExists` if the email is taken.
    pub fn create(&self, user: &StoredUser) -> StorageResult<()> {
        self.storage.with_lock(EMAIL_LOCK, || {
            if self.find_by_email(&user.email)?.is_some() {
                return Err(StorageError::AlreadyExists(format!(
                    "user with email {}",
                    user.email
                )));
            }
            self.users.insert_one(user)
        })
    }

    /// List users, one page at a time.
    pub fn list(&self, page: Pagination) -> StorageResult<Vec<StoredUser>> {
        self.users.find_many(&Filter::new(), Some(page))
    }

    /// Update first and/or last name. `None` leaves a field untouched.
    ///
    /// Returns `NotFound` when the user does not exist.
    pub fn update_names(
        &self,
        user_id: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> StorageResult<StoredUser> {
        let mut update = Update::new();
        if let Some(first) = first_name {
            update = update.set("firstName", Value::String(first.to_string()));
        }
        if let Some(last) = last_name {
            update = update.set("lastName", Value::String(last.to_string()));
        }
        if update.is_empty() {
            return self.get(user_id);
        }

        self.users
            .update_one(&Filter::by_id(user_id), &update)?
            .ok_or_else(|| StorageError::NotFound(format!("user {user_id}")))
    }

    /// Delete a user. Returns `NotFound` when nothing was removed.
    pub fn delete(&self, user_id: &str) -> StorageResult<()> {
        if self.users.delete_one(&Filter::by_id(user_id))? {
            Ok(())
        } else {
            Err(StorageError::NotFound(format!("user {user_id}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use tempfile::TempDir;

    fn test_storage() -> (TempDir, FileStorage) {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let mut storage = FileStorage::new(StoragePaths::new(temp.path()));
        storage.initialize().expect("Failed to initialize");
        (temp, storage)
    }

    fn test_user(email: &str) -> StoredUser {
        StoredUser {
            id: uuid::Uuid::new_v4().to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            encrypted_password: "$2b$04$hash".to_string(),
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn create_and_find_by_email() {
        let (_temp, storage) = test_storage();
        let repo = UserRepository::new(&storage);

        let user = test_user("ada@example.com");
        repo.create(&user).unwrap();

        let found = repo.find_by_email("ada@example.com").unwrap();
        assert_eq!(found, Some(user.clone()));
        assert_eq!(repo.get(&user.id).unwrap(), user);
        assert!(repo.find_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let (_temp, storage) = test_storage();
        let repo = UserRepository::new(&storage);

        repo.create(&test_user("ada@example.com")).unwrap();
        let result = repo.create(&test_user("ada@example.com"));
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));
    }

    #[test]
    fn update_names_only_touches_given_fields() {
        let (_temp, storage) = test_storage();
        let repo = UserRepository::new(&storage);
        let user = test_user("ada@example.com");
        repo.create(&user).unwrap();

        let updated = repo.update_names(&user.id, Some("Augusta"), None).unwrap();
        assert_eq!(updated.first_name, "Augusta");
        assert_eq!(updated.last_name, "Lovelace");
        assert_eq!(updated.encrypted_password, user.encrypted_password);
    }

    #[test]
    fn update_and_delete_missing_user_is_not_found() {
        let (_temp, storage) = test_storage();
        let repo = UserRepository::new(&storage);
        let id = uuid::Uuid::new_v4().to_string();

        assert!(matches!(
            repo.update_names(&id, Some("X"), None),
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(repo.delete(&id), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn response_never_contains_password() {
        let user = test_user("ada@example.com");
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("encryptedPassword").is_none());
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["isAdmin"], false);
    }
}
