// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Booking repository.
//!
//! Bookings are created by the booking workflow and afterwards only ever
//! change by flipping `canceled` to true. They are never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

use super::super::{
    Collection, Document, Documents, FileStorage, Filter, OwnedResource, Pagination, StorageError,
    StorageResult, Update,
};

/// Booking stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredBooking {
    /// Unique booking identifier (UUID)
    pub id: String,
    /// User who created the booking
    pub user_id: String,
    pub room_id: String,
    /// Start of the stay (inclusive)
    pub from_date: DateTime<Utc>,
    /// End of the stay (exclusive)
    pub till_date: DateTime<Utc>,
    pub num_persons: u32,
    #[serde(default)]
    pub canceled: bool,
    pub created_at: DateTime<Utc>,
}

impl Document for StoredBooking {
    const COLLECTION: Collection = Collection::Bookings;

    fn id(&self) -> &str {
        &self.id
    }
}

impl OwnedResource for StoredBooking {
    fn owner_user_id(&self) -> &str {
        &self.user_id
    }

    fn resource_kind(&self) -> &'static str {
        "booking"
    }
}

/// Repository for bookings.
pub struct BookingRepository<'a> {
    bookings: Documents<'a, StoredBooking>,
}

impl<'a> BookingRepository<'a> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self {
            bookings: Documents::new(storage),
        }
    }

    /// Get a booking by ID.
    pub fn get(&self, booking_id: &str) -> StorageResult<StoredBooking> {
        self.bookings.get(booking_id)
    }

    pub fn create(&self, booking: &StoredBooking) -> StorageResult<()> {
        self.bookings.insert_one(booking)
    }

    /// First booking matching an arbitrary filter.
    pub fn find_one(&self, filter: &Filter) -> StorageResult<Option<StoredBooking>> {
        self.bookings.find_one(filter)
    }

    /// Bookings created by a user.
    pub fn list_by_user(&self, user_id: &str) -> StorageResult<Vec<StoredBooking>> {
        self.bookings
            .find_many(&Filter::new().eq("userId", json!(user_id)), None)
    }

    /// All bookings (admin view).
    pub fn list_all(&self, page: Pagination) -> StorageResult<Vec<StoredBooking>> {
        self.bookings.find_many(&Filter::new(), Some(page))
    }

    /// Flip `canceled` to true.
    pub fn mark_canceled(&self, booking_id: &str) -> StorageResult<StoredBooking> {
        self.bookings
            .update_one(
                &Filter::by_id(booking_id),
                &Update::new().set("canceled", Value::Bool(true)),
            )?
            .ok_or_else(|| StorageError::NotFound(format!("booking {booking_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn test_storage() -> (TempDir, FileStorage) {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(StoragePaths::new(temp.path()));
        storage.initialize().unwrap();
        (temp, storage)
    }

    fn booking(user_id: &str) -> StoredBooking {
        StoredBooking {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            room_id: uuid::Uuid::new_v4().to_string(),
            from_date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            till_date: Utc.with_ymd_and_hms(2024, 6, 5, 0, 0, 0).unwrap(),
            num_persons: 2,
            canceled: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn list_by_user_filters_owner() {
        let (_temp, storage) = test_storage();
        let repo = BookingRepository::new(&storage);

        repo.create(&booking("alice")).unwrap();
        repo.create(&booking("alice")).unwrap();
        repo.create(&booking("bob")).unwrap();

        assert_eq!(repo.list_by_user("alice").unwrap().len(), 2);
        assert_eq!(repo.list_by_user("carol").unwrap().len(), 0);
        assert_eq!(repo.list_all(Pagination::default()).unwrap().len(), 3);
    }

    #[test]
    fn mark_canceled_persists() {
        let (_temp, storage) = test_storage();
        let repo = BookingRepository::new(&storage);
        let b = booking("alice");
        repo.create(&b).unwrap();

        let canceled = repo.mark_canceled(&b.id).unwrap();
        assert!(canceled.canceled);
        assert_eq!(canceled.from_date, b.from_date);
        assert!(repo.get(&b.id).unwrap().canceled);
    }

    #[test]
    fn dates_are_stored_as_rfc3339() {
        let json = serde_json::to_value(booking("alice")).unwrap();
        assert_eq!(json["fromDate"], "2024-06-01T00:00:00Z");
        assert_eq!(json["canceled"], false);
    }
}
