// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Room repository. Rooms are read-only from the booking workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::super::{
    Collection, Document, Documents, FileStorage, Filter, Pagination, StorageResult,
};
use super::hotels::{HotelRepository, StoredHotel};

/// Room size category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoomSize {
    Small,
    Normal,
    Kingsize,
}

/// Room stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredRoom {
    /// Unique room identifier (UUID)
    pub id: String,
    /// Hotel the room belongs to
    pub hotel_id: String,
    pub size: RoomSize,
    pub seaside: bool,
    /// Price per night
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl Document for StoredRoom {
    const COLLECTION: Collection = Collection::Rooms;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Repository for rooms.
pub struct RoomRepository<'a> {
    rooms: Documents<'a, StoredRoom>,
    storage: &'a FileStorage,
}

impl<'a> RoomRepository<'a> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self {
            rooms: Documents::new(storage),
            storage,
        }
    }

    pub fn get(&self, room_id: &str) -> StorageResult<StoredRoom> {
        self.rooms.get(room_id)
    }

    pub fn create(&self, room: &StoredRoom) -> StorageResult<()> {
        self.rooms.insert_one(room)
    }

    /// Persist `room` and append its id to the owning hotel.
    ///
    /// If the hotel update fails the room is deleted again, so no room
    /// exists outside its hotel's room list.
    pub fn create_in_hotel(&self, room: &StoredRoom) -> StorageResult<StoredHotel> {
        self.create(room)?;

        HotelRepository::new(self.storage)
            .add_room(&room.hotel_id, &room.id)
            .inspect_err(|_| {
                if let Err(e) = self.rooms.delete_one(&Filter::by_id(&room.id)) {
                    tracing::error!(room_id = %room.id, error = %e, "Failed to remove orphaned room");
                }
            })
    }

    pub fn list(&self, page: Pagination) -> StorageResult<Vec<StoredRoom>> {
        self.rooms.find_many(&Filter::new(), Some(page))
    }

    /// All rooms of a hotel.
    pub fn list_by_hotel(&self, hotel_id: &str) -> StorageResult<Vec<StoredRoom>> {
        self.rooms
            .find_many(&Filter::new().eq("hotelId", json!(hotel_id)), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{StorageError, StoragePaths};
    use tempfile::TempDir;

    fn room(hotel_id: &str, size: RoomSize) -> StoredRoom {
        StoredRoom {
            id: uuid::Uuid::new_v4().to_string(),
            hotel_id: hotel_id.to_string(),
            size,
            seaside: false,
            price: 99.9,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn list_by_hotel_only_returns_that_hotel() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(StoragePaths::new(temp.path()));
        storage.initialize().unwrap();
        let repo = RoomRepository::new(&storage);

        repo.create(&room("hotel-a", RoomSize::Small)).unwrap();
        repo.create(&room("hotel-a", RoomSize::Kingsize)).unwrap();
        repo.create(&room("hotel-b", RoomSize::Normal)).unwrap();

        assert_eq!(repo.list_by_hotel("hotel-a").unwrap().len(), 2);
        assert_eq!(repo.list(Pagination::default()).unwrap().len(), 3);
    }

    #[test]
    fn create_in_hotel_links_room() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(StoragePaths::new(temp.path()));
        storage.initialize().unwrap();

        let hotel = StoredHotel {
            id: uuid::Uuid::new_v4().to_string(),
            name: "Bellucia".into(),
            location: "France".into(),
            rooms: Vec::new(),
            rating: 4,
            created_at: Utc::now(),
        };
        HotelRepository::new(&storage).create(&hotel).unwrap();

        let r = room(&hotel.id, RoomSize::Normal);
        let updated = RoomRepository::new(&storage).create_in_hotel(&r).unwrap();
        assert_eq!(updated.rooms, vec![r.id.clone()]);
        assert_eq!(RoomRepository::new(&storage).get(&r.id).unwrap(), r);
    }

    #[test]
    fn create_in_missing_hotel_leaves_no_room() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(StoragePaths::new(temp.path()));
        storage.initialize().unwrap();
        let repo = RoomRepository::new(&storage);

        let r = room(&uuid::Uuid::new_v4().to_string(), RoomSize::Small);
        assert!(matches!(
            repo.create_in_hotel(&r),
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(repo.get(&r.id), Err(StorageError::NotFound(_))));
        assert!(repo.list(Pagination::default()).unwrap().is_empty());
    }

    #[test]
    fn size_serializes_lowercase() {
        let json = serde_json::to_value(room("h", RoomSize::Kingsize)).unwrap();
        assert_eq!(json["size"], "kingsize");
        assert_eq!(json["hotelId"], "h");
    }
}
