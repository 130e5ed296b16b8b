// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Hotel repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

use super::super::{
    Collection, Document, Documents, FileStorage, Filter, Pagination, StorageError, StorageResult,
    Update,
};

/// Hotel stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredHotel {
    /// Unique hotel identifier (UUID)
    pub id: String,
    pub name: String,
    pub location: String,
    /// IDs of the rooms belonging to this hotel
    #[serde(default)]
    pub rooms: Vec<String>,
    /// Star rating
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

impl Document for StoredHotel {
    const COLLECTION: Collection = Collection::Hotels;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Repository for hotels.
pub struct HotelRepository<'a> {
    hotels: Documents<'a, StoredHotel>,
}

impl<'a> HotelRepository<'a> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self {
            hotels: Documents::new(storage),
        }
    }

    pub fn get(&self, hotel_id: &str) -> StorageResult<StoredHotel> {
        self.hotels.get(hotel_id)
    }

    pub fn create(&self, hotel: &StoredHotel) -> StorageResult<()> {
        self.hotels.insert_one(hotel)
    }

    /// List hotels, optionally restricted to an exact rating.
    pub fn list(&self, rating: Option<i32>, page: Pagination) -> StorageResult<Vec<StoredHotel>> {
        let mut filter = Filter::new();
        if let Some(rating) = rating {
            filter = filter.eq("rating", json!(rating));
        }
        self.hotels.find_many(&filter, Some(page))
    }

    /// Append a room ID to the hotel's room list.
    pub fn add_room(&self, hotel_id: &str, room_id: &str) -> StorageResult<StoredHotel> {
        self.hotels
            .update_one(
                &Filter::by_id(hotel_id),
                &Update::new().push("rooms", Value::String(room_id.to_string())),
            )?
            .ok_or_else(|| StorageError::NotFound(format!("hotel {hotel_id}")))
    }
}
