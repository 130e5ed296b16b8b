// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Room availability.
//!
//! Bookings occupy half-open intervals `[fromDate, tillDate)`. Two bookings
//! conflict when `a.from < b.till && a.till > b.from`; a stay ending on the
//! day another starts does not conflict. Canceled bookings never conflict.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::storage::{BookingRepository, FileStorage, Filter, StorageResult};

fn timestamp(at: DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// Filter matching every non-canceled booking of `room_id` that overlaps
/// `[from, till)`.
pub fn overlap_filter(room_id: &str, from: DateTime<Utc>, till: DateTime<Utc>) -> Filter {
    Filter::new()
        .eq("roomId", json!(room_id))
        .eq("canceled", json!(false))
        .lt("fromDate", timestamp(till))
        .gt("tillDate", timestamp(from))
}

/// True iff no non-canceled booking of the room overlaps `[from, till)`.
///
/// Callers that insert afterwards must hold the room lock across both steps.
pub fn is_available(
    storage: &FileStorage,
    room_id: &str,
    from: DateTime<Utc>,
    till: DateTime<Utc>,
) -> StorageResult<bool> {
    let conflict = BookingRepository::new(storage).find_one(&overlap_filter(room_id, from, till))?;
    if let Some(existing) = &conflict {
        tracing::debug!(%room_id, booking_id = %existing.id, "Requested range overlaps booking");
    }
    Ok(conflict.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{StoragePaths, StoredBooking};
    use chrono::TimeZone;
    use tempfile::TempDir;

    const ROOM: &str = "7b0d3c3e-36a4-4a4b-9a55-2b1c9f7e1a01";

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, 0, 0, 0).unwrap()
    }

    fn setup() -> (TempDir, FileStorage) {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(StoragePaths::new(temp.path()));
        storage.initialize().unwrap();
        (temp, storage)
    }

    fn insert(storage: &FileStorage, room: &str, from: u32, till: u32, canceled: bool) {
        BookingRepository::new(storage)
            .create(&StoredBooking {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: "user-1".into(),
                room_id: room.into(),
                from_date: at(from),
                till_date: at(till),
                num_persons: 2,
                canceled,
                created_at: at(1),
            })
            .unwrap();
    }

    #[test]
    fn empty_room_is_available() {
        let (_temp, storage) = setup();
        assert!(is_available(&storage, ROOM, at(1), at(5)).unwrap());
    }

    #[test]
    fn overlapping_ranges_conflict() {
        let (_temp, storage) = setup();
        insert(&storage, ROOM, 1, 5, false);

        // Straddles the end
        assert!(!is_available(&storage, ROOM, at(4), at(8)).unwrap());
        // Straddles the start
        assert!(!is_available(&storage, ROOM, at(1), at(2)).unwrap());
        // Strictly contains the existing booking
        assert!(!is_available(&storage, ROOM, at(1), at(10)).unwrap());
        // Strictly inside the existing booking
        assert!(!is_available(&storage, ROOM, at(2), at(3)).unwrap());
    }

    #[test]
    fn adjacent_ranges_do_not_conflict() {
        let (_temp, storage) = setup();
        insert(&storage, ROOM, 3, 5, false);

        assert!(is_available(&storage, ROOM, at(5), at(10)).unwrap());
        assert!(is_available(&storage, ROOM, at(1), at(3)).unwrap());
    }

    #[test]
    fn canceled_bookings_are_ignored() {
        let (_temp, storage) = setup();
        insert(&storage, ROOM, 1, 5, true);
        assert!(is_available(&storage, ROOM, at(1), at(5)).unwrap());
    }

    #[test]
    fn other_rooms_are_ignored() {
        let (_temp, storage) = setup();
        insert(&storage, "another-room", 1, 5, false);
        assert!(is_available(&storage, ROOM, at(1), at(5)).unwrap());
    }
}
