// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Booking creation, lookup and cancellation.
//!
//! All functions are synchronous and take the store explicitly; HTTP
//! handlers run them through `AppState::with_storage`.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{availability, BookRoomRequest, BookingError};
use crate::auth::AuthenticatedUser;
use crate::storage::{
    BookingRepository, FileStorage, OwnershipEnforcer, RoomRepository, StorageError,
    StoredBooking,
};

/// Lock key serializing availability check and insert for one room.
fn room_lock_key(room_id: &str) -> String {
    format!("room:{room_id}")
}

/// Book `room_id` for `user`.
///
/// Validation runs before any store access. The availability check and the
/// insert run under the room lock.
pub fn book_room(
    storage: &FileStorage,
    user: &AuthenticatedUser,
    room_id: &str,
    request: &BookRoomRequest,
    now: DateTime<Utc>,
) -> Result<StoredBooking, BookingError> {
    request.validate(now)?;

    let room_id = Uuid::parse_str(room_id)
        .map_err(|_| BookingError::InvalidId)?
        .to_string();

    match RoomRepository::new(storage).get(&room_id) {
        Ok(_) => {}
        Err(StorageError::NotFound(_)) => return Err(BookingError::NotFound("room")),
        Err(e) => return Err(e.into()),
    }

    storage.with_lock(&room_lock_key(&room_id), || {
        if !availability::is_available(storage, &room_id, request.from_date, request.till_date)? {
            tracing::info!(
                %room_id,
                user_id = %user.user_id,
                from = %request.from_date,
                till = %request.till_date,
                "Booking rejected, room not available"
            );
            return Err(BookingError::Unavailable);
        }

        let booking = StoredBooking {
            id: Uuid::new_v4().to_string(),
            user_id: user.user_id.clone(),
            room_id: room_id.clone(),
            from_date: request.from_date,
            till_date: request.till_date,
            // validate() guarantees num_persons >= 1
            num_persons: request.num_persons.unsigned_abs(),
            canceled: false,
            created_at: now,
        };
        BookingRepository::new(storage).create(&booking)?;

        tracing::info!(
            booking_id = %booking.id,
            %room_id,
            user_id = %user.user_id,
            "Booking created"
        );
        Ok(booking)
    })
}

/// Load a booking. Absent and malformed identifiers are both `NotFound`.
fn load_booking(storage: &FileStorage, booking_id: &str) -> Result<StoredBooking, BookingError> {
    match BookingRepository::new(storage).get(booking_id) {
        Ok(booking) => Ok(booking),
        Err(StorageError::NotFound(_) | StorageError::InvalidId(_)) => {
            Err(BookingError::NotFound("booking"))
        }
        Err(e) => Err(e.into()),
    }
}

/// Get a booking owned by `user`.
pub fn get_booking(
    storage: &FileStorage,
    user: &AuthenticatedUser,
    booking_id: &str,
) -> Result<StoredBooking, BookingError> {
    let booking = load_booking(storage, booking_id)?;
    booking.verify_ownership(user)?;
    Ok(booking)
}

/// Cancel a booking owned by `user`.
///
/// Canceling an already canceled booking succeeds without writing.
pub fn cancel_booking(
    storage: &FileStorage,
    user: &AuthenticatedUser,
    booking_id: &str,
) -> Result<StoredBooking, BookingError> {
    let booking = get_booking(storage, user, booking_id)?;

    if booking.canceled {
        tracing::debug!(booking_id = %booking.id, "Booking already canceled");
        return Ok(booking);
    }

    let booking = BookingRepository::new(storage).mark_canceled(&booking.id)?;
    tracing::info!(booking_id = %booking.id, user_id = %user.user_id, "Booking canceled");
    Ok(booking)
}
