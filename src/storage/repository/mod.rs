// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the document store.
//!
//! Each repository wraps a [`Documents`](super::Documents) collection and
//! exposes the queries its entity needs.

pub mod bookings;
pub mod hotels;
pub mod rooms;
pub mod users;

pub use bookings::{BookingRepository, StoredBooking};
pub use hotels::{HotelRepository, StoredHotel};
pub use rooms::{RoomRepository, RoomSize, StoredRoom};
pub use users::{StoredUser, UserRepository, UserResponse};
