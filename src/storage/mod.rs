// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Document Storage Module
//!
//! File-backed JSON document store for users, hotels, rooms and bookings.
//!
//! ## Storage Layout
//!
//! ```text
//! {DATA_DIR}/
//!   users/{user_id}.json
//!   hotels/{hotel_id}.json
//!   rooms/{room_id}.json
//!   bookings/{booking_id}.json
//! ```
//!
//! ## Access Model
//!
//! - Repositories query collections with structured [`Filter`] documents
//! - Every file write is atomic (temp file + rename)
//! - Check-then-act sequences run under [`FileStorage::with_lock`]
//! - All calls are synchronous; async code goes through
//!   `AppState::with_storage`, which runs them on the blocking pool under a
//!   deadline

pub mod document;
pub mod file_store;
pub mod filter;
pub mod ownership;
pub mod paths;
pub mod repository;

pub use document::{Document, Documents};
pub use file_store::{FileStorage, StorageError, StorageResult};
pub use filter::{Filter, Op, Pagination, Update};
pub use ownership::{require_admin, OwnedResource, OwnershipEnforcer};
pub use paths::{Collection, StoragePaths};
pub use repository::{
    BookingRepository, HotelRepository, RoomRepository, RoomSize, StoredBooking, StoredHotel,
    StoredRoom, StoredUser, UserRepository, UserResponse,
};
