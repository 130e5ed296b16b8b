// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Booking Module
//!
//! Room availability and the booking workflow.
//!
//! A booking request goes through three stages, strictly in order:
//!
//! 1. Input validation ([`validation`]), pure and independent of storage
//! 2. Availability check ([`availability`]) against non-canceled bookings
//! 3. Persistence of the new booking
//!
//! Stages 2 and 3 run while holding the room's lock in the document store,
//! so two concurrent requests for overlapping ranges cannot both succeed.

pub mod availability;
pub mod validation;
pub mod workflow;

use thiserror::Error;

use crate::storage::StorageError;

pub use availability::{is_available, overlap_filter};
pub use validation::BookRoomRequest;
pub use workflow::{book_room, cancel_booking, get_booking};

/// Typed rejection of a booking operation.
#[derive(Debug, Error)]
pub enum BookingError {
    /// Request failed input validation
    #[error("{0}")]
    Validation(String),
    /// Identifier is not a valid UUID
    #[error("invalid id")]
    InvalidId,
    /// Referenced entity does not exist
    #[error("{0} not found")]
    NotFound(&'static str),
    /// An overlapping non-canceled booking exists
    #[error("room not available")]
    Unavailable,
    /// Store failure, ownership denial or timeout
    #[error(transparent)]
    Storage(#[from] StorageError),
}
