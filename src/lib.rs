// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Hotel Reservation - Booking Service
//!
//! Token-authenticated REST API over users, hotels and rooms. Room bookings
//! are checked against existing non-canceled bookings of the same room, with
//! the check and the insert serialized per room.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token issuance, verification and extractors
//! - `booking` - Booking validation, availability and workflow
//! - `storage` - File-based JSON document store and repositories

pub mod api;
pub mod auth;
pub mod booking;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
