// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless token authentication for the hotel reservation API.
//!
//! ## Auth Flow
//!
//! 1. Client logs in at `POST /api/auth` with email and password
//! 2. Server returns an HS256-signed token carrying `{id, email, expires}`
//! 3. Client sends the token in the `X-Api-Token` header
//! 4. For every `/api/v1` request the server:
//!    - rejects any header algorithm other than HS256
//!    - verifies the signature with the injected secret
//!    - compares `expires` with the application clock
//!    - loads the user fresh from the store (admin flag included)
//!
//! ## Security
//!
//! - The secret is loaded once at start-up and passed explicitly
//! - There is no revocation list; tokens die by expiry only
//! - Passwords are bcrypt hashes and never leave the server

pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod password;
pub mod token;

pub use claims::{AuthenticatedUser, TokenClaims};
pub use error::AuthError;
pub use extractor::{AdminOnly, Auth};
pub use middleware::{require_auth, TOKEN_HEADER};
pub use token::TokenCodec;
