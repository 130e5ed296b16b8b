// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HS256 token issuing and verification.
//!
//! The signing secret is injected at construction and loaded once at
//! start-up. Verification checks the header algorithm before the signature:
//! any algorithm other than HS256 is rejected outright.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, decode_header, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};

use super::{AuthError, AuthenticatedUser, TokenClaims};

/// Default token lifetime (7 days).
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24 * 7;

/// Issues and verifies API tokens with a shared HMAC secret.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }

    /// Override the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `user`, expiring `ttl` after `now`.
    pub fn issue(&self, user: &AuthenticatedUser, now: DateTime<Utc>) -> Result<String, AuthError> {
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::Internal(format!("token lifetime {} overflows", self.ttl)))?;
        let claims = TokenClaims {
            id: user.user_id.clone(),
            email: user.email.clone(),
            expires: expires.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("failed to sign token: {e}")))
    }

    /// Verify algorithm and signature, and decode the claims.
    ///
    /// Expiry is NOT checked here; see [`TokenClaims::is_expired`].
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;

        if header.alg != Algorithm::HS256 {
            tracing::warn!(alg = ?header.alg, "Rejected token with unexpected signing method");
            return Err(AuthError::InvalidAlgorithm);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let token_data =
            decode::<TokenClaims>(token, &self.decoding, &validation).map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::InvalidAlgorithm => AuthError::InvalidAlgorithm,
                _ => AuthError::MalformedToken,
            })?;

        Ok(token_data.claims)
    }
}
