// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Booking request validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::BookingError;

/// Request body for booking a room.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookRoomRequest {
    /// Start of the stay (inclusive)
    pub from_date: DateTime<Utc>,
    /// End of the stay (exclusive)
    pub till_date: DateTime<Utc>,
    /// Number of guests, at least 1
    #[serde(default)]
    pub num_persons: i32,
}

impl BookRoomRequest {
    /// Check the request against `now`. The first failing rule wins.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), BookingError> {
        if self.from_date <= now || self.till_date <= now {
            return Err(BookingError::Validation(
                "cannot book room in the past".to_string(),
            ));
        }
        if self.from_date >= self.till_date {
            return Err(BookingError::Validation(
                "fromDate must be before tillDate".to_string(),
            ));
        }
        if self.num_persons < 1 {
            return Err(BookingError::Validation(
                "numPersons must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, 0, 0, 0).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
    }

    fn request(from: u32, till: u32, persons: i32) -> BookRoomRequest {
        BookRoomRequest {
            from_date: at(from),
            till_date: at(till),
            num_persons: persons,
        }
    }

    fn message(result: Result<(), BookingError>) -> String {
        match result {
            Err(BookingError::Validation(m)) => m,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request(1, 5, 2).validate(now()).is_ok());
    }

    #[test]
    fn past_dates_are_rejected() {
        let late = Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();
        assert_eq!(
            message(request(1, 5, 2).validate(late)),
            "cannot book room in the past"
        );
    }

    #[test]
    fn from_equal_to_now_is_in_the_past() {
        assert_eq!(
            message(request(1, 5, 2).validate(at(1))),
            "cannot book room in the past"
        );
    }

    #[test]
    fn reversed_or_empty_range_is_rejected() {
        assert_eq!(
            message(request(5, 1, 2).validate(now())),
            "fromDate must be before tillDate"
        );
        assert_eq!(
            message(request(3, 3, 2).validate(now())),
            "fromDate must be before tillDate"
        );
    }

    #[test]
    fn zero_persons_is_rejected() {
        assert_eq!(
            message(request(1, 5, 0).validate(now())),
            "numPersons must be greater than 0"
        );
        assert_eq!(
            message(request(1, 5, -3).validate(now())),
            "numPersons must be greater than 0"
        );
    }

    #[test]
    fn missing_persons_defaults_to_zero() {
        let req: BookRoomRequest = serde_json::from_str(
            r#"{"fromDate":"2024-06-01T00:00:00Z","tillDate":"2024-06-05T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(req.num_persons, 0);
        assert!(req.validate(now()).is_err());
    }
}
