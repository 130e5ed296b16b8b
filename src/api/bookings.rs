// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::Auth,
    booking,
    error::ApiError,
    models::GenericResponse,
    state::AppState,
    storage::{BookingRepository, StoredBooking},
};

#[utoipa::path(
    get,
    path = "/api/v1/booking",
    tag = "Bookings",
    security(("api_token" = [])),
    responses((status = 200, body = [StoredBooking]))
)]
pub async fn list_my_bookings(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredBooking>>, ApiError> {
    let bookings = state
        .with_storage(move |storage| BookingRepository::new(storage).list_by_user(&user.user_id))
        .await?;
    Ok(Json(bookings))
}

#[utoipa::path(
    get,
    path = "/api/v1/booking/{id}",
    params(("id" = String, Path, description = "Booking identifier")),
    tag = "Bookings",
    security(("api_token" = [])),
    responses(
        (status = 200, body = StoredBooking),
        (status = 401, description = "Booking belongs to another user"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<StoredBooking>, ApiError> {
    let booking = state
        .with_storage(move |storage| booking::get_booking(storage, &user, &booking_id))
        .await?;
    Ok(Json(booking))
}

/// Cancel one of the caller's bookings. Repeating the call is a no-op.
#[utoipa::path(
    put,
    path = "/api/v1/booking/{id}",
    params(("id" = String, Path, description = "Booking identifier")),
    tag = "Bookings",
    security(("api_token" = [])),
    responses(
        (status = 200, body = GenericResponse),
        (status = 401, description = "Booking belongs to another user"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn cancel_booking(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<GenericResponse>, ApiError> {
    state
        .with_storage(move |storage| booking::cancel_booking(storage, &user, &booking_id))
        .await?;
    Ok(Json(GenericResponse::msg("updated")))
}

/// Same as [`cancel_booking`], reachable with `GET /booking/{id}/cancel`.
#[utoipa::path(
    get,
    path = "/api/v1/booking/{id}/cancel",
    params(("id" = String, Path, description = "Booking identifier")),
    tag = "Bookings",
    security(("api_token" = [])),
    responses(
        (status = 200, body = GenericResponse),
        (status = 401, description = "Booking belongs to another user"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn cancel_booking_get(
    auth: Auth,
    state: State<AppState>,
    path: Path<String>,
) -> Result<Json<GenericResponse>, ApiError> {
    cancel_booking(auth, state, path).await
}
