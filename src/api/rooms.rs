// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::Auth,
    booking::{self, BookRoomRequest},
    error::ApiError,
    state::AppState,
    storage::{Pagination, RoomRepository, StoredBooking, StoredRoom},
};

#[utoipa::path(
    get,
    path = "/api/v1/room",
    params(Pagination),
    tag = "Rooms",
    security(("api_token" = [])),
    responses((status = 200, body = [StoredRoom]))
)]
pub async fn list_rooms(
    Auth(_user): Auth,
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<StoredRoom>>, ApiError> {
    let rooms = state
        .with_storage(move |storage| RoomRepository::new(storage).list(page))
        .await?;
    Ok(Json(rooms))
}

/// Book a room for the caller.
///
/// Fails with 409 when a non-canceled booking of the room overlaps the
/// requested `[fromDate, tillDate)` range.
#[utoipa::path(
    post,
    path = "/api/v1/room/{id}/book",
    params(("id" = String, Path, description = "Room identifier")),
    request_body = BookRoomRequest,
    tag = "Rooms",
    security(("api_token" = [])),
    responses(
        (status = 201, body = StoredBooking),
        (status = 400, description = "Invalid dates, guest count or room id"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Room not available"),
        (status = 504, description = "Store operation timed out")
    )
)]
pub async fn book_room(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Json(request): Json<BookRoomRequest>,
) -> Result<(StatusCode, Json<StoredBooking>), ApiError> {
    let now = state.clock.now();
    let booking = state
        .with_storage(move |storage| booking::book_room(storage, &user, &room_id, &request, now))
        .await?;
    Ok((StatusCode::CREATED, Json(booking)))
}
