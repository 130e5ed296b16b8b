// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Admin-only API endpoints.
//!
//! These endpoints require the admin flag on the caller's account and
//! provide:
//! - A view of every booking regardless of owner
//! - Hotel and room creation

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    auth::AdminOnly,
    error::ApiError,
    models::{CreateHotelRequest, CreateRoomRequest},
    state::AppState,
    storage::{
        BookingRepository, HotelRepository, Pagination, RoomRepository, StorageError,
        StoredBooking, StoredHotel, StoredRoom,
    },
};

#[utoipa::path(
    get,
    path = "/api/v1/admin/booking",
    params(Pagination),
    tag = "Admin",
    security(("api_token" = [])),
    responses(
        (status = 200, body = [StoredBooking]),
        (status = 401, description = "Caller is not an admin")
    )
)]
pub async fn list_all_bookings(
    AdminOnly(_admin): AdminOnly,
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<StoredBooking>>, ApiError> {
    let bookings = state
        .with_storage(move |storage| BookingRepository::new(storage).list_all(page))
        .await?;
    Ok(Json(bookings))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/hotel",
    request_body = CreateHotelRequest,
    tag = "Admin",
    security(("api_token" = [])),
    responses(
        (status = 201, body = StoredHotel),
        (status = 401, description = "Caller is not an admin")
    )
)]
pub async fn create_hotel(
    AdminOnly(admin): AdminOnly,
    State(state): State<AppState>,
    Json(request): Json<CreateHotelRequest>,
) -> Result<(StatusCode, Json<StoredHotel>), ApiError> {
    if request.name.trim().is_empty() || request.location.trim().is_empty() {
        return Err(ApiError::bad_request("name and location are required"));
    }

    let hotel = StoredHotel {
        id: Uuid::new_v4().to_string(),
        name: request.name,
        location: request.location,
        rooms: Vec::new(),
        rating: request.rating,
        created_at: state.clock.now(),
    };

    let hotel = state
        .with_storage(move |storage| {
            HotelRepository::new(storage).create(&hotel)?;
            Ok::<_, StorageError>(hotel)
        })
        .await?;

    tracing::info!(hotel_id = %hotel.id, admin_id = %admin.user_id, "Hotel created");
    Ok((StatusCode::CREATED, Json(hotel)))
}

/// Create a room and append it to the hotel's room list.
#[utoipa::path(
    post,
    path = "/api/v1/admin/hotel/{id}/room",
    params(("id" = String, Path, description = "Hotel identifier")),
    request_body = CreateRoomRequest,
    tag = "Admin",
    security(("api_token" = [])),
    responses(
        (status = 201, body = StoredRoom),
        (status = 401, description = "Caller is not an admin"),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn create_room(
    AdminOnly(admin): AdminOnly,
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<StoredRoom>), ApiError> {
    if !request.price.is_finite() || request.price < 0.0 {
        return Err(ApiError::bad_request("price must be a non-negative number"));
    }

    let created_at = state.clock.now();
    let room = state
        .with_storage(move |storage| {
            let hotel = HotelRepository::new(storage).get(&hotel_id)?;

            let room = StoredRoom {
                id: Uuid::new_v4().to_string(),
                hotel_id: hotel.id.clone(),
                size: request.size,
                seaside: request.seaside,
                price: request.price,
                created_at,
            };
            RoomRepository::new(storage).create_in_hotel(&room)?;
            Ok::<_, StorageError>(room)
        })
        .await?;

    tracing::info!(
        room_id = %room.id,
        hotel_id = %room.hotel_id,
        admin_id = %admin.user_id,
        "Room created"
    );
    Ok((StatusCode::CREATED, Json(room)))
}
