// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::HotelQuery,
    state::AppState,
    storage::{HotelRepository, RoomRepository, StoredHotel, StoredRoom},
};

#[utoipa::path(
    get,
    path = "/api/v1/hotel",
    params(HotelQuery),
    tag = "Hotels",
    security(("api_token" = [])),
    responses((status = 200, body = [StoredHotel]))
)]
pub async fn list_hotels(
    Auth(_user): Auth,
    State(state): State<AppState>,
    Query(query): Query<HotelQuery>,
) -> Result<Json<Vec<StoredHotel>>, ApiError> {
    let hotels = state
        .with_storage(move |storage| {
            HotelRepository::new(storage).list(query.rating, query.pagination())
        })
        .await?;
    Ok(Json(hotels))
}

#[utoipa::path(
    get,
    path = "/api/v1/hotel/{id}",
    params(("id" = String, Path, description = "Hotel identifier")),
    tag = "Hotels",
    security(("api_token" = [])),
    responses(
        (status = 200, body = StoredHotel),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn get_hotel(
    Auth(_user): Auth,
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
) -> Result<Json<StoredHotel>, ApiError> {
    let hotel = state
        .with_storage(move |storage| HotelRepository::new(storage).get(&hotel_id))
        .await?;
    Ok(Json(hotel))
}

#[utoipa::path(
    get,
    path = "/api/v1/hotel/{id}/room",
    params(("id" = String, Path, description = "Hotel identifier")),
    tag = "Hotels",
    security(("api_token" = [])),
    responses(
        (status = 200, body = [StoredRoom]),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn list_hotel_rooms(
    Auth(_user): Auth,
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
) -> Result<Json<Vec<StoredRoom>>, ApiError> {
    let rooms = state
        .with_storage(move |storage| {
            let hotel = HotelRepository::new(storage).get(&hotel_id)?;
            RoomRepository::new(storage).list_by_hotel(&hotel.id)
        })
        .await?;
    Ok(Json(rooms))
}
