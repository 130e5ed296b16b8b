// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{require_auth, AuthenticatedUser, TOKEN_HEADER},
    booking::BookRoomRequest,
    models::{
        CreateHotelRequest, CreateRoomRequest, CreateUserRequest, GenericResponse, LoginRequest,
        LoginResponse, UpdateUserRequest,
    },
    state::AppState,
    storage::{RoomSize, StoredBooking, StoredHotel, StoredRoom, UserResponse},
};

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod health;
pub mod hotels;
pub mod rooms;
pub mod users;

pub fn router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/booking", get(admin::list_all_bookings))
        .route("/hotel", post(admin::create_hotel))
        .route("/hotel/{id}/room", post(admin::create_room));

    let v1_routes = Router::new()
        .route("/user", get(users::list_users).post(users::create_user))
        .route(
            "/user/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/hotel", get(hotels::list_hotels))
        .route("/hotel/{id}", get(hotels::get_hotel))
        .route("/hotel/{id}/room", get(hotels::list_hotel_rooms))
        .route("/room", get(rooms::list_rooms))
        .route("/room/{id}/book", post(rooms::book_room))
        .route("/booking", get(bookings::list_my_bookings))
        .route(
            "/booking/{id}",
            get(bookings::get_booking).put(bookings::cancel_booking),
        )
        .route("/booking/{id}/cancel", get(bookings::cancel_booking_get))
        .nest("/admin", admin_routes)
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api_routes = Router::new()
        .route("/auth", post(auth::login))
        .nest("/v1", v1_routes);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(TOKEN_HEADER))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        health::readiness,
        auth::login,
        users::list_users,
        users::create_user,
        users::get_user,
        users::update_user,
        users::delete_user,
        hotels::list_hotels,
        hotels::get_hotel,
        hotels::list_hotel_rooms,
        rooms::list_rooms,
        rooms::book_room,
        bookings::list_my_bookings,
        bookings::get_booking,
        bookings::cancel_booking,
        bookings::cancel_booking_get,
        admin::list_all_bookings,
        admin::create_hotel,
        admin::create_room
    ),
    components(
        schemas(
            AuthenticatedUser,
            UserResponse,
            StoredHotel,
            StoredRoom,
            RoomSize,
            StoredBooking,
            LoginRequest,
            LoginResponse,
            CreateUserRequest,
            UpdateUserRequest,
            CreateHotelRequest,
            CreateRoomRequest,
            BookRoomRequest,
            GenericResponse,
            health::CheckStatus,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Auth", description = "Login and token issuance"),
        (name = "Users", description = "User accounts"),
        (name = "Hotels", description = "Hotel listing"),
        (name = "Rooms", description = "Room listing and booking"),
        (name = "Bookings", description = "The caller's bookings"),
        (name = "Admin", description = "Admin-only management")
    )
)]
struct ApiDoc;
