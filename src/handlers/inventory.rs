// src/handlers/inventory.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    db::HotelScope,
    middleware::i18n::Locale,
    models::room::{CreateRoomPayload, Room, UpdateRoomPayload},
};

// POST /api/rooms
#[utoipa::path(
    post,
    path = "/api/rooms",
    tag = "Rooms",
    request_body = CreateRoomPayload,
    responses(
        (status = 201, description = "Quarto criado", body = Room),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Já existe um quarto com esse nome")
    ),
    params(("x-hotel-id" = Uuid, Header, description = "ID do hotel")),
    security(("api_jwt" = []))
)]
pub async fn create_room(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Json(payload): Json<CreateRoomPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let room = app_state
        .inventory_service
        .create_room(&scope, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(room)))
}

// GET /api/rooms
#[utoipa::path(
    get,
    path = "/api/rooms",
    tag = "Rooms",
    responses((status = 200, description = "Quartos do hotel", body = Vec<Room>)),
    params(("x-hotel-id" = Uuid, Header, description = "ID do hotel")),
    security(("api_jwt" = []))
)]
pub async fn list_rooms(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
) -> Result<impl IntoResponse, ApiError> {
    let rooms = app_state
        .inventory_service
        .list_rooms(&scope)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(rooms)))
}

// PUT /api/rooms/{id}
#[utoipa::path(
    put,
    path = "/api/rooms/{id}",
    tag = "Rooms",
    request_body = UpdateRoomPayload,
    responses(
        (status = 200, description = "Quarto atualizado", body = Room),
        (status = 404, description = "Quarto não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do quarto"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_room(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<UpdateRoomPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let room = app_state
        .inventory_service
        .update_room(&scope, room_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(room)))
}

// DELETE /api/rooms/{id}
#[utoipa::path(
    delete,
    path = "/api/rooms/{id}",
    tag = "Rooms",
    responses(
        (status = 204, description = "Quarto removido"),
        (status = 409, description = "Quarto possui reservas")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do quarto"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_room(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(room_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .inventory_service
        .delete_room(&scope, room_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
