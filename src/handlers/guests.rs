// src/handlers/guests.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    db::HotelScope,
    middleware::i18n::Locale,
    models::{
        assistant::{AssistantPayload, ScanResult, VoiceResult},
        guest::{Guest, UpdateGuestPayload},
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GuestSearchQuery {
    /// Trecho do nome ou do documento
    pub q: Option<String>,
}

// GET /api/guests
#[utoipa::path(
    get,
    path = "/api/guests",
    tag = "Guests",
    responses((status = 200, description = "Registro de hóspedes", body = Vec<Guest>)),
    params(GuestSearchQuery, ("x-hotel-id" = Uuid, Header, description = "ID do hotel")),
    security(("api_jwt" = []))
)]
pub async fn list_guests(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Query(query): Query<GuestSearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let guests = app_state
        .guest_service
        .list_guests(&scope, query.q.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(guests)))
}

// GET /api/guests/{id}
#[utoipa::path(
    get,
    path = "/api/guests/{id}",
    tag = "Guests",
    responses(
        (status = 200, description = "Hóspede", body = Guest),
        (status = 404, description = "Hóspede não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do hóspede"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_guest(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(guest_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let guest = app_state
        .guest_service
        .get_guest(&scope, guest_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(guest)))
}

// PUT /api/guests/{id}
#[utoipa::path(
    put,
    path = "/api/guests/{id}",
    tag = "Guests",
    request_body = UpdateGuestPayload,
    responses(
        (status = 200, description = "Hóspede atualizado (inclui aceite/assinatura)", body = Guest),
        (status = 404, description = "Hóspede não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do hóspede"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_guest(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(guest_id): Path<Uuid>,
    Json(payload): Json<UpdateGuestPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let guest = app_state
        .guest_service
        .update_guest(&scope, guest_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(guest)))
}

// POST /api/guests/scan
#[utoipa::path(
    post,
    path = "/api/guests/scan",
    tag = "Assistant",
    request_body = AssistantPayload,
    responses(
        (status = 200, description = "Documento lido; traz o hóspede se já existir", body = ScanResult),
        (status = 422, description = "Documento ilegível")
    ),
    params(("x-hotel-id" = Uuid, Header, description = "ID do hotel")),
    security(("api_jwt" = []))
)]
pub async fn scan_document(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Json(payload): Json<AssistantPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let result = app_state
        .guest_service
        .scan_document(&scope, &payload.raw)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(result)))
}

// POST /api/assistant/voice
#[utoipa::path(
    post,
    path = "/api/assistant/voice",
    tag = "Assistant",
    request_body = AssistantPayload,
    responses(
        (status = 200, description = "Comando interpretado", body = VoiceResult),
        (status = 422, description = "Resposta do assistente inválida")
    ),
    params(("x-hotel-id" = Uuid, Header, description = "ID do hotel")),
    security(("api_jwt" = []))
)]
pub async fn interpret_voice(
    State(app_state): State<AppState>,
    locale: Locale,
    _scope: HotelScope,
    Json(payload): Json<AssistantPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let result = app_state
        .guest_service
        .interpret_voice(&payload.raw)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(result)))
}
