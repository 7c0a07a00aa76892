// src/handlers/hotels.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    db::HotelScope,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::hotel::{CreateHotelPayload, Hotel, UpdateHotelSettingsRequest},
};

// POST /api/hotels
#[utoipa::path(
    post,
    path = "/api/hotels",
    tag = "Hotels",
    request_body = CreateHotelPayload,
    responses(
        (status = 201, description = "Hotel criado em trial; o criador vira membro", body = Hotel),
        (status = 400, description = "Dados inválidos"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_hotel(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateHotelPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let hotel = app_state
        .hotel_service
        .create_hotel_with_owner(&payload.name, payload.phone.as_deref(), user.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(hotel)))
}

// GET /api/settings
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    responses(
        (status = 200, description = "Configuração do hotel (marca, IVA, telefone)", body = Hotel),
        (status = 403, description = "Sem acesso ao hotel")
    ),
    params(("x-hotel-id" = uuid::Uuid, Header, description = "ID do hotel")),
    security(("api_jwt" = []))
)]
pub async fn get_settings(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
) -> Result<impl IntoResponse, ApiError> {
    let hotel = app_state
        .hotel_service
        .get_settings(&scope)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(hotel)))
}

// PUT /api/settings
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Settings",
    request_body = UpdateHotelSettingsRequest,
    responses(
        (status = 200, description = "Configuração atualizada", body = Hotel),
        (status = 400, description = "Dados inválidos")
    ),
    params(("x-hotel-id" = uuid::Uuid, Header, description = "ID do hotel")),
    security(("api_jwt" = []))
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Json(payload): Json<UpdateHotelSettingsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    if payload.tax_rate.is_some_and(|rate| rate.is_sign_negative()) {
        return Err(AppError::InvalidAmount.to_api_error(&locale, &app_state.i18n_store));
    }

    let hotel = app_state
        .hotel_service
        .update_settings(&scope, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(hotel)))
}
