// src/handlers/public.rs
//
// Rotas sem login: funil de reserva direta, landing page e cardápio do QR.
// O `HotelScope` sai de `open_public` (hotel existe e não está suspenso).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::{
        booking::{Booking, PublicBookingPayload},
        crm::{CreateLeadPayload, Lead},
        hotel::PublicHotelProfile,
        menu::{MenuItem, PlaceOrderPayload, ServiceOrder},
        room::RoomQuote,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct PublicAvailabilityQuery {
    #[param(value_type = String, format = Date)]
    pub check_in: NaiveDate,
    #[param(value_type = String, format = Date)]
    pub check_out: NaiveDate,
    #[serde(default = "default_guests")]
    pub guests: i32,
}

fn default_guests() -> i32 {
    1
}

// GET /api/public/hotels/{hotelId}
#[utoipa::path(
    get,
    path = "/api/public/hotels/{hotelId}",
    tag = "Public",
    responses(
        (status = 200, description = "Marca do hotel para o funil", body = PublicHotelProfile),
        (status = 402, description = "Assinatura suspensa"),
        (status = 404, description = "Hotel não encontrado")
    ),
    params(("hotelId" = Uuid, Path, description = "ID do hotel"))
)]
pub async fn get_hotel_profile(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(hotel_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let (_, hotel) = app_state
        .hotel_service
        .open_public(hotel_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(PublicHotelProfile::from(hotel))))
}

// GET /api/public/hotels/{hotelId}/availability
#[utoipa::path(
    get,
    path = "/api/public/hotels/{hotelId}/availability",
    tag = "Public",
    responses(
        (status = 200, description = "Quartos ativos livres, com o preço da estadia", body = Vec<RoomQuote>),
        (status = 400, description = "Intervalo inválido")
    ),
    params(("hotelId" = Uuid, Path, description = "ID do hotel"), PublicAvailabilityQuery)
)]
pub async fn get_availability(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(hotel_id): Path<Uuid>,
    Query(query): Query<PublicAvailabilityQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (scope, _) = app_state
        .hotel_service
        .open_public(hotel_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let quotes = app_state
        .booking_service
        .public_availability(&scope, query.check_in, query.check_out, query.guests)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quotes)))
}

// POST /api/public/hotels/{hotelId}/bookings
#[utoipa::path(
    post,
    path = "/api/public/hotels/{hotelId}/bookings",
    tag = "Public",
    request_body = PublicBookingPayload,
    responses(
        (status = 201, description = "Reserva direta confirmada", body = Booking),
        (status = 409, description = "Quarto indisponível")
    ),
    params(("hotelId" = Uuid, Path, description = "ID do hotel"))
)]
pub async fn create_booking(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(hotel_id): Path<Uuid>,
    Json(payload): Json<PublicBookingPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let (scope, _) = app_state
        .hotel_service
        .open_public(hotel_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let booking = app_state
        .booking_service
        .create_public_booking(&scope, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(booking)))
}

// POST /api/public/hotels/{hotelId}/leads
#[utoipa::path(
    post,
    path = "/api/public/hotels/{hotelId}/leads",
    tag = "Public",
    request_body = CreateLeadPayload,
    responses(
        (status = 201, description = "Contato registrado", body = Lead),
        (status = 400, description = "Dados inválidos")
    ),
    params(("hotelId" = Uuid, Path, description = "ID do hotel"))
)]
pub async fn capture_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(hotel_id): Path<Uuid>,
    Json(payload): Json<CreateLeadPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let (scope, _) = app_state
        .hotel_service
        .open_public(hotel_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let lead = app_state
        .crm_service
        .capture_lead(&scope, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(lead)))
}

// GET /api/public/hotels/{hotelId}/menu
#[utoipa::path(
    get,
    path = "/api/public/hotels/{hotelId}/menu",
    tag = "Public",
    responses((status = 200, description = "Cardápio disponível", body = Vec<MenuItem>)),
    params(("hotelId" = Uuid, Path, description = "ID do hotel"))
)]
pub async fn get_menu(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(hotel_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let (scope, _) = app_state
        .hotel_service
        .open_public(hotel_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let items = app_state
        .menu_service
        .public_menu(&scope)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(items)))
}

// POST /api/public/hotels/{hotelId}/rooms/{roomId}/orders
#[utoipa::path(
    post,
    path = "/api/public/hotels/{hotelId}/rooms/{roomId}/orders",
    tag = "Public",
    request_body = PlaceOrderPayload,
    responses(
        (status = 201, description = "Pedido enviado à cozinha (e lançado na conta do quarto)", body = ServiceOrder),
        (status = 409, description = "Item indisponível")
    ),
    params(
        ("hotelId" = Uuid, Path, description = "ID do hotel"),
        ("roomId" = Uuid, Path, description = "ID do quarto")
    )
)]
pub async fn place_order(
    State(app_state): State<AppState>,
    locale: Locale,
    Path((hotel_id, room_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<PlaceOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let (scope, _) = app_state
        .hotel_service
        .open_public(hotel_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let order = app_state
        .menu_service
        .place_order(&scope, room_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(order)))
}
