// src/handlers/documents.rs

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    db::HotelScope,
    middleware::i18n::Locale,
    models::room::RoomQrLinks,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SireQuery {
    /// Primeiro dia do período (inclusive)
    #[param(value_type = String, format = Date)]
    pub from: NaiveDate,
    /// Último dia do período (inclusive)
    #[param(value_type = String, format = Date)]
    pub to: NaiveDate,
}

// GET /api/exports/sire
#[utoipa::path(
    get,
    path = "/api/exports/sire",
    tag = "Exports",
    responses(
        (status = 200, description = "Arquivo SIRE (texto separado por |)", content_type = "text/plain"),
        (status = 400, description = "Período inválido")
    ),
    params(SireQuery, ("x-hotel-id" = Uuid, Header, description = "ID do hotel")),
    security(("api_jwt" = []))
)]
pub async fn export_sire(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Query(query): Query<SireQuery>,
) -> Result<Response, ApiError> {
    let report = app_state
        .booking_service
        .sire_export(&scope, query.from, query.to)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"sire_{}_{}.txt\"", query.from.format("%Y%m%d"), query.to.format("%Y%m%d")),
        ),
    ];

    Ok((headers, report).into_response())
}

// GET /api/bookings/{id}/tra.pdf
#[utoipa::path(
    get,
    path = "/api/bookings/{id}/tra.pdf",
    tag = "Exports",
    responses(
        (status = 200, description = "Documento TRA", content_type = "application/pdf"),
        (status = 404, description = "Reserva não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da reserva"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn generate_tra_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(booking_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let pdf_bytes = app_state
        .document_service
        .generate_tra_pdf(&scope, booking_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    // Configura os Headers para o navegador baixar ou mostrar o PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"tra_{}.pdf\"", booking_id)),
    ];

    Ok((headers, pdf_bytes).into_response())
}

// GET /api/rooms/{id}/qr
#[utoipa::path(
    get,
    path = "/api/rooms/{id}/qr",
    tag = "Rooms",
    responses(
        (status = 200, description = "QR do cardápio do quarto", content_type = "image/png"),
        (status = 404, description = "Quarto não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do quarto"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn room_qr(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(room_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let png = app_state
        .document_service
        .room_qr_png(&scope, room_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

// GET /api/rooms/{id}/qr-links
#[utoipa::path(
    get,
    path = "/api/rooms/{id}/qr-links",
    tag = "Rooms",
    responses(
        (status = 200, description = "Link do cardápio e imagem do QR", body = RoomQrLinks),
        (status = 404, description = "Quarto não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do quarto"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn room_qr_links(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(room_id): Path<Uuid>,
) -> Result<Json<RoomQrLinks>, ApiError> {
    let links = app_state
        .document_service
        .room_qr_links(&scope, room_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(links))
}
