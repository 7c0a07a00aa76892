// src/handlers/bookings.rs
//
// Calendário, wizard de reservas e a ficha da reserva (pagamentos, consumos, links)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    db::HotelScope,
    domain::{calendar::CalendarView, finance::PaymentQuote},
    middleware::i18n::Locale,
    models::{
        booking::{
            AddChargePayload, Booking, BookingDetail, BookingKind, Charge, CheckOutPayload, CreateBookingPayload,
            Payment, PaymentQuotePayload, RegisterPaymentPayload, UpdateBookingPayload, WhatsappLink,
        },
        room::Room,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CalendarQuery {
    /// Padrão: ano corrente
    pub year: Option<i32>,
    /// 1..=12 (padrão: mês corrente)
    pub month: Option<u32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct AvailabilityQuery {
    #[param(value_type = Option<String>, format = Date)]
    pub check_in: Option<NaiveDate>,
    #[param(value_type = Option<String>, format = Date)]
    pub check_out: Option<NaiveDate>,
    /// Reserva sendo editada (não conta como conflito)
    pub exclude_booking_id: Option<Uuid>,
}

// GET /api/calendar
#[utoipa::path(
    get,
    path = "/api/calendar",
    tag = "Calendar",
    responses(
        (status = 200, description = "Grade do mês com ocupação e receita", body = CalendarView),
        (status = 400, description = "Mês inválido")
    ),
    params(CalendarQuery, ("x-hotel-id" = Uuid, Header, description = "ID do hotel")),
    security(("api_jwt" = []))
)]
pub async fn get_calendar(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let today = Local::now().date_naive();
    let view = app_state
        .booking_service
        .calendar(&scope, query.year.unwrap_or(today.year()), query.month.unwrap_or(today.month()))
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(view)))
}

// GET /api/bookings/availability
#[utoipa::path(
    get,
    path = "/api/bookings/availability",
    tag = "Bookings",
    responses(
        (status = 200, description = "Quartos livres no período (sem datas: todos)", body = Vec<Room>),
        (status = 400, description = "Intervalo inválido")
    ),
    params(AvailabilityQuery, ("x-hotel-id" = Uuid, Header, description = "ID do hotel")),
    security(("api_jwt" = []))
)]
pub async fn get_availability(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rooms = app_state
        .booking_service
        .availability(&scope, query.check_in, query.check_out, query.exclude_booking_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(rooms)))
}

// POST /api/bookings
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Bookings",
    request_body = CreateBookingPayload,
    responses(
        (status = 201, description = "Reserva (ou bloqueio) criada", body = Booking),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Quarto indisponível ou em manutenção")
    ),
    params(("x-hotel-id" = Uuid, Header, description = "ID do hotel")),
    security(("api_jwt" = []))
)]
pub async fn create_booking(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Json(payload): Json<CreateBookingPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    if let BookingKind::Guest { guest } = &payload.kind {
        guest
            .validate()
            .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;
    }

    let booking = app_state
        .booking_service
        .create_booking(&scope, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /api/bookings/{id}
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    responses(
        (status = 200, description = "Ficha completa da reserva", body = BookingDetail),
        (status = 404, description = "Reserva não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da reserva"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_booking(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = app_state
        .booking_service
        .detail(&scope, booking_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(detail)))
}

// PUT /api/bookings/{id}
#[utoipa::path(
    put,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    request_body = UpdateBookingPayload,
    responses(
        (status = 200, description = "Reserva atualizada", body = Booking),
        (status = 409, description = "Conflito de datas ou reserva encerrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da reserva"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_booking(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(booking_id): Path<Uuid>,
    Json(payload): Json<UpdateBookingPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let booking = app_state
        .booking_service
        .update_booking(&scope, booking_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(booking)))
}

// DELETE /api/bookings/{id}
#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    responses(
        (status = 204, description = "Reserva excluída"),
        (status = 404, description = "Reserva não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da reserva"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_booking(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .booking_service
        .delete_booking(&scope, booking_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /api/bookings/{id}/check-in
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/check-in",
    tag = "Bookings",
    responses(
        (status = 200, description = "Hóspede em casa", body = Booking),
        (status = 409, description = "Transição inválida")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da reserva"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn check_in(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = app_state
        .booking_service
        .check_in(&scope, booking_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(booking)))
}

// POST /api/bookings/{id}/check-out
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/check-out",
    tag = "Bookings",
    request_body = CheckOutPayload,
    responses(
        (status = 200, description = "Saída registrada", body = Booking),
        (status = 409, description = "Saldo pendente (repita com force=true) ou transição inválida")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da reserva"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn check_out(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(booking_id): Path<Uuid>,
    payload: Option<Json<CheckOutPayload>>,
) -> Result<impl IntoResponse, ApiError> {
    let force = payload.is_some_and(|Json(p)| p.force);

    let booking = app_state
        .booking_service
        .check_out(&scope, booking_id, force)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(booking)))
}

// POST /api/bookings/{id}/cancel
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/cancel",
    tag = "Bookings",
    responses(
        (status = 200, description = "Reserva cancelada", body = Booking),
        (status = 409, description = "Transição inválida")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da reserva"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn cancel_booking(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = app_state
        .booking_service
        .cancel(&scope, booking_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(booking)))
}

// POST /api/bookings/{id}/payments
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/payments",
    tag = "Bookings",
    request_body = RegisterPaymentPayload,
    responses(
        (status = 201, description = "Pagamento registrado", body = Payment),
        (status = 400, description = "Valor inválido"),
        (status = 409, description = "Reserva cancelada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da reserva"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn register_payment(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(booking_id): Path<Uuid>,
    Json(payload): Json<RegisterPaymentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = app_state
        .booking_service
        .register_payment(&scope, booking_id, payload.amount, payload.method)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(payment)))
}

// POST /api/bookings/{id}/charges
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/charges",
    tag = "Bookings",
    request_body = AddChargePayload,
    responses(
        (status = 201, description = "Consumo lançado na conta", body = Charge),
        (status = 409, description = "Reserva encerrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da reserva"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_charge(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(booking_id): Path<Uuid>,
    Json(payload): Json<AddChargePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let charge = app_state
        .booking_service
        .add_charge(&scope, booking_id, &payload.description, payload.price)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(charge)))
}

// POST /api/bookings/{id}/payment-quote
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/payment-quote",
    tag = "Bookings",
    request_body = PaymentQuotePayload,
    responses(
        (status = 200, description = "Simulação do link de pagamento", body = PaymentQuote),
        (status = 400, description = "Valor inválido")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da reserva"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn payment_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(booking_id): Path<Uuid>,
    payload: Option<Json<PaymentQuotePayload>>,
) -> Result<impl IntoResponse, ApiError> {
    let amount_today = payload.and_then(|Json(p)| p.amount_today);

    let quote = app_state
        .booking_service
        .payment_quote(&scope, booking_id, amount_today)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quote)))
}

// GET /api/bookings/{id}/whatsapp
#[utoipa::path(
    get,
    path = "/api/bookings/{id}/whatsapp",
    tag = "Bookings",
    responses(
        (status = 200, description = "Link wa.me com a confirmação da reserva", body = WhatsappLink),
        (status = 400, description = "Hóspede sem telefone"),
        (status = 404, description = "Reserva sem hóspede")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da reserva"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn whatsapp_confirmation(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let link = app_state
        .booking_service
        .whatsapp_confirmation(&scope, booking_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(link)))
}
