// src/handlers/admin.rs
//
// Console do super-admin: assinaturas dos hotéis e o hunter de novos clientes

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
    middleware::i18n::Locale,
    models::{
        booking::WhatsappLink,
        crm::{CreateHuntedLeadPayload, HuntedLead, HuntedLeadStatus, UpdateHuntedLeadPayload},
        hotel::{AdminHotelEntry, UpdateSubscriptionRequest},
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HuntedLeadQuery {
    pub status: Option<HuntedLeadStatus>,
}

// GET /api/admin/hotels
#[utoipa::path(
    get,
    path = "/api/admin/hotels",
    tag = "Admin",
    responses(
        (status = 200, description = "Todos os hotéis com o status efetivo da assinatura", body = Vec<AdminHotelEntry>),
        (status = 403, description = "Apenas super-admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_hotels(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let hotels = app_state
        .hotel_service
        .list_all_for_admin()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(hotels)))
}

// PATCH /api/admin/hotels/{id}/subscription
#[utoipa::path(
    patch,
    path = "/api/admin/hotels/{id}/subscription",
    tag = "Admin",
    request_body = UpdateSubscriptionRequest,
    responses(
        (status = 200, description = "Assinatura atualizada", body = AdminHotelEntry),
        (status = 404, description = "Hotel não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do hotel")),
    security(("api_jwt" = []))
)]
pub async fn update_subscription(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(hotel_id): Path<Uuid>,
    Json(payload): Json<UpdateSubscriptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.commission_rate.is_some_and(|rate| rate.is_sign_negative()) {
        return Err(AppError::InvalidAmount.to_api_error(&locale, &app_state.i18n_store));
    }

    let entry = app_state
        .hotel_service
        .update_subscription(hotel_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(entry)))
}

// POST /api/admin/hunter
#[utoipa::path(
    post,
    path = "/api/admin/hunter",
    tag = "Admin",
    request_body = CreateHuntedLeadPayload,
    responses(
        (status = 201, description = "Prospect registrado", body = HuntedLead),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_hunted_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateHuntedLeadPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let lead = app_state
        .crm_service
        .create_hunted_lead(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(lead)))
}

// GET /api/admin/hunter
#[utoipa::path(
    get,
    path = "/api/admin/hunter",
    tag = "Admin",
    responses((status = 200, description = "Prospects por aba", body = Vec<HuntedLead>)),
    params(HuntedLeadQuery),
    security(("api_jwt" = []))
)]
pub async fn list_hunted_leads(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<HuntedLeadQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let leads = app_state
        .crm_service
        .list_hunted_leads(query.status)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(leads)))
}

// PATCH /api/admin/hunter/{id}
#[utoipa::path(
    patch,
    path = "/api/admin/hunter/{id}",
    tag = "Admin",
    request_body = UpdateHuntedLeadPayload,
    responses(
        (status = 200, description = "Prospect atualizado", body = HuntedLead),
        (status = 404, description = "Prospect não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do prospect")),
    security(("api_jwt" = []))
)]
pub async fn update_hunted_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(lead_id): Path<Uuid>,
    Json(payload): Json<UpdateHuntedLeadPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let lead = app_state
        .crm_service
        .update_hunted_lead(lead_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(lead)))
}

// GET /api/admin/hunter/{id}/whatsapp
#[utoipa::path(
    get,
    path = "/api/admin/hunter/{id}/whatsapp",
    tag = "Admin",
    responses(
        (status = 200, description = "Link de abordagem pelo WhatsApp", body = WhatsappLink),
        (status = 400, description = "Prospect sem telefone")
    ),
    params(("id" = Uuid, Path, description = "ID do prospect")),
    security(("api_jwt" = []))
)]
pub async fn hunted_lead_whatsapp(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(lead_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let link = app_state
        .crm_service
        .hunted_lead_whatsapp(lead_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(link)))
}
