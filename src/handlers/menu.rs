// src/handlers/menu.rs
//
// Room service do lado da equipe: cardápio e fila da cozinha

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
    models::menu::{
        CreateMenuItemPayload, MenuItem, ServiceOrder, ServiceOrderStatus, UpdateMenuItemPayload,
        UpdateOrderStatusPayload,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderStatusQuery {
    pub status: Option<ServiceOrderStatus>,
}

// GET /api/menu
#[utoipa::path(
    get,
    path = "/api/menu",
    tag = "Room Service",
    responses((status = 200, description = "Cardápio completo (inclui indisponíveis)", body = Vec<MenuItem>)),
    params(("x-hotel-id" = Uuid, Header, description = "ID do hotel")),
    security(("api_jwt" = []))
)]
pub async fn list_menu(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state
        .menu_service
        .list_menu(&scope)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(items)))
}

// POST /api/menu
#[utoipa::path(
    post,
    path = "/api/menu",
    tag = "Room Service",
    request_body = CreateMenuItemPayload,
    responses(
        (status = 201, description = "Item criado", body = MenuItem),
        (status = 400, description = "Dados inválidos")
    ),
    params(("x-hotel-id" = Uuid, Header, description = "ID do hotel")),
    security(("api_jwt" = []))
)]
pub async fn create_menu_item(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Json(payload): Json<CreateMenuItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let item = app_state
        .menu_service
        .create_item(&scope, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(item)))
}

// PUT /api/menu/{id}
#[utoipa::path(
    put,
    path = "/api/menu/{id}",
    tag = "Room Service",
    request_body = UpdateMenuItemPayload,
    responses(
        (status = 200, description = "Item atualizado", body = MenuItem),
        (status = 404, description = "Item não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do item"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_menu_item(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<UpdateMenuItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let item = app_state
        .menu_service
        .update_item(&scope, item_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(item)))
}

// DELETE /api/menu/{id}
#[utoipa::path(
    delete,
    path = "/api/menu/{id}",
    tag = "Room Service",
    responses(
        (status = 204, description = "Item removido"),
        (status = 404, description = "Item não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do item"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_menu_item(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(item_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .menu_service
        .delete_item(&scope, item_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Room Service",
    responses((status = 200, description = "Pedidos, mais recentes primeiro", body = Vec<ServiceOrder>)),
    params(OrderStatusQuery, ("x-hotel-id" = Uuid, Header, description = "ID do hotel")),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Query(query): Query<OrderStatusQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = app_state
        .menu_service
        .list_orders(&scope, query.status)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(orders)))
}

// PATCH /api/orders/{id}/status
#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    tag = "Room Service",
    request_body = UpdateOrderStatusPayload,
    responses(
        (status = 200, description = "Pedido atualizado", body = ServiceOrder),
        (status = 409, description = "Transição inválida")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do pedido"),
        ("x-hotel-id" = Uuid, Header, description = "ID do hotel")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order_status(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: HotelScope,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state
        .menu_service
        .update_order_status(&scope, order_id, payload.status)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(order)))
}
