// src/models/menu.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;
use utoipa::ToSchema;
use validator::Validate;

// --- Cardápio (Room Service) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: Uuid,
    #[schema(ignore)]
    pub hotel_id: Uuid,
    #[schema(example = "Club sándwich")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "32000")]
    pub price: Decimal,
    #[schema(example = "Comidas")]
    pub category: Option<String>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItemPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub available: Option<bool>,
}

// --- Pedidos ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "service_order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServiceOrderStatus {
    Pending,
    Preparing,
    Delivered,
    Cancelled,
}

impl ServiceOrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceOrderStatus::Pending => "pending",
            ServiceOrderStatus::Preparing => "preparing",
            ServiceOrderStatus::Delivered => "delivered",
            ServiceOrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn can_transition_to(self, next: ServiceOrderStatus) -> bool {
        use ServiceOrderStatus::*;
        matches!(
            (self, next),
            (Pending, Preparing) | (Pending, Cancelled) | (Preparing, Delivered) | (Preparing, Cancelled)
        )
    }
}

/// Linha do pedido, congelada com nome e preço do momento da compra
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub menu_item_id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl OrderLine {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrder {
    pub id: Uuid,
    #[schema(ignore)]
    pub hotel_id: Uuid,
    pub room_id: Uuid,
    /// Reserva hospedada no quarto no momento do pedido (a conta vai para ela)
    pub booking_id: Option<Uuid>,
    #[schema(value_type = Vec<OrderLine>)]
    pub items: Json<Vec<OrderLine>>,
    pub total: Decimal,
    pub status: ServiceOrderStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub menu_item_id: Uuid,
    #[validate(range(min = 1, max = 50, message = "invalid_quantity"))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderPayload {
    #[validate(length(min = 1, message = "empty_order"), nested)]
    pub items: Vec<OrderLineRequest>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusPayload {
    pub status: ServiceOrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: i32) -> OrderLineRequest {
        OrderLineRequest { menu_item_id: Uuid::new_v4(), quantity }
    }

    #[test]
    fn empty_order_is_rejected() {
        let payload = PlaceOrderPayload { items: vec![], notes: None };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("items"));
    }

    #[test]
    fn each_line_quantity_is_validated() {
        let ok = PlaceOrderPayload { items: vec![line(2)], notes: None };
        assert!(ok.validate().is_ok());

        let bad = PlaceOrderPayload { items: vec![line(2), line(0)], notes: None };
        assert!(bad.validate().is_err());
    }
}
