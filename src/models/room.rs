// src/models/room.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "room_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Active,
    Maintenance,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    #[schema(ignore)]
    pub hotel_id: Uuid,
    #[schema(example = "101 - Doble")]
    pub name: String,
    /// Preço por noite (ou por pessoa/noite quando `per_person_pricing`)
    #[schema(example = "180000")]
    pub price: Decimal,
    #[schema(example = 2)]
    pub capacity: i32,
    pub per_person_pricing: bool,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "101 - Doble")]
    pub name: String,
    #[schema(example = "180000")]
    pub price: Decimal,
    #[validate(range(min = 1, message = "invalid_capacity"))]
    #[schema(example = 2)]
    pub capacity: i32,
    #[serde(default)]
    pub per_person_pricing: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: Option<String>,
    pub price: Option<Decimal>,
    #[validate(range(min = 1, message = "invalid_capacity"))]
    pub capacity: Option<i32>,
    pub per_person_pricing: Option<bool>,
    pub status: Option<RoomStatus>,
}

/// Quarto disponível no funil público, já com o preço da estadia
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomQuote {
    #[serde(flatten)]
    pub room: Room,
    pub nights: i64,
    #[schema(example = "360000")]
    pub total: Decimal,
}

/// Links do QR do quarto: a página do cardápio e a imagem pronta para impressão
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomQrLinks {
    pub menu_url: String,
    #[schema(example = "https://api.qrserver.com/v1/create-qr-code/?size=300x300&data=...")]
    pub qr_image_url: String,
}
