// src/models/booking.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    domain::finance::{Financials, TaxBreakdown},
    models::{
        guest::{Guest, GuestInput},
        room::Room,
    },
};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    CheckedIn,
    CheckedOut,
    Maintenance,
    Cancelled,
}

impl BookingStatus {
    /// Ocupa o quarto para efeito de disponibilidade?
    /// Canceladas e já encerradas liberam o inventário.
    pub fn blocks_inventory(self) -> bool {
        !matches!(self, BookingStatus::Cancelled | BookingStatus::CheckedOut)
    }

    /// Prioridade para resolver uma célula do calendário com mais de uma reserva.
    /// `None` = nunca aparece no calendário.
    pub fn cell_priority(self) -> Option<u8> {
        match self {
            BookingStatus::CheckedIn => Some(3),
            BookingStatus::Confirmed => Some(2),
            BookingStatus::CheckedOut => Some(1),
            BookingStatus::Maintenance => Some(0),
            BookingStatus::Cancelled => None,
        }
    }

    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Confirmed, CheckedIn)
                | (Confirmed, CheckedOut)
                | (Confirmed, Cancelled)
                | (CheckedIn, CheckedOut)
                | (Maintenance, Cancelled)
        )
    }

    /// Estados que ainda aceitam edição de datas/quarto/preço
    pub fn is_editable(self) -> bool {
        matches!(self, BookingStatus::Confirmed | BookingStatus::CheckedIn | BookingStatus::Maintenance)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::CheckedIn => "checked_in",
            BookingStatus::CheckedOut => "checked_out",
            BookingStatus::Maintenance => "maintenance",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

// Canal de origem. Só serve para escolher a comissão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_source", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingSource {
    Direct,
    Booking,
    Airbnb,
    Expedia,
    WalkIn,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    Online,
}

// --- Structs persistidas ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    #[schema(ignore)]
    pub hotel_id: Uuid,
    pub room_id: Uuid,
    /// `None` em bloqueios de manutenção
    pub guest_id: Option<Uuid>,
    #[schema(value_type = String, format = Date, example = "2024-03-01")]
    pub check_in: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2024-03-03")]
    pub check_out: NaiveDate,
    pub status: BookingStatus,
    #[schema(example = "200000")]
    pub total_price: Decimal,
    pub source: BookingSource,
    #[schema(example = 2)]
    pub guests_count: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// `date ∈ [check_in, check_out)`
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    #[schema(ignore)]
    pub hotel_id: Uuid,
    pub booking_id: Uuid,
    #[schema(example = "100000")]
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    pub id: Uuid,
    #[schema(ignore)]
    pub hotel_id: Uuid,
    pub booking_id: Uuid,
    #[schema(example = "Minibar")]
    pub description: String,
    #[schema(example = "20000")]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

// --- Payloads (Wizard / Funil) ---

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookingKind {
    /// Reserva de hóspede (reaproveita o hóspede pelo número de documento)
    Guest { guest: GuestInput },
    /// Bloqueio de manutenção (sem hóspede)
    Block,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingPayload {
    pub room_id: Uuid,
    #[schema(value_type = String, format = Date, example = "2024-03-01")]
    pub check_in: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2024-03-03")]
    pub check_out: NaiveDate,
    #[serde(flatten)]
    pub kind: BookingKind,
    /// Se ausente, calculado a partir do preço do quarto
    pub total_price: Option<Decimal>,
    #[serde(default = "default_source")]
    pub source: BookingSource,
    #[validate(range(min = 1, message = "invalid_guests_count"))]
    #[serde(default = "default_guests_count")]
    pub guests_count: i32,
    pub notes: Option<String>,
}

fn default_source() -> BookingSource {
    BookingSource::WalkIn
}

fn default_guests_count() -> i32 {
    1
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingPayload {
    pub room_id: Option<Uuid>,
    #[schema(value_type = Option<String>, format = Date)]
    pub check_in: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub check_out: Option<NaiveDate>,
    pub total_price: Option<Decimal>,
    #[validate(range(min = 1, message = "invalid_guests_count"))]
    pub guests_count: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicBookingPayload {
    pub room_id: Uuid,
    #[schema(value_type = String, format = Date)]
    pub check_in: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub check_out: NaiveDate,
    #[validate(nested)]
    pub guest: GuestInput,
    #[validate(range(min = 1, message = "invalid_guests_count"))]
    pub guests_count: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutPayload {
    /// Confirmação humana para sair com saldo pendente
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPaymentPayload {
    #[schema(example = "100000")]
    pub amount: Decimal,
    pub method: PaymentMethod,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddChargePayload {
    #[validate(length(min = 1, message = "required"))]
    pub description: String,
    #[schema(example = "20000")]
    pub price: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuotePayload {
    /// Valor a cobrar hoje (se ausente, o saldo pendente)
    pub amount_today: Option<Decimal>,
}

// --- Respostas ---

/// Ficha da reserva (drawer do calendário)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetail {
    pub booking: Booking,
    pub room: Room,
    pub guest: Option<Guest>,
    pub payments: Vec<Payment>,
    pub charges: Vec<Charge>,
    pub financials: Financials,
    /// IVA contido no total (taxa do hotel)
    pub tax: TaxBreakdown,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WhatsappLink {
    #[schema(example = "https://wa.me/573001234567?text=...")]
    pub url: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use BookingStatus::*;

    #[test]
    fn only_open_statuses_block_inventory() {
        assert!(Confirmed.blocks_inventory());
        assert!(CheckedIn.blocks_inventory());
        assert!(Maintenance.blocks_inventory());
        assert!(!CheckedOut.blocks_inventory());
        assert!(!Cancelled.blocks_inventory());
    }

    #[test]
    fn transitions_follow_the_stay_lifecycle() {
        assert!(Confirmed.can_transition_to(CheckedIn));
        assert!(CheckedIn.can_transition_to(CheckedOut));
        // saída direta, sem check-in registrado
        assert!(Confirmed.can_transition_to(CheckedOut));
        assert!(Maintenance.can_transition_to(Cancelled));

        assert!(!Maintenance.can_transition_to(CheckedOut));
        assert!(!CheckedOut.can_transition_to(CheckedIn));
        assert!(!Cancelled.can_transition_to(Confirmed));
        assert!(!CheckedIn.can_transition_to(Cancelled));
    }

    #[test]
    fn booking_kind_is_read_from_a_flat_payload() {
        let payload: CreateBookingPayload = serde_json::from_value(serde_json::json!({
            "roomId": Uuid::nil(),
            "checkIn": "2024-03-01",
            "checkOut": "2024-03-03",
            "kind": "block"
        }))
        .unwrap();

        assert!(matches!(payload.kind, BookingKind::Block));
        assert_eq!(payload.guests_count, 1);
        assert_eq!(payload.source, BookingSource::WalkIn);
    }
}
