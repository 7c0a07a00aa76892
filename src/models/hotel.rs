// src/models/hotel.rs

use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;
use validator::Validate;

// ---
// 1. Status da assinatura (SaaS)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "subscription_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Trial,
    Active,
    Suspended,
}

// ---
// 2. Hotel (O "Tenant")
// ---
// A raiz de todos os dados: quartos, hóspedes, reservas...
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: Uuid,
    #[schema(example = "Hotel Casa Colonial")]
    pub name: String,
    #[schema(example = "#0F766E")]
    pub brand_color: Option<String>,
    /// IVA em percentual (ex: 19)
    #[schema(example = "19")]
    pub tax_rate: Decimal,
    /// Comissão da plataforma sobre reservas não diretas, em percentual
    #[schema(example = "15")]
    pub commission_rate: Decimal,
    #[schema(example = "+57 300 123 4567")]
    pub phone: Option<String>,
    pub subscription_status: SubscriptionStatus,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hotel {
    /// Um trial vencido vale como suspenso, mesmo que o banco ainda diga "trial".
    pub fn effective_status(&self, now: DateTime<Utc>) -> SubscriptionStatus {
        match (self.subscription_status, self.trial_ends_at) {
            (SubscriptionStatus::Trial, Some(ends_at)) if ends_at < now => SubscriptionStatus::Suspended,
            (status, _) => status,
        }
    }
}

// ---
// 3. UserHotel (A "Ponte" Usuário-Hotel)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserHotel {
    pub user_id: Uuid,
    pub hotel_id: Uuid,
    pub created_at: DateTime<Utc>,
}

// Visão pública (funil de reservas): só o que a marca precisa
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicHotelProfile {
    pub id: Uuid,
    pub name: String,
    pub brand_color: Option<String>,
    pub phone: Option<String>,
    pub tax_rate: Decimal,
}

impl From<Hotel> for PublicHotelProfile {
    fn from(hotel: Hotel) -> Self {
        Self {
            id: hotel.id,
            name: hotel.name,
            brand_color: hotel.brand_color,
            phone: hotel.phone,
            tax_rate: hotel.tax_rate,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHotelPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Hotel Casa Colonial")]
    pub name: String,
    #[schema(example = "+57 300 123 4567")]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHotelSettingsRequest {
    #[validate(length(min = 1, message = "required"))]
    pub name: Option<String>,
    #[validate(length(equal = 7, message = "invalid_color"))]
    #[schema(example = "#0F766E")]
    pub brand_color: Option<String>,
    #[schema(example = "19")]
    pub tax_rate: Option<Decimal>,
    pub phone: Option<String>,
}

// Console do super-admin
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionRequest {
    pub subscription_status: Option<SubscriptionStatus>,
    pub trial_ends_at: Option<DateTime<Utc>>,
    #[schema(example = "12")]
    pub commission_rate: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminHotelEntry {
    #[serde(flatten)]
    pub hotel: Hotel,
    pub effective_status: SubscriptionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn hotel(status: SubscriptionStatus, trial_ends_at: Option<DateTime<Utc>>) -> Hotel {
        Hotel {
            id: Uuid::new_v4(),
            name: "Casa Colonial".into(),
            brand_color: None,
            tax_rate: Decimal::from(19),
            commission_rate: Decimal::from(15),
            phone: None,
            subscription_status: status,
            trial_ends_at,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn expired_trial_counts_as_suspended() {
        let now = Utc::now();
        let h = hotel(SubscriptionStatus::Trial, Some(now - Duration::days(1)));
        assert_eq!(h.effective_status(now), SubscriptionStatus::Suspended);
    }

    #[test]
    fn running_trial_and_active_keep_their_status() {
        let now = Utc::now();
        let trial = hotel(SubscriptionStatus::Trial, Some(now + Duration::days(3)));
        assert_eq!(trial.effective_status(now), SubscriptionStatus::Trial);

        let active = hotel(SubscriptionStatus::Active, Some(now - Duration::days(30)));
        assert_eq!(active.effective_status(now), SubscriptionStatus::Active);
    }
}
