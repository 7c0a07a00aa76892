// src/services/hotel_service.rs

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{HotelRepository, HotelScope},
    models::{
        auth::User,
        hotel::{AdminHotelEntry, Hotel, SubscriptionStatus, UpdateHotelSettingsRequest, UpdateSubscriptionRequest},
    },
};

const TRIAL_DAYS: i64 = 14;

#[derive(Clone)]
pub struct HotelService {
    hotel_repo: HotelRepository,
    pool: PgPool,
}

impl HotelService {
    pub fn new(hotel_repo: HotelRepository, pool: PgPool) -> Self {
        Self { hotel_repo, pool }
    }

    /// Cria o hotel e, na mesma transação, torna o criador membro dele.
    /// Todo hotel nasce em trial.
    pub async fn create_hotel_with_owner(
        &self,
        name: &str,
        phone: Option<&str>,
        owner_id: Uuid,
    ) -> Result<Hotel, AppError> {
        let mut tx = self.pool.begin().await?;

        let hotel = self
            .hotel_repo
            .create_hotel(&mut *tx, name.trim(), phone, Utc::now() + Duration::days(TRIAL_DAYS))
            .await?;

        self.hotel_repo.assign_user_to_hotel(&mut *tx, owner_id, hotel.id).await?;

        tx.commit().await?;

        tracing::info!(hotel_id = %hotel.id, owner_id = %owner_id, "Hotel criado (trial de {} dias)", TRIAL_DAYS);
        Ok(hotel)
    }

    pub async fn list_my_hotels(&self, user_id: Uuid) -> Result<Vec<Hotel>, AppError> {
        self.hotel_repo.list_for_user(user_id).await
    }

    /// Verificação do `hotel_guard`: membro do hotel e assinatura em dia.
    /// Super-admin entra em qualquer hotel (suporte).
    pub async fn authorize_member(&self, user: &User, hotel_id: Uuid) -> Result<HotelScope, AppError> {
        if !user.is_super_admin && !self.hotel_repo.check_user_hotel(user.id, hotel_id).await? {
            tracing::warn!(user_id = %user.id, hotel_id = %hotel_id, "Acesso negado ao hotel");
            return Err(AppError::HotelAccessDenied(hotel_id));
        }

        let hotel = self.hotel_repo.find_by_id(hotel_id).await?.ok_or(AppError::HotelNotFound)?;
        ensure_not_suspended(&hotel)?;

        Ok(HotelScope::grant(hotel.id))
    }

    /// Porta de entrada das rotas públicas (funil, cardápio): o hotel existe e não está suspenso.
    pub async fn open_public(&self, hotel_id: Uuid) -> Result<(HotelScope, Hotel), AppError> {
        let hotel = self.hotel_repo.find_by_id(hotel_id).await?.ok_or(AppError::HotelNotFound)?;
        ensure_not_suspended(&hotel)?;
        Ok((HotelScope::grant(hotel.id), hotel))
    }

    pub async fn get_settings(&self, scope: &HotelScope) -> Result<Hotel, AppError> {
        self.hotel_repo.get(scope).await
    }

    pub async fn update_settings(
        &self,
        scope: &HotelScope,
        req: &UpdateHotelSettingsRequest,
    ) -> Result<Hotel, AppError> {
        self.hotel_repo.update_settings(scope, req).await
    }

    // --- Console do super-admin ---

    pub async fn list_all_for_admin(&self) -> Result<Vec<AdminHotelEntry>, AppError> {
        let now = Utc::now();
        let hotels = self.hotel_repo.list_all().await?;

        Ok(hotels
            .into_iter()
            .map(|hotel| AdminHotelEntry { effective_status: hotel.effective_status(now), hotel })
            .collect())
    }

    pub async fn update_subscription(
        &self,
        hotel_id: Uuid,
        req: &UpdateSubscriptionRequest,
    ) -> Result<AdminHotelEntry, AppError> {
        let hotel = self.hotel_repo.update_subscription(hotel_id, req).await?;
        tracing::info!(hotel_id = %hotel_id, status = ?hotel.subscription_status, "Assinatura atualizada");

        Ok(AdminHotelEntry { effective_status: hotel.effective_status(Utc::now()), hotel })
    }
}

fn ensure_not_suspended(hotel: &Hotel) -> Result<(), AppError> {
    if hotel.effective_status(Utc::now()) == SubscriptionStatus::Suspended {
        return Err(AppError::SubscriptionSuspended);
    }
    Ok(())
}
